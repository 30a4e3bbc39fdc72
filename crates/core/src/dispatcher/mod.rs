//! Dispatcher module for converting discovered files.
//!
//! For each source file the dispatcher:
//! - Computes the mirrored destination under the output directory
//! - Creates the destination's parent directory
//! - Runs the encoder
//! - Records a success or a failure, never aborting the batch
//!
//! Conversions run one at a time by default. With a higher parallelism the
//! dispatcher keeps up to that many encoders in flight and still reports
//! outcomes in dispatch order.

mod destination;
mod dispatch;

pub use destination::destination_for;
pub use dispatch::{convert_all, Dispatcher};
