//! Trading signal classification.

pub mod classifier;
pub mod handlers;

pub use classifier::{classify, Features, Signal};
pub use handlers::{SignalRequest, SignalResponse};
