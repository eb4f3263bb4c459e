pub mod orchestrator;
pub mod sink;

pub use orchestrator::run;
pub use sink::{ItemSink, ListingSender};
