mod harness;
pub use harness::*;
mod report;
pub use report::*;
mod settings;
pub use settings::*;
mod sinks;
pub use sinks::*;
