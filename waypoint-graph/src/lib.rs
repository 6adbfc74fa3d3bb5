mod cost;
pub use cost::*;
mod graph;
pub use graph::*;
mod instance;
pub use instance::*;
mod loading;
pub use loading::*;
mod query;
pub use query::*;
