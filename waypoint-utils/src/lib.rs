mod cost;
pub use cost::*;
mod json;
pub use json::*;
mod rows;
pub use rows::*;
