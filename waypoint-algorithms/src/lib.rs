mod dijkstra;
pub use dijkstra::*;
mod hill_climbing;
pub use hill_climbing::*;
mod random_walk;
pub use random_walk::*;
mod trace;
pub use trace::*;
