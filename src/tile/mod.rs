pub mod set;
pub mod types;

pub use set::{build_set, set_size, shuffle_set, take_double, MAX_PIPS};
pub use types::{Pip, Tile};
