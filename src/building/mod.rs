pub mod brushes;

pub use brushes::*;
