//! Authorization policy: the role hierarchy and the per-action gate

pub mod gate;
pub mod hierarchy;

pub use gate::{Actor, Employment};
