pub mod generation;
pub mod tutorial;
