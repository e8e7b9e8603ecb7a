#![doc = include_str!("../README.md")]

mod multi_error;
pub use multi_error::*;

mod collector;
pub use collector::*;
