#![cfg_attr(not(test), no_std)]
extern crate nalgebra;

mod accel;
mod types;

pub use accel::*;
pub use types::*;
