//! # AHRS - Attitude and Heading Reference System
//!
//! Attitude estimation for a board whose only inertial sensor is an
//! accelerometer. While the board is quasi-static the measured acceleration is
//! gravity, which fixes roll and pitch; heading is not observable and is held
//! at zero.
//!
//! ## Features
//!
//! - Closed-form roll/pitch from a gravity vector
//! - Raw count to g conversion through [`hal::AccelScale`]
//! - Adjustable sensitivity for display
//! - Rotation helpers built on nalgebra
//!
//! ## Platform Support
//!
//! - **desktop**: enables `std` for nalgebra, used by the viewer

mod error;
pub mod tilt;
pub mod utils;

pub use error::{helpers, AhrsError, AhrsResult};
pub use tilt::{tilt_from_accel, Tilt, TiltConfig, TiltEstimate, TiltEstimator};
