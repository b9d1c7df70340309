//! Roll and pitch from a single accelerometer reading.
//!
//! With the board at rest the accelerometer only measures gravity, so two of
//! the three attitude angles follow directly from the direction of the
//! measured vector. Yaw is unobservable this way and is left at zero.

use hal::{AccelScale, RawAccel};
use nalgebra as na;

use crate::error::{helpers::config_error, AhrsResult};
use crate::utils::{rad_to_deg, rotation_matrix};

/// Sensitivity applied to the raw tilt angles by default
pub const DEFAULT_SENSITIVITY: f32 = 0.5;

/// Roll and pitch in radians
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Rotation about the board's longitudinal (X) axis
    pub roll: f32,
    /// Rotation about the board's lateral (Y) axis
    pub pitch: f32,
}

impl Tilt {
    pub const LEVEL: Tilt = Tilt {
        roll: 0.0,
        pitch: 0.0,
    };

    pub fn new(roll: f32, pitch: f32) -> Self {
        Self { roll, pitch }
    }

    /// Both angles multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            roll: self.roll * factor,
            pitch: self.pitch * factor,
        }
    }

    /// (roll, pitch) in degrees
    pub fn to_degrees(&self) -> (f32, f32) {
        (rad_to_deg(self.roll), rad_to_deg(self.pitch))
    }

    /// Body-to-world rotation with zero yaw
    pub fn rotation(&self) -> na::Rotation3<f32> {
        rotation_matrix(self.roll, self.pitch, 0.0)
    }
}

/// Compute roll and pitch from a gravity vector
///
/// The vector may be in any unit; only its direction matters. A zero vector
/// yields a level tilt.
pub fn tilt_from_accel(accel: &na::Vector3<f32>) -> Tilt {
    let roll = accel.y.atan2(accel.z);
    let pitch = (-accel.x).atan2((accel.y * accel.y + accel.z * accel.z).sqrt());
    Tilt { roll, pitch }
}

/// Configuration for the tilt estimator
#[derive(Debug, Clone, Copy)]
pub struct TiltConfig {
    /// Conversion from raw counts to g
    pub scale: AccelScale,

    /// Factor applied to both angles before they are reported
    ///
    /// Values below 1 damp the displayed motion, values above 1 exaggerate it.
    pub sensitivity: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            scale: AccelScale::ADXL345,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Output of one estimator step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltEstimate {
    /// Tilt after the sensitivity factor has been applied
    pub tilt: Tilt,

    /// Measured acceleration in g
    pub accel_g: na::Vector3<f32>,
}

/// Converts raw samples into display-ready tilt angles
#[derive(Debug, Clone)]
pub struct TiltEstimator {
    config: TiltConfig,
}

impl TiltEstimator {
    /// Create a new estimator, validating the configuration
    pub fn new(config: TiltConfig) -> AhrsResult<Self> {
        if !config.sensitivity.is_finite() {
            return Err(config_error(
                format!("Sensitivity must be finite, got {}", config.sensitivity),
                Some("sensitivity"),
            ));
        }
        if !config.scale.g_per_lsb.is_finite() || config.scale.g_per_lsb <= 0.0 {
            return Err(config_error(
                format!(
                    "Scale must be a positive number of g per LSB, got {}",
                    config.scale.g_per_lsb
                ),
                Some("g_per_lsb"),
            ));
        }
        Ok(Self { config })
    }

    /// Estimate the tilt of one raw sample
    pub fn estimate(&self, raw: RawAccel) -> TiltEstimate {
        let accel_g = self.config.scale.to_g(raw);
        let tilt = tilt_from_accel(&accel_g).scaled(self.config.sensitivity);
        TiltEstimate { tilt, accel_g }
    }
}
