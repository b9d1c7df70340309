use nalgebra as na;
use core::f32::consts::PI;

/// Convert degrees to radians
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Rotation matrix for the given Euler angles in radians
///
/// Composed as `Rz(yaw) * Ry(pitch) * Rx(roll)`: roll is applied first, then
/// pitch, then yaw, all about the fixed world axes.
pub fn rotation_matrix(roll: f32, pitch: f32, yaw: f32) -> na::Rotation3<f32> {
    na::Rotation3::from_euler_angles(roll, pitch, yaw)
}
