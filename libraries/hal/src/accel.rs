/// Accelerometer sample interface
use byteorder::{BigEndian, ByteOrder};

use crate::types::Vector3d;

/// Size in bytes of one raw sample on the wire (three big-endian `i16`)
pub const RAW_ACCEL_LEN: usize = 6;

/// One raw accelerometer reading, in sensor counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawAccel {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAccel {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode a sample from the start of a payload
    ///
    /// Bytes past the first [`RAW_ACCEL_LEN`] are ignored. Returns `None` when
    /// the payload is too short to hold a full sample.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() < RAW_ACCEL_LEN {
            return None;
        }
        Some(Self {
            x: BigEndian::read_i16(&payload[0..2]),
            y: BigEndian::read_i16(&payload[2..4]),
            z: BigEndian::read_i16(&payload[4..6]),
        })
    }

    /// Encode the sample in wire order
    pub fn to_bytes(&self) -> [u8; RAW_ACCEL_LEN] {
        let mut buf = [0u8; RAW_ACCEL_LEN];
        BigEndian::write_i16(&mut buf[0..2], self.x);
        BigEndian::write_i16(&mut buf[2..4], self.y);
        BigEndian::write_i16(&mut buf[4..6], self.z);
        buf
    }
}

/// Conversion from raw counts to g
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelScale {
    /// Acceleration represented by one count, in g
    pub g_per_lsb: f32,
}

impl AccelScale {
    /// ADXL345 in full-resolution mode: 3.9 mg/LSB
    pub const ADXL345: AccelScale = AccelScale { g_per_lsb: 0.0039 };

    pub const fn new(g_per_lsb: f32) -> Self {
        Self { g_per_lsb }
    }

    /// Convert a raw sample to acceleration in g
    pub fn to_g(&self, raw: RawAccel) -> Vector3d {
        Vector3d::new(
            raw.x as f32 * self.g_per_lsb,
            raw.y as f32 * self.g_per_lsb,
            raw.z as f32 * self.g_per_lsb,
        )
    }
}

impl Default for AccelScale {
    fn default() -> Self {
        Self::ADXL345
    }
}

/// Delivery counters for an accelerometer source
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    /// Valid samples received
    pub received: u64,

    /// Payloads discarded because they were too short to hold a sample
    pub dropped: u64,
}

/// A source of accelerometer samples that only keeps the newest one
pub trait AccelSource {
    /// Get the most recent sample received so far
    ///
    /// Must not block. Returns `None` until the first valid sample arrives;
    /// after that the last sample is returned until a newer one replaces it.
    fn latest(&mut self) -> Option<RawAccel>;

    /// Get the delivery counters of this source
    fn stats(&self) -> SourceStats;
}
