use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use ahrs::{tilt::DEFAULT_SENSITIVITY, TiltConfig};
use clap::Parser;
use hal::AccelScale;

use crate::{
    scene::Camera,
    udp_link::{DEFAULT_ADDRESS, DEFAULT_PORT},
};

/// Real-time orientation viewer for an ADXL345 board streaming samples over UDP
#[derive(Parser, Debug, Clone)]
#[command(name = "viewer", version)]
pub struct Args {
    /// Local address to listen on, must match the destination used by the board
    #[arg(long, default_value_t = IpAddr::V4(DEFAULT_ADDRESS))]
    pub bind: IpAddr,

    /// UDP port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Factor applied to roll and pitch before display
    #[arg(short, long, default_value_t = DEFAULT_SENSITIVITY, allow_negative_numbers = true)]
    pub sensitivity: f32,

    /// Accelerometer resolution in g per count
    #[arg(long, default_value_t = AccelScale::ADXL345.g_per_lsb)]
    pub g_per_lsb: f32,

    /// Redraw interval in milliseconds
    #[arg(long, default_value_t = 30)]
    pub refresh_ms: u64,

    /// Camera elevation in degrees
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    pub elevation: f32,

    /// Camera azimuth in degrees
    #[arg(long, default_value_t = -60.0, allow_negative_numbers = true)]
    pub azimuth: f32,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub listen: SocketAddr,
    pub tilt: TiltConfig,
    pub refresh_interval: Duration,
    pub camera: Camera,
}

impl Args {
    pub fn into_config(self) -> ViewerConfig {
        ViewerConfig {
            listen: SocketAddr::new(self.bind, self.port),
            tilt: TiltConfig {
                scale: AccelScale::new(self.g_per_lsb),
                sensitivity: self.sensitivity,
            },
            refresh_interval: Duration::from_millis(self.refresh_ms),
            camera: Camera {
                elevation: self.elevation,
                azimuth: self.azimuth,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = Args::parse_from(["viewer"]).into_config();
        assert_eq!(config.listen, "10.10.10.1:4096".parse().unwrap());
        assert_eq!(config.tilt.sensitivity, 0.5);
        assert_eq!(config.tilt.scale, AccelScale::ADXL345);
        assert_eq!(config.refresh_interval, Duration::from_millis(30));
        assert_eq!(config.camera, Camera::default());
    }

    #[test]
    fn test_overrides() {
        let config = Args::parse_from([
            "viewer",
            "--bind",
            "127.0.0.1",
            "--port",
            "5000",
            "--sensitivity",
            "1.0",
            "--refresh-ms",
            "16",
            "--azimuth",
            "-45",
            "--elevation",
            "10",
        ])
        .into_config();
        assert_eq!(config.listen, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.tilt.sensitivity, 1.0);
        assert_eq!(config.refresh_interval, Duration::from_millis(16));
        assert_eq!(config.camera.azimuth, -45.0);
        assert_eq!(config.camera.elevation, 10.0);
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Args::try_parse_from(["viewer", "--port", "70000"]).is_err());
    }
}
