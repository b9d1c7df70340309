use std::time::{Duration, Instant};

use ahrs::{Tilt, TiltEstimate, TiltEstimator};
use hal::AccelSource;
use log::info;
use nalgebra as na;

use crate::{
    config::ViewerConfig,
    scene::{Camera, Scene, SceneFrame},
};

pub const TITLE: &str = "Real-time orientation - ADXL345";

pub struct ViewerApp<S> {
    state: State,
    source: S,
    estimator: TiltEstimator,
    scene: Scene,
    camera: Camera,
    refresh_interval: Duration,
    estimate: Option<TiltEstimate>,
    last_received: u64,
    last_update: Option<Instant>,
}

impl<S: AccelSource> ViewerApp<S> {
    pub fn new(source: S, config: &ViewerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            state: State::WaitingForData,
            source,
            estimator: TiltEstimator::new(config.tilt)?,
            scene: Scene::default(),
            camera: config.camera,
            refresh_interval: config.refresh_interval,
            estimate: None,
            last_received: 0,
            last_update: None,
        })
    }

    /// Pull the newest sample and build the frame to draw
    ///
    /// Without any sample yet the board stays level.
    fn tick(&mut self, now: Instant) -> SceneFrame {
        if let Some(raw) = self.source.latest() {
            if let State::WaitingForData = self.state {
                info!("Receiving orientation data");
                self.state = State::Running;
            }
            self.estimate = Some(self.estimator.estimate(raw));
        }

        let received = self.source.stats().received;
        if received != self.last_received {
            self.last_received = received;
            self.last_update = Some(now);
        }

        let tilt = self.estimate.map(|e| e.tilt).unwrap_or(Tilt::LEVEL);
        self.scene.frame(&tilt)
    }

    fn status_line(&self, now: Instant) -> String {
        let stats = self.source.stats();
        let age = match self.last_update {
            Some(at) => format!("{:.1} s ago", now.duration_since(at).as_secs_f32()),
            None => "never".to_owned(),
        };
        format!(
            "received {}  dropped {}  last sample {}",
            stats.received, stats.dropped, age
        )
    }
}

impl<S: AccelSource> eframe::App for ViewerApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let scene_frame = self.tick(now);

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading(TITLE);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_line(now));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match (&self.state, &self.estimate) {
                (State::Running, Some(estimate)) => {
                    let (roll, pitch) = estimate.tilt.to_degrees();
                    ui.monospace(accel_text(&estimate.accel_g));
                    ui.monospace(format!("roll {:+6.1}°  pitch {:+6.1}°", roll, pitch));
                }
                _ => {
                    ui.label("Waiting for data...");
                }
            }

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            if response.dragged() {
                self.camera.orbit(response.drag_delta());
            }
            scene_frame.paint(&painter, response.rect, &self.camera);
        });

        ctx.request_repaint_after(self.refresh_interval);
    }
}

/// Acceleration readout shown above the board
pub fn accel_text(accel_g: &na::Vector3<f32>) -> String {
    format!(
        "a = ({:+.2}, {:+.2}, {:+.2}) g",
        accel_g.x, accel_g.y, accel_g.z
    )
}

enum State {
    WaitingForData,
    Running,
}
