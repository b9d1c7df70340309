use anyhow::Context;
use clap::Parser;
use log::info;

use app::ViewerApp;
use config::Args;
use udp_link::UdpLink;

mod app;
mod config;
mod scene;
mod udp_link;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    let link = UdpLink::bind(config.listen)?;
    info!("Listening for accelerometer samples on {}", link.local_addr()?);
    let app = ViewerApp::new(link, &config).context("Invalid viewer configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_inner_size([700.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(app::TITLE, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Viewer window closed with error: {}", e))
}
