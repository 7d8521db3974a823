mod config;
mod scene;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use turtle::MemoryCanvas;

use crate::config::DemoConfig;
use crate::scene::SceneReport;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let canvas = Arc::new(MemoryCanvas::with_pacing(config.width, config.height, config.pacing));
    if let Err(e) = scene::run(&config, canvas.clone()).await {
        tracing::error!(error = %e, "scene failed");
        return ExitCode::FAILURE;
    }

    let report = SceneReport::capture(config.scene, &canvas);
    let mut stdout = std::io::stdout().lock();
    let written = serde_json::to_writer_pretty(&mut stdout, &report)
        .map_err(std::io::Error::from)
        .and_then(|()| writeln!(stdout));
    if let Err(e) = written {
        tracing::error!(error = %e, "failed to write report");
        return ExitCode::FAILURE;
    }

    tracing::info!(scene = ?config.scene, commands = report.commands.len(), "report written");
    ExitCode::SUCCESS
}
