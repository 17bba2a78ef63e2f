mod app;
mod config;

use anyhow::{Context, Result};
use clap::Parser;

use trimarch_engine::device::GpuInit;
use trimarch_engine::logging::{init_logging, LoggingConfig};
use trimarch_engine::shader::{install_shaders, NagaCompiler};
use trimarch_engine::window::{Runtime, RuntimeConfig};

use crate::app::MarchApp;
use crate::config::{Cli, MarchConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = MarchConfig::default().with_cli(Cli::parse());

    // Unreadable shader files end the process; bad shader code does not.
    let sources = config
        .shaders
        .load()
        .context("shader sources unavailable")?;

    let program = match install_shaders(&mut NagaCompiler::new(), &sources) {
        Ok(program) => Some(program),
        Err(e) => {
            log::error!("{e}; triangles will not be drawn");
            None
        }
    };

    let runtime = RuntimeConfig {
        title: "trimarch".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), MarchApp::new(&config, program))
}
