//! Command-line configuration and logging setup.

use clap::{Args, Parser};
use corelib::RenderConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Draw and animate Chord ring snapshots.
#[derive(Debug, Parser)]
#[command(name = "ringviz", version, about, long_about = None)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

impl CliConfig {
    /// Initialises logging, runs the command and prints its summary.
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(&self.log_level);
        let result = self.command.execute()?;
        println!("{}", result);
        Ok(())
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Options controlling how each frame is drawn.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Draw finger-table edges.
    #[arg(long)]
    pub show_fingers: bool,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1200)]
    pub height: u32,

    /// Seed for finger arc curvature.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Stroke opacity of finger edges (0.0 - 1.0).
    #[arg(long, default_value_t = 0.35)]
    pub finger_opacity: f64,
}

impl RenderArgs {
    pub fn to_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            show_fingers: self.show_fingers,
            seed: self.seed,
            finger_opacity: self.finger_opacity,
            ..RenderConfig::default()
        }
    }
}
