//! Subcommands and their execution.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use corelib::export::{write_still, AnimatedSvgExporter, HtmlPlayer};
use corelib::ingest::read_snapshots;
use corelib::{AnimationConfig, AnimationController, FrameSink, GraphStats, RenderGraph, SinkOutcome};
use tracing::info;

use crate::config::RenderArgs;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every snapshot in order as an animation.
    Animate {
        /// Snapshot file (one JSON record per line, or a JSON array).
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Skip the interactive HTML player.
        #[arg(long)]
        no_display: bool,

        /// Also write the looping animated image.
        #[arg(long)]
        export: bool,

        /// Player frame interval in milliseconds.
        #[arg(long, default_value_t = 20)]
        interval_ms: u64,

        /// Export playback rate in frames per second.
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,

        /// Directory the player and export are written to.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Render one snapshot as a still SVG.
    Render {
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// 1-based snapshot number.
        #[arg(long, default_value_t = 1)]
        index: usize,

        /// Output file.
        #[arg(short, long, default_value = "ring_frame.svg")]
        output: PathBuf,
    },

    /// Print node and edge counts per snapshot.
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        /// Count finger edges too.
        #[arg(long)]
        show_fingers: bool,
    },
}

/// Summary of a finished command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Animated {
        frames: usize,
        outputs: Vec<(&'static str, SinkOutcome)>,
    },
    Rendered {
        path: PathBuf,
    },
    Inspected(Vec<GraphStats>),
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Animated { frames, outputs } => {
                write!(f, "rendered {} frame(s)", frames)?;
                for (name, outcome) in outputs {
                    write!(f, "\n  {}: {}", name, outcome)?;
                }
                Ok(())
            }
            CommandResult::Rendered { path } => write!(f, "wrote {}", path.display()),
            CommandResult::Inspected(stats) => {
                write!(f, "{:>6} {:>6} {:>9} {:>10} {:>12} {:>7}", "frame", "nodes", "implicit", "successor", "predecessor", "finger")?;
                for (i, s) in stats.iter().enumerate() {
                    write!(
                        f,
                        "\n{:>6} {:>6} {:>9} {:>10} {:>12} {:>7}",
                        i + 1,
                        s.nodes,
                        s.implicit_nodes,
                        s.successor_edges,
                        s.predecessor_edges,
                        s.finger_edges
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        match self {
            Command::Animate {
                input,
                render,
                no_display,
                export,
                interval_ms,
                fps,
                output_dir,
            } => {
                let snapshots = read_snapshots(input)
                    .with_context(|| format!("loading snapshots from {}", input.display()))?;
                let animation = AnimationConfig {
                    frame_interval: Duration::from_millis(*interval_ms),
                    export_fps: *fps,
                    output_dir: output_dir.clone(),
                };

                let mut player = HtmlPlayer::new(animation.display_path(), animation.frame_interval);
                let mut exporter =
                    AnimatedSvgExporter::new(animation.export_path(), animation.export_frame_duration());
                let mut sinks: Vec<&mut dyn FrameSink> = Vec::new();
                if !no_display {
                    sinks.push(&mut player);
                }
                if *export {
                    sinks.push(&mut exporter);
                }
                let names: Vec<&'static str> = sinks.iter().map(|s| s.name()).collect();

                info!(frames = snapshots.len(), sinks = ?names, "starting animation");
                let outcomes = AnimationController::new(render.to_config())?
                    .run(&snapshots, &mut sinks)
                    .context("rendering animation")?;

                Ok(CommandResult::Animated {
                    frames: snapshots.len(),
                    outputs: names.into_iter().zip(outcomes).collect(),
                })
            }
            Command::Render {
                input,
                render,
                index,
                output,
            } => {
                let snapshots = read_snapshots(input)
                    .with_context(|| format!("loading snapshots from {}", input.display()))?;
                let scene = AnimationController::new(render.to_config())?
                    .render_still(&snapshots, *index)
                    .with_context(|| format!("rendering snapshot {}", index))?;
                let path = write_still(&scene, output)?;
                Ok(CommandResult::Rendered { path })
            }
            Command::Inspect { input, show_fingers } => {
                let snapshots = read_snapshots(input)
                    .with_context(|| format!("loading snapshots from {}", input.display()))?;
                let stats = snapshots
                    .iter()
                    .map(|s| RenderGraph::build(s, *show_fingers).stats())
                    .collect();
                Ok(CommandResult::Inspected(stats))
            }
        }
    }
}
