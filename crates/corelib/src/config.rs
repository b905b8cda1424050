//! Rendering and animation settings.

use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the interactive player written by the display mode.
pub const DISPLAY_FILE_NAME: &str = "ring_animation.html";

/// File name of the looping image written by the export mode.
pub const EXPORT_FILE_NAME: &str = "ring_animation.svg";

/// How a single frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Radius of the layout circle in layout units.
    pub radius: f64,
    /// Node marker radius in pixels.
    pub node_radius: f64,
    /// Draw finger-table edges.
    pub show_fingers: bool,
    /// Curvature magnitudes finger edges are drawn from.
    pub finger_curvature: Range<f64>,
    /// Stroke opacity of finger edges.
    pub finger_opacity: f64,
    /// Seed for finger curvature; reseeded every frame.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1200,
            radius: 1.0,
            node_radius: 28.0,
            show_fingers: false,
            finger_curvature: 0.35..0.7,
            finger_opacity: 0.35,
            seed: 42,
        }
    }
}

impl RenderConfig {
    /// Rejects settings that would collapse the layout or break finger bends.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!("canvas {}x{} has no area", self.width, self.height)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("layout radius must be positive, got {}", self.radius)));
        }
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            return Err(invalid(format!("node radius must be positive, got {}", self.node_radius)));
        }
        let Range { start, end } = self.finger_curvature;
        if !(start.is_finite() && end.is_finite() && 0.0 <= start && start <= end) {
            return Err(invalid(format!(
                "finger curvature range {}..{} is not a finite non-negative range",
                start, end
            )));
        }
        if !(0.0..=1.0).contains(&self.finger_opacity) {
            return Err(invalid(format!(
                "finger opacity must be within 0..=1, got {}",
                self.finger_opacity
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> Error {
    Error::Render(format!("invalid render config: {}", reason))
}

/// Output pacing and destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Delay between frames of the interactive player.
    pub frame_interval: Duration,
    /// Playback rate of the exported image.
    pub export_fps: u32,
    /// Directory both artifacts are written to.
    pub output_dir: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(20),
            export_fps: 5,
            output_dir: PathBuf::from("."),
        }
    }
}

impl AnimationConfig {
    pub fn display_path(&self) -> PathBuf {
        self.output_dir.join(DISPLAY_FILE_NAME)
    }

    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE_NAME)
    }

    /// Duration of one exported frame; a zero rate is treated as 1 fps.
    pub fn export_frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.export_fps.max(1)))
    }
}
