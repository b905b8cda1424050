//! Looping animated SVG export.
//!
//! Every frame becomes a group whose visibility is switched by a discrete
//! SMIL animation. All groups share one timeline of `frames × frame duration`
//! that repeats forever, so the file plays back as a looping image at a fixed
//! rate in any SVG-capable viewer.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::animation::{FrameSink, FrameTag, SinkOutcome};
use crate::error::Result;
use crate::export::staged::StagedFile;
use crate::render::svg::{Body, Defs, Open};
use crate::render::Scene;

/// Writes the whole sequence to one looping SVG.
pub struct AnimatedSvgExporter {
    path: PathBuf,
    frame_duration: Duration,
    file: Option<StagedFile>,
    total: usize,
    written: usize,
}

impl AnimatedSvgExporter {
    pub fn new(path: impl Into<PathBuf>, frame_duration: Duration) -> Self {
        Self {
            path: path.into(),
            frame_duration,
            file: None,
            total: 0,
            written: 0,
        }
    }
}

/// Visibility switch for one frame on the shared timeline.
struct FrameTimeline {
    tag: FrameTag,
    cycle: Duration,
}

impl Display for FrameTimeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let FrameTag { index, total } = self.tag;
        let start = index as f64 / total as f64;
        let end = (index + 1) as f64 / total as f64;
        let (values, key_times) = if index == 0 {
            ("visible;hidden".to_string(), format!("0;{:.6}", end))
        } else if index + 1 == total {
            ("hidden;visible".to_string(), format!("0;{:.6}", start))
        } else {
            ("hidden;visible;hidden".to_string(), format!("0;{:.6};{:.6}", start, end))
        };
        write!(
            f,
            r#"<animate attributeName="visibility" calcMode="discrete" dur="{:.3}s" repeatCount="indefinite" values="{}" keyTimes="{}"/>"#,
            self.cycle.as_secs_f64(),
            values,
            key_times
        )
    }
}

impl FrameSink for AnimatedSvgExporter {
    fn name(&self) -> &'static str {
        "export"
    }

    fn begin(&mut self, total: usize, width: u32, height: u32) -> Result<()> {
        self.total = total;
        self.written = 0;
        if total == 0 {
            info!(path = %self.path.display(), "no snapshots, nothing to export");
            return Ok(());
        }
        let mut file = StagedFile::create(&self.path)?;
        file.write(Open { width, height })?;
        file.write(Defs)?;
        self.file = Some(file);
        Ok(())
    }

    fn accept(&mut self, tag: FrameTag, scene: &Scene) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        let visibility = if tag.index == 0 { "visible" } else { "hidden" };
        file.write(format_args!(
            "<g class=\"frame\" data-frame=\"{}\" visibility=\"{}\">\n",
            tag.number(),
            visibility
        ))?;
        if tag.total > 1 {
            let cycle = self.frame_duration * tag.total as u32;
            file.write(FrameTimeline { tag, cycle })?;
            file.write("\n")?;
        }
        file.write(Body(scene))?;
        file.write("</g>\n")?;
        self.written += 1;
        info!(frame = tag.number(), total = tag.total, "exported frame {}/{}", tag.number(), tag.total);
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkOutcome> {
        let Some(mut file) = self.file.take() else {
            return Ok(SinkOutcome::Empty);
        };
        file.write("</svg>\n")?;
        let path = file.commit()?;
        Ok(SinkOutcome::Written {
            path,
            frames: self.written,
        })
    }

    fn abort(&mut self) {
        if let Some(file) = self.file.take() {
            info!(path = %file.path().display(), "export aborted, discarding partial output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationController;
    use crate::config::RenderConfig;
    use crate::node::NodeRecord;
    use crate::snapshot::Snapshot;

    #[test]
    fn test_middle_frame_timeline() {
        let timeline = FrameTimeline {
            tag: FrameTag { index: 1, total: 4 },
            cycle: Duration::from_millis(800),
        };
        let text = timeline.to_string();
        assert!(text.contains(r#"values="hidden;visible;hidden""#), "{}", text);
        assert!(text.contains(r#"keyTimes="0;0.250000;0.500000""#), "{}", text);
        assert!(text.contains(r#"dur="0.800s""#), "{}", text);
    }

    #[test]
    fn test_edge_frame_timelines() {
        let first = FrameTimeline {
            tag: FrameTag { index: 0, total: 2 },
            cycle: Duration::from_millis(400),
        }
        .to_string();
        let last = FrameTimeline {
            tag: FrameTag { index: 1, total: 2 },
            cycle: Duration::from_millis(400),
        }
        .to_string();
        assert!(first.contains(r#"values="visible;hidden" keyTimes="0;0.500000""#), "{}", first);
        assert!(last.contains(r#"values="hidden;visible" keyTimes="0;0.500000""#), "{}", last);
    }

    #[test]
    fn test_exports_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.svg");
        let snapshots = vec![
            Snapshot::new(vec![NodeRecord::new(1).with_successor(2), NodeRecord::new(2).with_successor(1)]).unwrap(),
            Snapshot::new(vec![NodeRecord::new(1).with_successor(1)]).unwrap(),
            Snapshot::default(),
        ];
        let mut exporter = AnimatedSvgExporter::new(&path, Duration::from_millis(200));
        let outcomes = AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&snapshots, &mut [&mut exporter])
            .unwrap();

        assert_eq!(outcomes, vec![SinkOutcome::Written { path: path.clone(), frames: 3 }]);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches(r#"<g class="frame""#).count(), 3);
        assert_eq!(svg.matches("<animate ").count(), 3);
        assert_eq!(svg.matches("<defs>").count(), 1);
        assert!(svg.contains(r#"dur="0.600s""#));
        assert!(svg.contains("Frame 3 of 3"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_single_frame_is_static() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.svg");
        let snapshots = vec![Snapshot::new(vec![NodeRecord::new(1)]).unwrap()];
        let mut exporter = AnimatedSvgExporter::new(&path, Duration::from_millis(200));
        AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&snapshots, &mut [&mut exporter])
            .unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("<animate"));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.svg");
        let mut exporter = AnimatedSvgExporter::new(&path, Duration::from_millis(200));
        let outcomes = AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&[], &mut [&mut exporter])
            .unwrap();
        assert_eq!(outcomes, vec![SinkOutcome::Empty]);
        assert!(!path.exists());
    }
}
