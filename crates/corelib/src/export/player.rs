//! Interactive looping display.
//!
//! A self-contained HTML page that embeds every frame and cycles through them
//! at a fixed interval. Space pauses, the arrow keys step. Arrowhead markers
//! live once in a zero-size SVG that is never hidden; every frame refers to it.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::animation::{FrameSink, FrameTag, SinkOutcome};
use crate::error::Result;
use crate::export::staged::StagedFile;
use crate::render::svg::{escape, Body, Defs, Open};
use crate::render::Scene;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>DHT Chord Ring Visualization</title>
<style>
body { margin: 0; background: #f4f4f4; font-family: sans-serif; }
#player { display: flex; flex-direction: column; align-items: center; }
.frame { display: none; }
.frame.active { display: block; }
#status { color: #333; margin: 8px; }
</style>
</head>
<body>
"#;

const PAGE_SCRIPT: &str = r#"<script>
(function () {
  var player = document.getElementById('player');
  var frames = player.querySelectorAll('.frame');
  var status = document.getElementById('status');
  var interval = parseInt(player.dataset.interval, 10) || 20;
  var current = 0;
  var paused = false;
  function show(n) {
    frames[current].classList.remove('active');
    current = (n + frames.length) % frames.length;
    frames[current].classList.add('active');
    status.textContent = 'Frame ' + (current + 1) + ' of ' + frames.length + (paused ? ' (paused)' : '');
  }
  document.addEventListener('keydown', function (e) {
    if (e.key === ' ') { paused = !paused; show(current); e.preventDefault(); }
    else if (e.key === 'ArrowRight') { paused = true; show(current + 1); }
    else if (e.key === 'ArrowLeft') { paused = true; show(current - 1); }
  });
  show(0);
  setInterval(function () { if (!paused) { show(current + 1); } }, interval);
})();
</script>
</body>
</html>
"#;

/// Writes the looping HTML player.
pub struct HtmlPlayer {
    path: PathBuf,
    interval: Duration,
    file: Option<StagedFile>,
    written: usize,
}

impl HtmlPlayer {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            file: None,
            written: 0,
        }
    }
}

impl FrameSink for HtmlPlayer {
    fn name(&self) -> &'static str {
        "display"
    }

    fn begin(&mut self, total: usize, _width: u32, _height: u32) -> Result<()> {
        self.written = 0;
        if total == 0 {
            info!(path = %self.path.display(), "no snapshots, nothing to display");
            return Ok(());
        }
        let mut file = StagedFile::create(&self.path)?;
        file.write(PAGE_HEAD)?;
        file.write(format_args!(
            "<div id=\"player\" data-interval=\"{}\" data-frames=\"{}\">\n",
            self.interval.as_millis().max(1),
            total
        ))?;
        file.write(format_args!(
            "<svg id=\"markers\" width=\"0\" height=\"0\" style=\"position:absolute\" aria-hidden=\"true\">\n{}</svg>\n",
            Defs
        ))?;
        self.file = Some(file);
        Ok(())
    }

    fn accept(&mut self, tag: FrameTag, scene: &Scene) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        file.write(format_args!(
            "<div class=\"frame\" title=\"{}\">\n",
            escape(&tag.to_string())
        ))?;
        file.write(Open {
            width: scene.width(),
            height: scene.height(),
        })?;
        file.write(Body(scene))?;
        file.write("</svg>\n</div>\n")?;
        self.written += 1;
        debug!(frame = tag.number(), total = tag.total, "added frame to player");
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkOutcome> {
        let Some(mut file) = self.file.take() else {
            return Ok(SinkOutcome::Empty);
        };
        file.write("<p id=\"status\"></p>\n</div>\n")?;
        file.write(PAGE_SCRIPT)?;
        let path = file.commit()?;
        Ok(SinkOutcome::Written {
            path,
            frames: self.written,
        })
    }

    fn abort(&mut self) {
        self.file = None;
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
    fn test_player_embeds_all_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.html");
        let snapshots = vec![
            Snapshot::new(vec![NodeRecord::new(1).with_successor(1)]).unwrap(),
            Snapshot::new(vec![NodeRecord::new(1), NodeRecord::new(2)]).unwrap(),
        ];
        let mut player = HtmlPlayer::new(&path, Duration::from_millis(20));
        let outcomes = AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&snapshots, &mut [&mut player])
            .unwrap();

        assert_eq!(outcomes, vec![SinkOutcome::Written { path: path.clone(), frames: 2 }]);
        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("<div class=\"frame\"").count(), 2);
        assert_eq!(html.matches("<svg ").count(), 3, "marker host plus one per frame");
        assert!(html.contains("data-interval=\"20\""));
        assert!(html.contains("setInterval"));
    }

    #[test]
    fn test_empty_sequence_has_no_player() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.html");
        let mut player = HtmlPlayer::new(&path, Duration::from_millis(20));
        let outcomes = AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&[], &mut [&mut player])
            .unwrap();
        assert_eq!(outcomes, vec![SinkOutcome::Empty]);
        assert!(!path.exists());
    }

    #[test]
    fn test_markers_defined_once_outside_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.html");
        let snapshots: Vec<Snapshot> = (1..=3i64)
            .map(|n| {
                let nodes = (1..=n).map(|i| NodeRecord::new(i).with_successor(i % n + 1)).collect();
                Snapshot::new(nodes).unwrap()
            })
            .collect();
        let mut player = HtmlPlayer::new(&path, Duration::from_millis(20));
        AnimationController::new(RenderConfig::default())
            .unwrap()
            .run(&snapshots, &mut [&mut player])
            .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        for marker in ["arrow-successor", "arrow-predecessor", "arrow-finger"] {
            assert_eq!(html.matches(&format!("id=\"{}\"", marker)).count(), 1, "{}", marker);
        }
        let defs = html.find("<defs>").unwrap();
        let first_frame = html.find("<div class=\"frame\"").unwrap();
        assert!(defs < first_frame, "markers must not sit inside a hideable frame");
        assert!(html.matches("url(#arrow-successor)").count() >= 3);
    }
}
