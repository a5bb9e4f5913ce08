//! Snapshot sinks: recording frames in memory or dumping them to disk.
//!
//! Frames are plain JSON documents holding the grid dimensions, the step
//! index, and the row-major cell values. Color mapping and image encoding
//! belong to whoever reads the frames.

use crate::metrics::FieldStats;
use physarum_core::error::ExportError;
use physarum_core::snapshot::{FieldView, SnapshotSink};
use physarum_core::types::Step;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An owned copy of the field at one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: Step,
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
}

impl Frame {
    pub fn capture(step: Step, field: &FieldView<'_>) -> Self {
        Self {
            step,
            width: field.width(),
            height: field.height(),
            values: field.values().to_vec(),
        }
    }

    pub fn view(&self) -> FieldView<'_> {
        FieldView::new(self.width, self.height, &self.values)
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_view(&self.view())
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    frames: Vec<Frame>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl SnapshotSink for SnapshotRecorder {
    fn on_snapshot(&mut self, step: Step, field: &FieldView<'_>) -> Result<(), ExportError> {
        self.frames.push(Frame::capture(step, field));
        Ok(())
    }
}

/// Writes one `step_<n>.json` per snapshot into a `sim_<token>` directory.
///
/// The directory is created if needed and emptied of files on open, so a
/// rerun with the same token never mixes frames from two runs.
#[derive(Debug)]
pub struct FrameDirectory {
    dir: PathBuf,
    written: usize,
}

impl FrameDirectory {
    /// Open `root/sim_<token>`, creating and clearing it.
    pub fn open(root: impl AsRef<Path>, token: u32) -> Result<Self, ExportError> {
        let dir = root.as_ref().join(format!("sim_{}", token));
        std::fs::create_dir_all(&dir)?;

        let mut removed = 0usize;
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("Cleared {} previous frames from {}", removed, dir.display());
        }
        info!("Writing frames to {}", dir.display());

        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frames_written(&self) -> usize {
        self.written
    }

    /// Path of the frame for `step`.
    pub fn frame_path(&self, step: Step) -> PathBuf {
        self.dir.join(format!("step_{}.json", step))
    }
}

impl SnapshotSink for FrameDirectory {
    fn on_snapshot(&mut self, step: Step, field: &FieldView<'_>) -> Result<(), ExportError> {
        let frame = Frame::capture(step, field);
        let content = serde_json::to_string(&frame)?;
        std::fs::write(self.frame_path(step), content)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        info!("Wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}

/// Load a frame written by [`FrameDirectory`].
pub fn read_frame(path: impl AsRef<Path>) -> Result<Frame, ExportError> {
    let content = std::fs::read_to_string(path)?;
    let frame: Frame = serde_json::from_str(&content)?;
    if frame.values.len() != frame.width * frame.height {
        return Err(ExportError::Rejected(format!(
            "frame at step {} has {} values for a {}x{} grid",
            frame.step,
            frame.values.len(),
            frame.width,
            frame.height
        )));
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_frames_in_order() {
        let mut recorder = SnapshotRecorder::new();
        let a = [1.0, 0.0];
        let b = [0.5, 0.5];
        recorder.on_snapshot(0, &FieldView::new(2, 1, &a)).unwrap();
        recorder.on_snapshot(5, &FieldView::new(2, 1, &b)).unwrap();
        let steps: Vec<Step> = recorder.frames().iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![0, 5]);
        assert_eq!(recorder.last().unwrap().values, vec![0.5, 0.5]);
    }

    #[test]
    fn frame_directory_writes_and_clears() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("sim_52").join("step_99.json");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, "{}").unwrap();

        let mut frames = FrameDirectory::open(root.path(), 52).unwrap();
        assert!(!stale.exists());

        let values = [0.0, 1.0, 2.0, 3.0];
        frames.on_snapshot(4, &FieldView::new(2, 2, &values)).unwrap();
        assert_eq!(frames.frames_written(), 1);

        let frame = read_frame(frames.frame_path(4)).unwrap();
        assert_eq!(frame.step, 4);
        assert_eq!(frame.values, values.to_vec());
        assert_eq!(frame.stats().total, 6.0);
    }

    #[test]
    fn read_frame_rejects_bad_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"step":1,"width":2,"height":2,"values":[1.0]}"#).unwrap();
        assert!(matches!(read_frame(&path), Err(ExportError::Rejected(_))));
    }
}
