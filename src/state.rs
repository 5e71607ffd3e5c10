use std::path::PathBuf;

use eframe::egui::ColorImage;

use crate::data::model::{LatencyChart, LatencyFile};
use crate::snapshot;

// ---------------------------------------------------------------------------
// Opt-in PNG snapshot progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Saving was not requested on the command line.
    Disabled,
    /// Waiting for a fully laid-out frame to capture.
    Pending,
    /// Screenshot command sent to the viewport.
    Requested,
    Saved(PathBuf),
    Failed,
}

// ---------------------------------------------------------------------------
// Chart window state
// ---------------------------------------------------------------------------

/// State of one chart window, independent of rendering.
pub struct ChartState {
    pub file: LatencyFile,
    pub chart: LatencyChart,

    /// 1-based position of this file in the run.
    pub position: usize,
    pub total: usize,

    pub snapshot: Snapshot,

    /// Frames painted so far; used to delay the snapshot past the first layout pass.
    pub frames: u64,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl ChartState {
    pub fn new(
        file: LatencyFile,
        chart: LatencyChart,
        position: usize,
        total: usize,
        save_png: bool,
    ) -> Self {
        Self {
            file,
            chart,
            position,
            total,
            snapshot: if save_png {
                Snapshot::Pending
            } else {
                Snapshot::Disabled
            },
            frames: 0,
            status_message: None,
        }
    }

    /// Whether a screenshot should be requested this frame.
    pub fn wants_snapshot(&self) -> bool {
        self.snapshot == Snapshot::Pending && self.frames >= 1
    }

    /// Store a captured frame as this chart's PNG.  Failures are reported in
    /// the top bar and the log; the window stays open.
    pub fn store_snapshot(&mut self, frame: &ColorImage) {
        let path = self.file.image_path();
        match snapshot::save_png(&path, frame) {
            Ok(()) => {
                self.status_message = Some(format!("Saved: {}", path.display()));
                self.snapshot = Snapshot::Saved(path);
            }
            Err(e) => {
                log::error!("Failed to save chart: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
                self.snapshot = Snapshot::Failed;
            }
        }
    }
}
