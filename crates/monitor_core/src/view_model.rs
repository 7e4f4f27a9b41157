use crate::format::format_clock;
use crate::{ProgressSnapshot, Stage, Substage};

/// Derived presentation values, recomputed from a snapshot on every read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressView {
    pub stage: Stage,
    pub substage: Substage,
    pub connected: bool,
    pub current_video: Option<String>,
    pub video_index: u32,
    pub total_videos: u32,
    pub overall_progress: f64,
    pub current_video_progress: f64,
    pub elapsed: String,
    pub remaining: Option<String>,
    pub tokens_generated: u64,
    pub tokens_per_sec: f64,
    pub model_loaded: bool,
    pub vram_used_gb: f64,
    pub error_message: Option<String>,
}

impl ProgressView {
    pub(crate) fn from_snapshot(snapshot: &ProgressSnapshot, connected: bool) -> Self {
        Self {
            stage: snapshot.stage,
            substage: snapshot.substage,
            connected,
            current_video: snapshot.current_video.clone(),
            video_index: snapshot.video_index,
            total_videos: snapshot.total_videos,
            overall_progress: snapshot.overall_progress(),
            current_video_progress: snapshot.current_video_progress(),
            elapsed: snapshot.formatted_elapsed_time(),
            remaining: snapshot.estimated_time_remaining(),
            tokens_generated: snapshot.tokens_generated,
            tokens_per_sec: snapshot.tokens_per_sec,
            model_loaded: snapshot.model_loaded,
            vram_used_gb: snapshot.vram_used_gb,
            error_message: snapshot.error_message.clone(),
        }
    }
}

impl ProgressSnapshot {
    /// Whole-job completion in percent, 0 when there is nothing to process.
    pub fn overall_progress(&self) -> f64 {
        if self.total_videos == 0 {
            return 0.0;
        }
        let done = f64::from(self.video_index) + self.substage_progress;
        (done / f64::from(self.total_videos) * 100.0).clamp(0.0, 100.0)
    }

    /// Completion of the current video in percent, clamped for display.
    pub fn current_video_progress(&self) -> f64 {
        (self.substage_progress * 100.0).clamp(0.0, 100.0)
    }

    pub fn formatted_elapsed_time(&self) -> String {
        format_clock(self.elapsed_time)
    }

    /// Average time per finished video times the videos left.
    ///
    /// `None` until at least one video finished and time has elapsed.
    pub fn estimated_time_remaining(&self) -> Option<String> {
        if self.video_index == 0 || self.elapsed_time == 0.0 {
            return None;
        }
        let per_video = self.elapsed_time / f64::from(self.video_index);
        let videos_left = f64::from(self.total_videos) - f64::from(self.video_index);
        Some(format_clock((per_video * videos_left).floor()))
    }

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn is_loading_model(&self) -> bool {
        self.stage == Stage::LoadingModel
    }

    pub fn is_processing(&self) -> bool {
        self.stage == Stage::Processing
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    pub fn has_error(&self) -> bool {
        self.stage == Stage::Error
    }
}
