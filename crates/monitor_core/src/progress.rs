use serde::{Deserialize, Deserializer, Serialize};

use crate::view_model::ProgressView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    LoadingModel,
    Processing,
    Complete,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substage {
    #[default]
    Idle,
    ExtractingFrames,
    Encoding,
    Generating,
}

/// Canonical progress record. Always total: every field has a value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub current_video: Option<String>,
    pub video_index: u32,
    pub total_videos: u32,
    pub substage: Substage,
    pub substage_progress: f64,
    pub elapsed_time: f64,
    pub tokens_generated: u64,
    pub tokens_per_sec: f64,
    pub model_loaded: bool,
    pub vram_used_gb: f64,
    pub error_message: Option<String>,
}

/// Partial progress document as received from the backend.
///
/// `None` means the field was absent. For the nullable fields the inner
/// `Option` carries an explicit `null`, which clears the snapshot value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_video: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_videos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substage: Option<Substage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substage_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_generated: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_per_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_loaded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vram_used_gb: Option<f64>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<Option<String>>,
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn merge<T>(slot: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = value;
    }
}

impl ProgressSnapshot {
    /// Field-by-field overwrite with whatever the update carries.
    pub fn merge(&mut self, update: ProgressUpdate) {
        merge(&mut self.stage, update.stage);
        merge(&mut self.current_video, update.current_video);
        merge(&mut self.video_index, update.video_index);
        merge(&mut self.total_videos, update.total_videos);
        merge(&mut self.substage, update.substage);
        merge(&mut self.substage_progress, update.substage_progress);
        merge(&mut self.elapsed_time, update.elapsed_time);
        merge(&mut self.tokens_generated, update.tokens_generated);
        merge(&mut self.tokens_per_sec, update.tokens_per_sec);
        merge(&mut self.model_loaded, update.model_loaded);
        merge(&mut self.vram_used_gb, update.vram_used_gb);
        merge(&mut self.error_message, update.error_message);
    }
}

/// Single source of truth for job progress and transport reachability.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressStore {
    snapshot: ProgressSnapshot,
    connected: bool,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// No range validation happens here; derived values clamp on read.
    pub fn apply_update(&mut self, update: ProgressUpdate) {
        self.snapshot.merge(update);
    }

    /// Overwrites the connectivity flag. The job stage is left alone.
    pub fn set_connectivity(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Restores the idle snapshot. Connectivity is transport state and survives.
    pub fn reset(&mut self) {
        self.snapshot = ProgressSnapshot::default();
    }

    pub fn view(&self) -> ProgressView {
        ProgressView::from_snapshot(&self.snapshot, self.connected)
    }
}
