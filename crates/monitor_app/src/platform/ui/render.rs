//! Text rendering of the progress view. Pure: no terminal access here.

use chrono::{DateTime, Local};
use monitor_core::{
    format_decimal, format_number, format_vram, ChannelStatus, ConnectionState, ProgressView,
    Stage, Substage,
};

const BAR_WIDTH: usize = 30;

pub fn render(view: &ProgressView, status: ChannelStatus, now: DateTime<Local>) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  |  updated {}",
        connection_label(status),
        now.format("%H:%M:%S")
    )];

    lines.push(stage_line(view));

    if view.total_videos > 0 {
        let video = view.current_video.as_deref().unwrap_or("-");
        lines.push(format!(
            "Video {}/{}: {}",
            view.video_index, view.total_videos, video
        ));
        lines.push(format!(
            "Overall  {} {:>5.1}%",
            progress_bar(view.overall_progress),
            view.overall_progress
        ));
        lines.push(format!(
            "Current  {} {:>5.1}%",
            progress_bar(view.current_video_progress),
            view.current_video_progress
        ));
    }

    let remaining = view.remaining.as_deref().unwrap_or("--:--");
    lines.push(format!("Elapsed {}  Remaining {}", view.elapsed, remaining));

    if view.tokens_generated > 0 || view.tokens_per_sec > 0.0 {
        lines.push(format!(
            "Tokens {} ({} tok/s)",
            format_number(view.tokens_generated),
            format_decimal(view.tokens_per_sec, 1)
        ));
    }

    if view.model_loaded {
        lines.push(format!("Model loaded, VRAM {}", format_vram(view.vram_used_gb, 1)));
    }

    if let Some(message) = &view.error_message {
        lines.push(format!("Error: {message}"));
    }

    lines
}

fn connection_label(status: ChannelStatus) -> String {
    match status.state {
        ConnectionState::Open => "● Connected".to_string(),
        ConnectionState::Connecting if status.retrying => {
            format!("○ Reconnecting (attempt {})", status.reconnect_attempts)
        }
        ConnectionState::Connecting => "○ Connecting".to_string(),
        ConnectionState::Closed => match status.pending_reconnect {
            Some(attempt) => format!("○ Disconnected, retry {attempt} pending"),
            None => format!(
                "○ Disconnected, gave up after {} attempts; type `connect` to retry",
                status.reconnect_attempts
            ),
        },
        ConnectionState::Idle => "○ Disconnected".to_string(),
    }
}

fn stage_line(view: &ProgressView) -> String {
    match (view.stage, view.substage) {
        (stage, Substage::Idle) => stage_label(stage).to_string(),
        (stage, substage) => format!("{} ({})", stage_label(stage), substage_label(substage)),
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Idle => "Idle",
        Stage::LoadingModel => "Loading model",
        Stage::Processing => "Processing",
        Stage::Complete => "Complete",
        Stage::Error => "Error",
    }
}

fn substage_label(substage: Substage) -> &'static str {
    match substage {
        Substage::Idle => "idle",
        Substage::ExtractingFrames => "extracting frames",
        Substage::Encoding => "encoding",
        Substage::Generating => "generating",
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
