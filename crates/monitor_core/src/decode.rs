use serde_json::Value;

use crate::{ProgressUpdate, HEARTBEAT_ACK};

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Heartbeat acknowledgment; carries no data.
    Pong,
    Progress(ProgressUpdate),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {message}")]
    Syntax { message: String },
    #[error("frame is JSON but not an object")]
    NotAnObject,
    #[error("progress document has an invalid field: {message}")]
    InvalidField { message: String },
}

/// Decode one inbound text frame: literal `pong`, or a JSON progress document.
pub fn decode_frame(text: &str) -> Result<Frame, DecodeError> {
    if text == HEARTBEAT_ACK {
        return Ok(Frame::Pong);
    }

    let value: Value = serde_json::from_str(text).map_err(|err| DecodeError::Syntax {
        message: err.to_string(),
    })?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    serde_json::from_value(value)
        .map(Frame::Progress)
        .map_err(|err| DecodeError::InvalidField {
            message: err.to_string(),
        })
}
