use monitor_core::{decode_frame, DecodeError, Frame, ProgressUpdate, Stage};

#[test]
fn pong_is_a_control_frame() {
    assert_eq!(decode_frame("pong"), Ok(Frame::Pong));
}

#[test]
fn only_exact_pong_is_control() {
    assert!(matches!(
        decode_frame("pong "),
        Err(DecodeError::Syntax { .. })
    ));
    assert!(matches!(
        decode_frame(r#""pong""#),
        Err(DecodeError::NotAnObject)
    ));
}

#[test]
fn empty_object_is_an_empty_update() {
    assert_eq!(
        decode_frame("{}"),
        Ok(Frame::Progress(ProgressUpdate::default()))
    );
}

#[test]
fn unknown_fields_are_ignored() {
    let frame = decode_frame(r#"{"stage":"complete","worker":"gpu-0","extra":[1,2]}"#).unwrap();
    let Frame::Progress(update) = frame else {
        panic!("expected progress frame");
    };
    assert_eq!(update.stage, Some(Stage::Complete));
    assert_eq!(update.video_index, None);
}

#[test]
fn non_objects_are_rejected() {
    for text in ["42", "[]", "null", r#""text""#] {
        assert_eq!(decode_frame(text), Err(DecodeError::NotAnObject), "{text}");
    }
}

#[test]
fn wrong_field_types_are_rejected() {
    assert!(matches!(
        decode_frame(r#"{"video_index":"three"}"#),
        Err(DecodeError::InvalidField { .. })
    ));
    assert!(matches!(
        decode_frame(r#"{"stage":"sleeping"}"#),
        Err(DecodeError::InvalidField { .. })
    ));
}
