use crate::domain::{FontScale, LessonMode, Marker, Route, ScaleDirection};
use crate::error::{FieldError, SignUpField, ValidationError};
use crate::events::SessionEvent;

#[test]
fn font_scale_rejects_values_off_the_grid() {
    assert!(FontScale::new(100).is_some());
    assert!(FontScale::new(80).is_some());
    assert!(FontScale::new(150).is_some());
    assert!(FontScale::new(70).is_none());
    assert!(FontScale::new(160).is_none());
    assert!(FontScale::new(105).is_none());
}

#[test]
fn font_scale_steps_by_ten_and_saturates() {
    let mut scale = FontScale::default();
    for _ in 0..20 {
        let next = scale.step(ScaleDirection::Increase);
        assert!(next.percent() <= FontScale::MAX);
        assert!(next.percent() == scale.percent() + 10 || next.percent() == FontScale::MAX);
        scale = next;
    }
    assert_eq!(scale.percent(), 150);
    assert!(!scale.can_increase());

    for _ in 0..20 {
        scale = scale.step(ScaleDirection::Decrease);
        assert!(scale.percent() >= FontScale::MIN);
    }
    assert_eq!(scale.percent(), 80);
    assert!(!scale.can_decrease());
}

#[test]
fn font_scale_fill_ratio_spans_the_domain() {
    assert_eq!(FontScale::new(80).expect("min").fill_ratio(), 0.0);
    assert_eq!(FontScale::new(150).expect("max").fill_ratio(), 1.0);
    let mid = FontScale::default().fill_ratio();
    assert!(mid > 0.28 && mid < 0.29, "ratio was {mid}");
}

#[test]
fn font_scale_deserialization_enforces_domain() {
    let scale: FontScale = serde_json::from_str("120").expect("valid scale");
    assert_eq!(scale.percent(), 120);
    assert!(serde_json::from_str::<FontScale>("125").is_err());
    assert_eq!(scale.to_string(), "120%");
}

#[test]
fn markers_map_to_document_class_names() {
    assert_eq!(Marker::HighContrast.class_name(), "high-contrast");
    assert_eq!(Marker::DyslexiaFont.class_name(), "dyslexia-font");
}

#[test]
fn routes_render_as_paths() {
    assert_eq!(Route::Classroom.to_string(), "/classroom");
    assert_eq!(Route::SignUp.path(), "/signup");
}

#[test]
fn lesson_mode_uses_short_wire_names() {
    assert_eq!(
        serde_json::to_string(&LessonMode::ThreeD).expect("serialize"),
        "\"3d\""
    );
    assert_eq!(LessonMode::default(), LessonMode::Text);
}

#[test]
fn session_event_serializes_with_tagged_payload() {
    let event = SessionEvent::AuthChanged {
        is_authenticated: true,
    };
    let json = serde_json::to_value(event).expect("serialize");
    assert_eq!(json["type"], "auth_changed");
    assert_eq!(json["payload"]["is_authenticated"], true);
}

#[test]
fn validation_error_reports_each_field() {
    let err = ValidationError::new(vec![
        FieldError::new(SignUpField::Name, "Name must be at least 2 characters"),
        FieldError::new(SignUpField::ConfirmPassword, "Passwords do not match"),
    ]);
    assert_eq!(
        err.message_for(SignUpField::ConfirmPassword),
        Some("Passwords do not match")
    );
    assert_eq!(err.message_for(SignUpField::Email), None);
    assert!(err.to_string().starts_with("2 invalid field(s)"));
}
