use super::*;

use std::{sync::Arc, time::Duration};

use shared::domain::{Emotion, LessonMode, Route};
use storage::MemoryStore;

use crate::{views::classroom::CAPTION_TEXT, AppContext, ClientSettings, BREAK_PROMPT};

fn context() -> AppContext {
    AppContext::with_storage(ClientSettings::default(), Arc::new(MemoryStore::default()))
}

#[test]
fn dashboard_redirects_when_signed_out_at_mount() {
    let app = context();
    let dashboard = app.mount_dashboard();

    let state = dashboard.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.redirect, Some(Route::SignUp));
    assert_eq!(dashboard.take_redirect(), Some(Route::SignUp));
    assert_eq!(dashboard.take_redirect(), None);
}

#[test]
fn dashboard_follows_login_and_logout() {
    let app = context();
    let dashboard = app.mount_dashboard();

    app.session().login();
    let state = dashboard.state();
    assert!(state.is_authenticated);
    assert_eq!(state.redirect, None);
    assert_eq!(state.updates, 1);

    app.session().logout();
    let state = dashboard.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.redirect, Some(Route::SignUp));
    assert_eq!(state.updates, 2);
}

#[test]
fn dashboard_logout_clears_flag_and_redirects() {
    let app = context();
    app.session().login();
    let dashboard = app.mount_dashboard();
    assert_eq!(dashboard.take_redirect(), None);

    dashboard.logout();
    assert!(!app.session().is_authenticated());
    assert!(!dashboard.state().is_authenticated);
    assert_eq!(dashboard.take_redirect(), Some(Route::SignUp));
}

#[test]
fn classroom_font_pill_steps_shared_scale() {
    let app = context();
    let classroom = app.mount_classroom();
    let bar = app.mount_toggle_bar();

    assert_eq!(classroom.increase_font().percent(), 110);
    assert_eq!(bar.toggles().font_scale().percent(), 110);
    assert_eq!(app.document().directives().font_size, "110%");
}

#[test]
fn unmounted_dashboard_stops_reacting() {
    let app = context();
    let mut dashboard = app.mount_dashboard();
    assert_eq!(app.session().listener_count(), 1);

    dashboard.unmount();
    assert!(!dashboard.is_mounted());
    assert_eq!(app.session().listener_count(), 0);

    app.session().login();
    assert!(!dashboard.state().is_authenticated);
    assert_eq!(dashboard.state().updates, 0);
}

#[test]
fn dropping_dashboard_releases_subscription() {
    let app = context();
    {
        let _dashboard = app.mount_dashboard();
        assert_eq!(app.session().listener_count(), 1);
    }
    assert_eq!(app.session().listener_count(), 0);
}

#[test]
fn sign_up_then_dashboard_sees_signed_in_state() {
    let app = context();
    let dashboard = app.mount_dashboard();
    let mut sign_up = app.sign_up_view();

    let route = sign_up
        .submit(&crate::SignUpForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
            confirm_password: "analytical".into(),
        })
        .expect("valid sign-up");

    assert_eq!(route, Route::Classroom);
    assert!(dashboard.state().is_authenticated);
}

#[test]
fn classroom_captions_default_on_and_show_only_in_audio_mode() {
    let app = context();
    let mut classroom = app.mount_classroom();

    assert!(classroom.toggles().captions_enabled());
    assert_eq!(classroom.caption(), None);

    classroom.set_mode(LessonMode::Audio);
    assert_eq!(classroom.caption(), Some(CAPTION_TEXT));

    classroom.toggles_mut().toggle_captions();
    assert_eq!(classroom.caption(), None);
}

#[test]
fn classroom_check_in_defaults_to_neutral() {
    let app = context();
    let mut classroom = app.mount_classroom();
    assert_eq!(classroom.emotion(), Emotion::Neutral);
    classroom.check_in(Emotion::Confused);
    assert_eq!(classroom.emotion(), Emotion::Confused);
}

#[test]
fn toggle_bar_and_classroom_see_the_same_contrast() {
    let app = context();
    let bar = app.mount_toggle_bar();
    let classroom = app.mount_classroom();

    assert!(!bar.toggles().captions_enabled());
    bar.toggles().set_high_contrast(true);
    assert!(classroom.toggles().high_contrast());
    assert_eq!(app.document().directives().classes, vec!["high-contrast"]);
}

#[test]
fn toggle_bar_reports_slider_bounds() {
    let app = context();
    let mut bar = app.mount_toggle_bar();

    assert!(bar.toggle_panel());
    for _ in 0..10 {
        bar.increase_font();
    }
    assert!(!bar.can_increase_font());
    assert!(bar.can_decrease_font());
    assert_eq!(bar.font_fill_ratio(), 1.0);

    bar.reset();
    assert_eq!(app.document().directives().font_size, "100%");
    assert!(bar.is_open());
    bar.close();
    assert!(!bar.is_open());
}

#[tokio::test(start_paused = true)]
async fn classroom_break_timer_counts_down_and_stops_on_unmount() {
    let app = AppContext::with_storage(
        ClientSettings {
            break_timer_seconds: 3,
            ..ClientSettings::default()
        },
        Arc::new(MemoryStore::default()),
    );
    let mut classroom = app.mount_classroom();
    let watch = classroom.break_timer().watch();

    classroom.start_break().expect("start");
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(classroom.break_timer().remaining(), 2);

    classroom.pause_break();
    classroom.reset_break();
    assert_eq!(classroom.break_timer().remaining(), 3);

    classroom.start_break().expect("restart");
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(classroom.break_timer().prompt(), Some(BREAK_PROMPT));

    classroom.reset_break();
    classroom.start_break().expect("start again");
    classroom.unmount();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(*watch.borrow(), 3);
}
