use shared::domain::{Emotion, FontScale, LessonMode, ScaleDirection, ViewId};
use tracing::debug;

use crate::{
    presentation::ToggleController,
    timer::{BreakTimer, TimerError},
};

pub const CLASSROOM_CAPTIONS_DEFAULT: bool = true;
pub const LESSON_TITLE: &str = "Science - The Human Heart";
pub const CAPTION_TEXT: &str = "The human heart pumps blood throughout the body. It has four chambers: two atria and two ventricles.";

pub struct ClassroomView {
    toggles: ToggleController,
    mode: LessonMode,
    emotion: Emotion,
    break_timer: BreakTimer,
}

impl ClassroomView {
    pub(crate) fn new(toggles: ToggleController, break_seconds: u32) -> Self {
        debug!(view = %toggles.view_id(), "classroom mounted");
        Self {
            toggles,
            mode: LessonMode::default(),
            emotion: Emotion::default(),
            break_timer: BreakTimer::new(break_seconds),
        }
    }

    pub fn id(&self) -> ViewId {
        self.toggles.view_id()
    }

    pub fn toggles(&self) -> &ToggleController {
        &self.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut ToggleController {
        &mut self.toggles
    }

    /// The "Larger Text" control in the lesson toolbar.
    pub fn increase_font(&self) -> FontScale {
        self.toggles.set_font_scale(ScaleDirection::Increase)
    }

    pub fn mode(&self) -> LessonMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LessonMode) {
        self.mode = mode;
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn check_in(&mut self, emotion: Emotion) {
        debug!(view = %self.id(), ?emotion, "emotion check-in");
        self.emotion = emotion;
    }

    /// Caption text to render next to the audio lesson, if any.
    pub fn caption(&self) -> Option<&'static str> {
        (self.mode == LessonMode::Audio && self.toggles.captions_enabled()).then_some(CAPTION_TEXT)
    }

    pub fn break_timer(&self) -> &BreakTimer {
        &self.break_timer
    }

    pub fn start_break(&mut self) -> Result<(), TimerError> {
        self.break_timer.start()
    }

    pub fn pause_break(&mut self) {
        self.break_timer.pause();
    }

    pub fn reset_break(&mut self) {
        self.break_timer.reset();
    }

    /// Tears the view down; the break timer stops with it.
    pub fn unmount(mut self) {
        self.break_timer.pause();
        debug!(view = %self.id(), "classroom unmounted");
    }
}
