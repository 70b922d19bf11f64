use shared::domain::{FontScale, ScaleDirection, ViewId};

use crate::presentation::ToggleController;

pub const TOGGLE_BAR_CAPTIONS_DEFAULT: bool = false;

/// Floating accessibility settings panel.
pub struct AccessibilityToggleBar {
    toggles: ToggleController,
    open: bool,
}

impl AccessibilityToggleBar {
    pub(crate) fn new(toggles: ToggleController) -> Self {
        Self {
            toggles,
            open: false,
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

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn increase_font(&self) -> FontScale {
        self.toggles.set_font_scale(ScaleDirection::Increase)
    }

    pub fn decrease_font(&self) -> FontScale {
        self.toggles.set_font_scale(ScaleDirection::Decrease)
    }

    pub fn can_increase_font(&self) -> bool {
        self.toggles.font_scale().can_increase()
    }

    pub fn can_decrease_font(&self) -> bool {
        self.toggles.font_scale().can_decrease()
    }

    pub fn font_fill_ratio(&self) -> f32 {
        self.toggles.font_scale().fill_ratio()
    }

    pub fn reset(&mut self) {
        self.toggles.reset();
    }
}
