//! Accessibility presentation preferences and the document-level directives
//! they drive.
//!
//! [`PresentationStore`] is the one process-wide owner of the shared toggles
//! (font scale, high contrast, dyslexia font). Views never hold their own copy;
//! each gets a [`ToggleController`] that writes through the store and keeps
//! only its captions preference locally.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use shared::{
    domain::{FontScale, Marker, PresentationToggles, ScaleDirection, ViewId},
    events::PresentationEvent,
};
use tracing::debug;

use crate::bus::{EventBus, Subscription};

/// The global presentation context styling rules read from.
pub trait PresentationSurface: Send + Sync {
    fn apply_font_scale(&self, scale: FontScale);
    fn set_marker(&self, marker: Marker, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDirectives {
    pub font_size: String,
    pub classes: Vec<&'static str>,
}

#[derive(Debug, Default)]
struct DocumentState {
    font_scale: FontScale,
    high_contrast: bool,
    dyslexia_font: bool,
    scale_applications: u64,
}

/// In-process document root recording the applied directives.
#[derive(Debug, Default)]
pub struct DocumentRoot {
    state: Mutex<DocumentState>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn font_scale(&self) -> FontScale {
        self.state().font_scale
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        let state = self.state();
        match marker {
            Marker::HighContrast => state.high_contrast,
            Marker::DyslexiaFont => state.dyslexia_font,
        }
    }

    /// How many times a scale directive has been written, clamped or not.
    pub fn scale_applications(&self) -> u64 {
        self.state().scale_applications
    }

    pub fn directives(&self) -> DocumentDirectives {
        let state = self.state();
        let classes = Marker::ALL
            .into_iter()
            .filter(|marker| match marker {
                Marker::HighContrast => state.high_contrast,
                Marker::DyslexiaFont => state.dyslexia_font,
            })
            .map(Marker::class_name)
            .collect();
        DocumentDirectives {
            font_size: state.font_scale.to_string(),
            classes,
        }
    }
}

impl PresentationSurface for DocumentRoot {
    fn apply_font_scale(&self, scale: FontScale) {
        let mut state = self.state();
        state.font_scale = scale;
        state.scale_applications += 1;
    }

    fn set_marker(&self, marker: Marker, enabled: bool) {
        let mut state = self.state();
        match marker {
            Marker::HighContrast => state.high_contrast = enabled,
            Marker::DyslexiaFont => state.dyslexia_font = enabled,
        }
    }
}

pub struct PresentationStore {
    toggles: Mutex<PresentationToggles>,
    surface: Arc<dyn PresentationSurface>,
    bus: EventBus<PresentationEvent>,
}

impl PresentationStore {
    pub fn new(surface: Arc<dyn PresentationSurface>) -> Self {
        Self {
            toggles: Mutex::new(PresentationToggles::default()),
            surface,
            bus: EventBus::new("presentation:change"),
        }
    }

    pub fn snapshot(&self) -> PresentationToggles {
        *self.lock_toggles()
    }

    pub fn set_font_scale(&self, direction: ScaleDirection, writer: Option<ViewId>) -> FontScale {
        let (scale, toggles) = self.mutate(|toggles, surface| {
            toggles.font_scale = toggles.font_scale.step(direction);
            surface.apply_font_scale(toggles.font_scale);
            toggles.font_scale
        });
        debug!(scale = %scale, ?direction, writer = ?writer, "font scale applied");
        self.publish_change(toggles, writer);
        scale
    }

    pub fn set_high_contrast(&self, enabled: bool, writer: Option<ViewId>) {
        self.set_marker(Marker::HighContrast, enabled, writer);
    }

    pub fn set_dyslexia_font(&self, enabled: bool, writer: Option<ViewId>) {
        self.set_marker(Marker::DyslexiaFont, enabled, writer);
    }

    /// Flips `marker` under the store lock and returns the new value.
    pub fn toggle_marker(&self, marker: Marker, writer: Option<ViewId>) -> bool {
        self.update_marker(marker, |current| !current, writer)
    }

    fn set_marker(&self, marker: Marker, enabled: bool, writer: Option<ViewId>) {
        self.update_marker(marker, |_| enabled, writer);
    }

    fn update_marker(
        &self,
        marker: Marker,
        next: impl FnOnce(bool) -> bool,
        writer: Option<ViewId>,
    ) -> bool {
        let (enabled, toggles) = self.mutate(|toggles, surface| {
            let flag = match marker {
                Marker::HighContrast => &mut toggles.high_contrast,
                Marker::DyslexiaFont => &mut toggles.dyslexia_font,
            };
            *flag = next(*flag);
            surface.set_marker(marker, *flag);
            *flag
        });
        debug!(marker = marker.class_name(), enabled, writer = ?writer, "marker applied");
        self.publish_change(toggles, writer);
        enabled
    }

    pub fn reset(&self, writer: Option<ViewId>) {
        self.mutate(|toggles, surface| {
            *toggles = PresentationToggles::default();
            surface.apply_font_scale(FontScale::DEFAULT);
            for marker in Marker::ALL {
                surface.set_marker(marker, false);
            }
        });
        debug!(writer = ?writer, "presentation reset");
        self.bus.publish(&PresentationEvent::Reset { writer });
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PresentationEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    pub(crate) fn release_all(&self) -> usize {
        self.bus.clear()
    }

    /// Hands a view its controller. `captions_default` is the view's own
    /// starting value for captions.
    pub fn controller(self: &Arc<Self>, view: ViewId, captions_default: bool) -> ToggleController {
        ToggleController {
            view,
            store: Arc::clone(self),
            captions_default,
            captions_enabled: captions_default,
        }
    }

    fn lock_toggles(&self) -> MutexGuard<'_, PresentationToggles> {
        self.toggles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// State change and directive write happen under one lock so the surface
    /// always matches the stored toggles.
    fn mutate<R>(
        &self,
        apply: impl FnOnce(&mut PresentationToggles, &dyn PresentationSurface) -> R,
    ) -> (R, PresentationToggles) {
        let mut toggles = self.lock_toggles();
        let result = apply(&mut *toggles, self.surface.as_ref());
        (result, *toggles)
    }

    fn publish_change(&self, toggles: PresentationToggles, writer: Option<ViewId>) {
        self.bus
            .publish(&PresentationEvent::TogglesChanged { toggles, writer });
    }
}

/// A view's handle onto the shared presentation toggles.
pub struct ToggleController {
    view: ViewId,
    store: Arc<PresentationStore>,
    captions_default: bool,
    captions_enabled: bool,
}

impl ToggleController {
    pub fn view_id(&self) -> ViewId {
        self.view
    }

    pub fn toggles(&self) -> PresentationToggles {
        self.store.snapshot()
    }

    pub fn font_scale(&self) -> FontScale {
        self.toggles().font_scale
    }

    pub fn high_contrast(&self) -> bool {
        self.toggles().high_contrast
    }

    pub fn dyslexia_font(&self) -> bool {
        self.toggles().dyslexia_font
    }

    pub fn captions_enabled(&self) -> bool {
        self.captions_enabled
    }

    pub fn set_font_scale(&self, direction: ScaleDirection) -> FontScale {
        self.store.set_font_scale(direction, Some(self.view))
    }

    pub fn set_high_contrast(&self, enabled: bool) {
        self.store.set_high_contrast(enabled, Some(self.view));
    }

    pub fn toggle_high_contrast(&self) -> bool {
        self.store
            .toggle_marker(Marker::HighContrast, Some(self.view))
    }

    pub fn set_dyslexia_font(&self, enabled: bool) {
        self.store.set_dyslexia_font(enabled, Some(self.view));
    }

    pub fn toggle_dyslexia_font(&self) -> bool {
        self.store
            .toggle_marker(Marker::DyslexiaFont, Some(self.view))
    }

    pub fn set_captions_enabled(&mut self, enabled: bool) {
        self.captions_enabled = enabled;
    }

    pub fn toggle_captions(&mut self) -> bool {
        self.captions_enabled = !self.captions_enabled;
        self.captions_enabled
    }

    pub fn reset(&mut self) {
        self.captions_enabled = self.captions_default;
        self.store.reset(Some(self.view));
    }
}

impl std::fmt::Debug for ToggleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleController")
            .field("view", &self.view)
            .field("toggles", &self.toggles())
            .field("captions_enabled", &self.captions_enabled)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
