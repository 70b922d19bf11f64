use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::ViewId;
use storage::{KeyValueStore, UnavailableStore};
use tracing::{info, warn};

use crate::{
    presentation::{DocumentRoot, PresentationStore},
    session::SessionFlagStore,
    settings::ClientSettings,
    signup::SignUpView,
    views::{
        classroom::CLASSROOM_CAPTIONS_DEFAULT, toggle_bar::TOGGLE_BAR_CAPTIONS_DEFAULT,
        AccessibilityToggleBar, ClassroomView, DashboardView,
    },
};

/// Process-wide owner of the session and presentation stores.
///
/// Built once at start-up; [`AppContext::shutdown`] releases every listener
/// still registered on either store.
pub struct AppContext {
    settings: ClientSettings,
    session: Arc<SessionFlagStore>,
    presentation: Arc<PresentationStore>,
    document: Arc<DocumentRoot>,
    shut_down: AtomicBool,
}

impl AppContext {
    /// Opens storage from `settings`. A storage location that cannot be opened
    /// leaves the session flag in-process only.
    pub fn new(settings: ClientSettings) -> Self {
        let storage: Arc<dyn KeyValueStore> =
            match storage::open(&settings.storage_location, &settings.origin) {
                Ok(storage) => storage,
                Err(err) => {
                    warn!(
                        error = %err,
                        location = %settings.storage_location,
                        "storage unavailable; session flag will not persist"
                    );
                    Arc::new(UnavailableStore::new(err.to_string()))
                }
            };
        Self::with_storage(settings, storage)
    }

    pub fn with_storage(settings: ClientSettings, storage: Arc<dyn KeyValueStore>) -> Self {
        let document = Arc::new(DocumentRoot::new());
        let presentation = Arc::new(PresentationStore::new(document.clone()));
        info!(origin = %settings.origin, "app context started");
        Self {
            settings,
            session: Arc::new(SessionFlagStore::new(storage)),
            presentation,
            document,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn session(&self) -> &Arc<SessionFlagStore> {
        &self.session
    }

    pub fn presentation(&self) -> &Arc<PresentationStore> {
        &self.presentation
    }

    pub fn document(&self) -> &Arc<DocumentRoot> {
        &self.document
    }

    pub fn sign_up_view(&self) -> SignUpView {
        SignUpView::new(Arc::clone(&self.session))
    }

    pub fn mount_dashboard(&self) -> DashboardView {
        DashboardView::mount(&self.session)
    }

    pub fn mount_classroom(&self) -> ClassroomView {
        let toggles = self
            .presentation
            .controller(ViewId::new(), CLASSROOM_CAPTIONS_DEFAULT);
        ClassroomView::new(toggles, self.settings.break_timer_seconds)
    }

    pub fn mount_toggle_bar(&self) -> AccessibilityToggleBar {
        let toggles = self
            .presentation
            .controller(ViewId::new(), TOGGLE_BAR_CAPTIONS_DEFAULT);
        AccessibilityToggleBar::new(toggles)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Returns how many listener registrations were released.
    pub fn shutdown(&self) -> usize {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return 0;
        }
        let released = self.session.release_all() + self.presentation.release_all();
        info!(released, "app context shut down");
        released
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
