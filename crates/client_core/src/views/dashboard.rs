use std::sync::{Arc, Mutex, PoisonError};

use shared::domain::{Route, ViewId};
use tracing::debug;

use crate::{bus::Subscription, session::SessionFlagStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardState {
    pub is_authenticated: bool,
    pub redirect: Option<Route>,
    pub updates: u32,
}

impl DashboardState {
    fn apply(&mut self, is_authenticated: bool) {
        self.is_authenticated = is_authenticated;
        self.redirect = (!is_authenticated).then_some(Route::SignUp);
    }
}

/// Signed-in landing view. Falls back to the sign-up route whenever the
/// session flag is cleared.
pub struct DashboardView {
    id: ViewId,
    session: Arc<SessionFlagStore>,
    state: Arc<Mutex<DashboardState>>,
    subscription: Option<Subscription>,
}

impl DashboardView {
    pub fn mount(session: &Arc<SessionFlagStore>) -> Self {
        let id = ViewId::new();
        let mut initial = DashboardState::default();
        initial.apply(session.is_authenticated());
        let state = Arc::new(Mutex::new(initial));

        let shared = Arc::clone(&state);
        let subscription = session.subscribe(move |is_authenticated| {
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            state.apply(is_authenticated);
            state.updates += 1;
            debug!(view = %id, is_authenticated, "dashboard saw session change");
        });

        debug!(view = %id, authenticated = initial.is_authenticated, "dashboard mounted");
        Self {
            id,
            session: Arc::clone(session),
            state,
            subscription: Some(subscription),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn state(&self) -> DashboardState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Returns the pending redirect, if any, and clears it.
    pub fn take_redirect(&self) -> Option<Route> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .redirect
            .take()
    }

    /// Header and sidebar logout action.
    pub fn logout(&self) {
        debug!(view = %self.id, "dashboard logout");
        self.session.logout();
    }

    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!(view = %self.id, "dashboard unmounted");
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.unmount();
    }
}
