//! Client-side session and accessibility state for the AbleEd front-end.
//!
//! Two stores sit at the core: [`SessionFlagStore`] owns the persisted
//! "signed in" flag and notifies listeners synchronously, and
//! [`PresentationStore`] owns the shared accessibility toggles and writes them
//! to the document as presentation directives. Views are mounted from an
//! [`AppContext`], which owns both stores for the life of the process.

pub mod app;
pub mod bus;
pub mod presentation;
pub mod session;
pub mod settings;
pub mod signup;
pub mod timer;
pub mod views;

pub use app::AppContext;
pub use bus::{EventBus, Subscription};
pub use presentation::{
    DocumentDirectives, DocumentRoot, PresentationStore, PresentationSurface, ToggleController,
};
pub use session::{SessionFlagStore, AUTH_STORAGE_KEY};
pub use settings::{load_settings, load_settings_from, ClientSettings};
pub use signup::{SignUpForm, SignUpView};
pub use timer::{BreakTimer, TimerError, BREAK_PROMPT, DEFAULT_BREAK_SECONDS};
pub use views::{AccessibilityToggleBar, ClassroomView, DashboardState, DashboardView};
