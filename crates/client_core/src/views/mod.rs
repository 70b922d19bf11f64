//! View-level collaborators of the session and presentation stores.
//!
//! Each view is mounted from an [`crate::AppContext`] and owns the resources it
//! acquired there (subscriptions, timers). Unmounting, explicitly or by drop,
//! releases them.

pub mod classroom;
pub mod dashboard;
pub mod toggle_bar;

pub use classroom::ClassroomView;
pub use dashboard::{DashboardState, DashboardView};
pub use toggle_bar::AccessibilityToggleBar;

#[cfg(test)]
#[path = "../tests/views_tests.rs"]
mod tests;
