use serde::{Deserialize, Serialize};

use crate::domain::{PresentationToggles, ViewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    AuthChanged { is_authenticated: bool },
}

impl SessionEvent {
    pub fn is_authenticated(&self) -> bool {
        match self {
            Self::AuthChanged { is_authenticated } => *is_authenticated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PresentationEvent {
    TogglesChanged {
        toggles: PresentationToggles,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        writer: Option<ViewId>,
    },
    Reset {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        writer: Option<ViewId>,
    },
}
