//! Sign-up form handling.
//!
//! There is no credential check: any well-formed submission signs the user in.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use shared::{
    domain::Route,
    error::{FieldError, SignUpField, ValidationError},
};
use tracing::{debug, info};

use crate::session::SessionFlagStore;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Field rules are checked first; the password match is only reported once
    /// every field is individually valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::new(
                SignUpField::Name,
                "Name must be at least 2 characters",
            ));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new(
                SignUpField::Email,
                "Please enter a valid email address",
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError::new(
                SignUpField::Password,
                "Password must be at least 8 characters",
            ));
        }
        if self.confirm_password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError::new(
                SignUpField::ConfirmPassword,
                "Please confirm your password",
            ));
        }

        if errors.is_empty() && self.password != self.confirm_password {
            errors.push(FieldError::new(
                SignUpField::ConfirmPassword,
                "Passwords do not match",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        )
        .expect("valid email regex")
    });
    regex.is_match(email)
}

pub struct SignUpView {
    session: Arc<SessionFlagStore>,
    show_password: bool,
    show_confirm: bool,
    last_error: Option<ValidationError>,
}

impl SignUpView {
    pub fn new(session: Arc<SessionFlagStore>) -> Self {
        Self {
            session,
            show_password: false,
            show_confirm: false,
            last_error: None,
        }
    }

    /// On success the session flag is set and the caller should navigate to
    /// the returned route.
    pub fn submit(&mut self, form: &SignUpForm) -> Result<Route, ValidationError> {
        if let Err(err) = form.validate() {
            debug!(invalid_fields = err.errors.len(), "sign-up rejected");
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.last_error = None;
        self.session.login();
        info!(route = %Route::Classroom, "sign-up accepted");
        Ok(Route::Classroom)
    }

    pub fn error_for(&self, field: SignUpField) -> Option<&str> {
        self.last_error
            .as_ref()
            .and_then(|err| err.message_for(field))
    }

    pub fn toggle_show_password(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    pub fn toggle_show_confirm(&mut self) -> bool {
        self.show_confirm = !self.show_confirm;
        self.show_confirm
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn show_confirm(&self) -> bool {
        self.show_confirm
    }
}

#[cfg(test)]
#[path = "tests/signup_tests.rs"]
mod tests;
