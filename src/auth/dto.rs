use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{error::FieldError, users::dto::PublicUser};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after login or register.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn bearer(access_token: String, user: PublicUser) -> Self {
        Self {
            access_token,
            token_type: "bearer".into(),
            user,
        }
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn email_errors(email: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_email(email) {
        errors.push(FieldError::new(
            "body → email",
            "value is not a valid email address",
        ));
    }
}

impl RegisterRequest {
    /// Normalizes the email and returns every field problem at once.
    pub fn validate(&mut self) -> Result<(), Vec<FieldError>> {
        self.email = normalize_email(&self.email);
        self.name = self.name.trim().to_string();

        let mut errors = Vec::new();
        email_errors(&self.email, &mut errors);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "body → password",
                format!("password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if self.name.is_empty() {
            errors.push(FieldError::new("body → name", "name must not be empty"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl LoginRequest {
    pub fn validate(&mut self) -> Result<(), Vec<FieldError>> {
        self.email = normalize_email(&self.email);
        let mut errors = Vec::new();
        email_errors(&self.email, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
