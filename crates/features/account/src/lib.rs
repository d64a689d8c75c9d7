//! Account settings: profile edits and password changes for the signed-in user.
//!
//! Validation failures come back as [`AccountError::Validation`] whose display text is the
//! notification shown to the user. Nothing is retried.

mod error;
mod forms;
mod service;

pub use crate::error::{AccountError, AccountErrorExt};
pub use crate::forms::{MAX_NAME_CHARS, MIN_PASSWORD_CHARS, PasswordChange, ProfileUpdate};
pub use crate::service::AccountService;
