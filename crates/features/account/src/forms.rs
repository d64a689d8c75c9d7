use crate::error::AccountError;
use serde::Serialize;

pub const MAX_NAME_CHARS: usize = 100;
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Editable profile fields, sent as a partial user update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    /// `Some("")` clears the stored number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self { full_name: full_name.into(), ..Self::default() }
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Checks the form and returns the trimmed values to submit.
    ///
    /// # Errors
    /// [`AccountError::Validation`] for an empty or overlong name, or a phone number with
    /// characters other than digits, spaces and `+-()`.
    pub fn validate(&self) -> Result<Self, AccountError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(AccountError::validation("Full name is required"));
        }
        if full_name.chars().count() > MAX_NAME_CHARS {
            return Err(AccountError::validation("Full name must be at most 100 characters"));
        }

        let phone = self.phone.as_deref().map(str::trim);
        if let Some(phone) = phone.filter(|p| !p.is_empty()) {
            let allowed = phone.chars().all(|c| c.is_ascii_digit() || " +-()".contains(c));
            if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
                return Err(AccountError::validation(
                    "Phone number may only contain digits, spaces and + - ( )",
                ));
            }
        }

        Ok(Self {
            full_name: full_name.to_owned(),
            phone: phone.map(str::to_owned),
            company: self.company.as_deref().map(|c| c.trim().to_owned()),
        })
    }
}

/// Password change form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

impl PasswordChange {
    #[must_use]
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// # Errors
    /// [`AccountError::Validation`], checked in order: current password missing, new password
    /// shorter than 8 characters, confirmation mismatch, new password equal to the current one.
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.current_password.is_empty() {
            return Err(AccountError::validation("Current password is required"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AccountError::validation("New password must be at least 8 characters"));
        }
        if self.new_password != self.confirm_password {
            return Err(AccountError::validation("New passwords do not match"));
        }
        if self.new_password == self.current_password {
            return Err(AccountError::validation(
                "New password must be different from the current one",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AccountError) -> String {
        assert!(err.is_validation());
        err.to_string()
    }

    #[test]
    fn profile_is_trimmed() {
        let form = ProfileUpdate::new("  Dana Host ").phone(" +1 (555) 010-0199 ").company(" Acme ");
        let valid = form.validate().unwrap();
        assert_eq!(valid.full_name, "Dana Host");
        assert_eq!(valid.phone.as_deref(), Some("+1 (555) 010-0199"));
        assert_eq!(valid.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn profile_name_rules() {
        assert_eq!(message(ProfileUpdate::new("   ").validate().unwrap_err()), "Full name is required");
        assert!(ProfileUpdate::new("é".repeat(100)).validate().is_ok());
        assert!(ProfileUpdate::new("a".repeat(101)).validate().is_err());
    }

    #[test]
    fn profile_phone_rules() {
        assert!(ProfileUpdate::new("Dana").phone("").validate().is_ok());
        assert!(ProfileUpdate::new("Dana").phone("555-0100 ext. 4").validate().is_err());
        assert!(ProfileUpdate::new("Dana").phone("+()-").validate().is_err());
    }

    #[test]
    fn password_rules_in_order() {
        let cases = [
            (PasswordChange::new("", "longenough", "longenough"), "Current password is required"),
            (PasswordChange::new("old", "short", "short"), "New password must be at least 8 characters"),
            (PasswordChange::new("old", "longenough", "longenougH"), "New passwords do not match"),
            (
                PasswordChange::new("longenough", "longenough", "longenough"),
                "New password must be different from the current one",
            ),
        ];
        for (form, expected) in cases {
            assert_eq!(message(form.validate().unwrap_err()), expected);
        }
        assert!(PasswordChange::new("old-secret", "new-secret", "new-secret").validate().is_ok());
    }

    #[test]
    fn debug_hides_passwords() {
        let form = PasswordChange::new("old-secret", "new-secret", "new-secret");
        assert!(!format!("{form:?}").contains("secret"));
    }
}
