use evhub_entities::EntityError;
use std::borrow::Cow;

#[evhub_derive::evhub_error]
pub enum AccountError {
    /// Form input rejected before any request; `message` is meant for the user.
    #[error("{message}{}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Account request failed{}: {source}", format_context(.context))]
    Entity { source: EntityError, context: Option<Cow<'static, str>> },
}

impl AccountError {
    pub(crate) const fn validation(message: &'static str) -> Self {
        Self::Validation { message: Cow::Borrowed(message), context: None }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
