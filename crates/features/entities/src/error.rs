use evhub_backend::BackendError;
use std::borrow::Cow;

#[evhub_derive::evhub_error]
pub enum EntityError {
    #[error("Backend call failed{}: {source}", format_context(.context))]
    Backend { source: BackendError, context: Option<Cow<'static, str>> },

    /// A record did not match the expected entity shape.
    #[error("Entity decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
