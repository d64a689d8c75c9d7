use evhub_entities::EntityError;
use std::borrow::Cow;

#[evhub_derive::evhub_error]
pub enum DashboardError {
    #[error("Dashboard data unavailable{}: {source}", format_context(.context))]
    Entity { source: EntityError, context: Option<Cow<'static, str>> },
}
