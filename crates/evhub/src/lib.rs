//! Facade crate for EventHub.
//! Re-exports the shared and feature crates and wires them over one backend in [`Platform`].
//! Keep this crate thin: it composes other crates, it does not implement business logic.

pub use evhub_account as account;
pub use evhub_backend as backend;
pub use evhub_dashboard as dashboard;
pub use evhub_domain as domain;
pub use evhub_entities as entities;
pub use evhub_kernel as kernel;
pub use evhub_plans as plans;

use evhub_account::AccountService;
use evhub_backend::{Backend, BackendError, HttpBackend};
use evhub_dashboard::Dashboard;
use evhub_domain::config::AppConfig;
use evhub_domain::{ResolvedPlan, User};
use evhub_entities::{Entities, EntityError};
use evhub_plans::PlanResolver;
use std::borrow::Cow;
use tracing::info;

#[evhub_derive::evhub_error]
pub enum PlatformError {
    #[error("Backend setup failed{}: {source}", format_context(.context))]
    Backend { source: BackendError, context: Option<Cow<'static, str>> },

    #[error("Platform request failed{}: {source}", format_context(.context))]
    Entity { source: EntityError, context: Option<Cow<'static, str>> },
}

/// Every service of the workspace, sharing one backend handle.
#[derive(Debug, Clone)]
pub struct Platform {
    config: AppConfig,
    entities: Entities,
    plans: PlanResolver,
    dashboard: Dashboard,
    account: AccountService,
}

impl Platform {
    /// Connects to the hosted backend described by `config.backend`.
    ///
    /// # Errors
    /// [`PlatformError::Backend`] when the backend settings are invalid or the startup health
    /// probe gives up.
    pub async fn connect(config: &AppConfig) -> Result<Self, PlatformError> {
        let backend = HttpBackend::builder().config(&config.backend).build().await?;
        info!(app_id = %config.backend.app_id, "Platform connected");
        Ok(Self::with_backend(config, backend))
    }

    /// Wires the services over an existing backend (e.g. the in-memory one).
    #[must_use]
    pub fn with_backend(config: &AppConfig, backend: impl Backend + 'static) -> Self {
        let entities = Entities::new(backend);
        Self {
            config: config.clone(),
            plans: PlanResolver::from_config(entities.clone(), &config.plans),
            dashboard: Dashboard::new(entities.clone()),
            account: AccountService::new(entities.clone()),
            entities,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn entities(&self) -> &Entities {
        &self.entities
    }

    #[must_use]
    pub const fn plans(&self) -> &PlanResolver {
        &self.plans
    }

    #[must_use]
    pub const fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    #[must_use]
    pub const fn account(&self) -> &AccountService {
        &self.account
    }

    /// The signed-in user.
    pub async fn current_user(&self) -> Result<User, PlatformError> {
        self.entities.auth().me().await.context("loading current user")
    }

    /// Plan of the signed-in user. Only fetching the user can fail; resolution itself falls
    /// back to the default plan.
    pub async fn current_plan(&self) -> Result<ResolvedPlan, PlatformError> {
        let user = self.current_user().await?;
        Ok(self.plans.resolve(&user).await)
    }
}
