//! Remote entity names, as the backend spells them in its URLs.

pub const EVENT: &str = "Event";
pub const RSVP: &str = "RSVP";
pub const MEDIA: &str = "Media";
pub const SYSTEM_SETTINGS: &str = "SystemSettings";
pub const FEATURE: &str = "Feature";
pub const PACKAGE: &str = "Package";
pub const PACKAGE_FEATURE: &str = "PackageFeature";
pub const USER: &str = "User";

/// Plan slug assumed for users without a `subscription_plan`.
pub const DEFAULT_PLAN_SLUG: &str = "starter";
