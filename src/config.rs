//! Configuration for stores and sessions.
//!
//! All configuration structs use the builder pattern via `typed-builder`, and
//! every field has a default so `Config::builder().build()` is always valid.

use typed_builder::TypedBuilder;

/// Configuration for a [`RecordStore`](crate::store::RecordStore).
///
/// # Examples
///
/// ```
/// use tablebase_store::config::StoreConfig;
///
/// let config = StoreConfig::builder()
///     .initial_capacity(256)
///     .build();
/// assert!(config.warn_on_load_anomalies);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct StoreConfig {
    /// Capacity reserved for the record sequence up front
    #[builder(default = 64)]
    pub initial_capacity: usize,

    /// Log duplicate or empty keys found in loaded data
    #[builder(default = true)]
    pub warn_on_load_anomalies: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// How form input turns into a partial update.
#[derive(Debug, Clone, Copy, TypedBuilder)]
#[builder(doc)]
pub struct PatchPolicy {
    /// Leave fields whose input is blank out of the patch instead of
    /// overwriting them with an empty value
    #[builder(default = true)]
    pub skip_empty_values: bool,
}

impl Default for PatchPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Configuration for a [`TableSession`](crate::session::TableSession).
///
/// # Examples
///
/// ```
/// use tablebase_store::config::{PatchPolicy, SessionConfig};
///
/// let config = SessionConfig::builder()
///     .patch_policy(PatchPolicy::builder().skip_empty_values(false).build())
///     .build();
/// assert!(config.clear_form_on_success);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct SessionConfig {
    #[builder(default)]
    pub store: StoreConfig,

    #[builder(default)]
    pub patch_policy: PatchPolicy,

    /// Reset the bound form after a successful create, update or delete
    #[builder(default = true)]
    pub clear_form_on_success: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builder_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.store.initial_capacity, 64);
        assert!(config.patch_policy.skip_empty_values);
        assert!(config.clear_form_on_success);
    }

    #[test]
    fn builder_overrides() {
        let config = StoreConfig::builder()
            .initial_capacity(8)
            .warn_on_load_anomalies(false)
            .build();
        assert_eq!(config.initial_capacity, 8);
        assert!(!config.warn_on_load_anomalies);
    }
}
