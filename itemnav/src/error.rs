//! Error types
//!
//! Navigation and selection operations never fail; these errors only come
//! from explicit validation requests.

/// Errors from loading or validating a [`NavConfig`](crate::NavConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An explicit page size of zero was configured.
    #[error("Invalid page size: must be at least 1")]
    InvalidPageSize,

    /// A typeahead timeout of zero was configured.
    #[error("Invalid typeahead timeout: must be at least 1ms")]
    InvalidTypeaheadTimeout,
}

/// Errors from strict registry replacement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same handle appears more than once in the new sequence.
    #[error("Duplicate item handle at index {index}")]
    DuplicateItem { index: usize },
}
