//! Navigation policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page size used when neither an explicit size nor a viewport is known.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default idle time after which the typeahead buffer starts over.
pub const DEFAULT_TYPEAHEAD_TIMEOUT_MS: u64 = 500;

/// Which arrow keys move the active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Up/Down.
    #[default]
    Vertical,
    /// Left/Right, mirrored under right-to-left text.
    Horizontal,
    /// All four arrows.
    Both,
}

/// Text direction, used to mirror Left/Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Keyboard navigation policy for an active-item tracker.
///
/// Every flag defaults to disabled.
///
/// # Example
///
/// ```
/// use itemnav::{NavConfig, Orientation};
///
/// let config = NavConfig::new()
///     .with_orientation(Orientation::Horizontal)
///     .with_wrap(true)
///     .with_home_and_end(true);
/// assert!(config.wrap);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub orientation: Orientation,
    pub direction: TextDirection,
    /// Moving past either end continues from the other end.
    pub wrap: bool,
    /// Home/End jump to the first/last reachable item.
    pub home_and_end: bool,
    /// PageUp/PageDown move by a page.
    pub page_up_and_down: bool,
    /// Items per page. When unset the viewport size reported by the host is
    /// used, then [`DEFAULT_PAGE_SIZE`].
    pub page_size: Option<usize>,
    /// Printable keys search item labels.
    pub typeahead: bool,
    pub typeahead_timeout_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            direction: TextDirection::Ltr,
            wrap: false,
            home_and_end: false,
            page_up_and_down: false,
            page_size: None,
            typeahead: false,
            typeahead_timeout_ms: DEFAULT_TYPEAHEAD_TIMEOUT_MS,
        }
    }
}

impl NavConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_home_and_end(mut self, enabled: bool) -> Self {
        self.home_and_end = enabled;
        self
    }

    pub fn with_page_up_and_down(mut self, enabled: bool) -> Self {
        self.page_up_and_down = enabled;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_typeahead(mut self, enabled: bool) -> Self {
        self.typeahead = enabled;
        self
    }

    pub fn with_typeahead_timeout(mut self, timeout: Duration) -> Self {
        self.typeahead_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Idle time after which typed characters start a new query.
    pub fn typeahead_timeout(&self) -> Duration {
        Duration::from_millis(self.typeahead_timeout_ms)
    }

    /// Parse and validate a JSON policy. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NavConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make navigation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == Some(0) {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.typeahead_timeout_ms == 0 {
            return Err(ConfigError::InvalidTypeaheadTimeout);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Widget presets
    // -------------------------------------------------------------------------

    pub fn listbox() -> Self {
        Self::new()
            .with_home_and_end(true)
            .with_page_up_and_down(true)
            .with_typeahead(true)
    }

    pub fn menu() -> Self {
        Self::new()
            .with_wrap(true)
            .with_home_and_end(true)
            .with_typeahead(true)
    }

    /// Options list of a select/autocomplete popup.
    pub fn select() -> Self {
        Self::listbox().with_wrap(true)
    }

    pub fn tabs() -> Self {
        Self::new()
            .with_orientation(Orientation::Horizontal)
            .with_wrap(true)
            .with_home_and_end(true)
    }

    pub fn radio_group() -> Self {
        Self::new()
            .with_orientation(Orientation::Both)
            .with_wrap(true)
    }

    pub fn nav_bar() -> Self {
        Self::tabs()
    }

    pub fn nav_rail() -> Self {
        Self::tabs().with_orientation(Orientation::Vertical)
    }

    pub fn table_of_contents() -> Self {
        Self::new().with_home_and_end(true)
    }

    pub fn fab_menu() -> Self {
        Self::new().with_wrap(true).with_home_and_end(true)
    }
}
