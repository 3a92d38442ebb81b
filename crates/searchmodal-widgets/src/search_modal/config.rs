#![forbid(unsafe_code)]

//! Search modal configuration.
//!
//! Every field has a default, so a partial TOML/JSON document is enough.
//!
//! # Example (TOML)
//!
//! ```toml
//! icon_ref = "/images/icons/lit-search.svg#icon"
//! trigger_label = "Site search"
//! scroll_lock_overflow = "hidden"
//! open = false
//! ```

#[cfg(feature = "config")]
use std::path::Path;

/// Icon shown by the trigger button when none is configured.
pub const DEFAULT_ICON_REF: &str = "/images/icons/lit-search.svg#icon";

/// Accessible name of the trigger button.
pub const DEFAULT_TRIGGER_LABEL: &str = "Site search";

/// `overflow` value applied to the body while the modal is open.
pub const DEFAULT_SCROLL_LOCK_OVERFLOW: &str = "hidden";

/// Configuration for one [`SearchModal`](super::SearchModal).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SearchModalConfig {
    /// Icon reference; also the value restored when the icon attribute is
    /// removed.
    pub icon_ref: String,
    /// `aria-label` and `title` of the trigger button.
    pub trigger_label: String,
    /// Inline `overflow` value used as the scroll lock.
    pub scroll_lock_overflow: String,
    /// Initial `open` value. Presented on first attach.
    pub open: bool,
}

impl Default for SearchModalConfig {
    fn default() -> Self {
        Self {
            icon_ref: DEFAULT_ICON_REF.to_owned(),
            trigger_label: DEFAULT_TRIGGER_LABEL.to_owned(),
            scroll_lock_overflow: DEFAULT_SCROLL_LOCK_OVERFLOW.to_owned(),
            open: false,
        }
    }
}

impl SearchModalConfig {
    /// Set the icon reference.
    #[must_use]
    pub fn icon_ref(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = icon_ref.into();
        self
    }

    /// Set the trigger label.
    #[must_use]
    pub fn trigger_label(mut self, label: impl Into<String>) -> Self {
        self.trigger_label = label.into();
        self
    }

    /// Set the scroll-lock `overflow` value.
    #[must_use]
    pub fn scroll_lock_overflow(mut self, value: impl Into<String>) -> Self {
        self.scroll_lock_overflow = value.into();
        self
    }

    /// Set the initial `open` value.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ModalConfigError> {
        toml::from_str(s).map_err(ModalConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ModalConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ModalConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ModalConfigError> {
        serde_json::from_str(s).map_err(ModalConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModalConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ModalConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration.
    ///
    /// Returns a list of problems; empty means valid. The icon reference is
    /// opaque and never checked.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.trigger_label.trim().is_empty() {
            errors.push("trigger_label must not be empty".into());
        }
        if self.scroll_lock_overflow.trim().is_empty() {
            errors.push("scroll_lock_overflow must not be empty".into());
        }
        errors
    }

    /// Return `self` if valid, otherwise a [`ModalConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ModalConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ModalConfigError::Validation(errors))
        }
    }
}

/// Errors from loading or validating a [`SearchModalConfig`].
#[derive(Debug)]
pub enum ModalConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ModalConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ModalConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_values() {
        let config = SearchModalConfig::default();
        assert_eq!(config.icon_ref, "/images/icons/lit-search.svg#icon");
        assert_eq!(config.trigger_label, "Site search");
        assert_eq!(config.scroll_lock_overflow, "hidden");
        assert!(!config.open);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn builder_setters_chain() {
        let config = SearchModalConfig::default()
            .icon_ref("/custom.svg#i")
            .trigger_label("Search docs")
            .scroll_lock_overflow("clip")
            .open(true);
        assert_eq!(config.icon_ref, "/custom.svg#i");
        assert_eq!(config.trigger_label, "Search docs");
        assert_eq!(config.scroll_lock_overflow, "clip");
        assert!(config.open);
    }

    #[test]
    fn empty_values_fail_validation() {
        let config = SearchModalConfig::default()
            .trigger_label("  ")
            .scroll_lock_overflow("");
        let errors = config.validate();
        assert_eq!(errors.len(), 2);

        let err = config.validated().unwrap_err();
        assert!(matches!(err, ModalConfigError::Validation(ref e) if e.len() == 2));
        assert!(err.to_string().starts_with("validation errors: trigger_label"));
    }

    #[test]
    fn empty_icon_ref_is_accepted() {
        assert!(SearchModalConfig::default().icon_ref("").validate().is_empty());
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_fills_defaults() {
        let config = SearchModalConfig::from_toml_str("open = true\n").unwrap();
        assert!(config.open);
        assert_eq!(config.icon_ref, DEFAULT_ICON_REF);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip_keeps_fields() {
        let config = SearchModalConfig::default().trigger_label("Find");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SearchModalConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_json_reports_parse_error() {
        let err = SearchModalConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ModalConfigError::Json(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_reports_io_error() {
        let err = SearchModalConfig::from_toml_file("/nonexistent/searchmodal.toml").unwrap_err();
        assert!(matches!(err, ModalConfigError::Io(_)));
    }
}
