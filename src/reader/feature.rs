//! XMLPULL feature names.

/// Exposes element and attribute namespaces when enabled.
pub const FEATURE_PROCESS_NAMESPACES: &str =
    "http://xmlpull.org/v1/doc/features.html#process-namespaces";

/// Lenient parsing. Accepted and stored; the grammar chosen for the input
/// decides leniency.
pub const FEATURE_RELAXED: &str = "http://xmlpull.org/v1/doc/features.html#relaxed";

/// A recognised feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// [`FEATURE_PROCESS_NAMESPACES`]
    ProcessNamespaces,
    /// [`FEATURE_RELAXED`]
    Relaxed,
}

impl Feature {
    /// Looks a feature up by its URI name.
    ///
    /// ```
    /// use xmlpull::reader::feature::{Feature, FEATURE_RELAXED};
    ///
    /// assert_eq!(Feature::from_name(FEATURE_RELAXED), Some(Feature::Relaxed));
    /// assert_eq!(Feature::from_name("urn:unknown"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            FEATURE_PROCESS_NAMESPACES => Some(Self::ProcessNamespaces),
            FEATURE_RELAXED => Some(Self::Relaxed),
            _ => None,
        }
    }

    /// The URI name of the feature.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ProcessNamespaces => FEATURE_PROCESS_NAMESPACES,
            Self::Relaxed => FEATURE_RELAXED,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
