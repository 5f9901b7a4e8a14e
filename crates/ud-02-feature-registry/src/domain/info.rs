//! Feature metadata and per-feature lifecycle state.

use std::collections::BTreeSet;
use std::fmt;

use shared_types::entities::Page;

/// Static metadata about a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    /// Unique identifier, e.g. `savings-goal`.
    pub id: String,
    /// Pages the feature applies to. `None` means every page.
    pub pages: Option<BTreeSet<Page>>,
}

impl FeatureInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pages: None,
        }
    }

    /// Restrict the feature to `pages`.
    #[must_use]
    pub fn on_pages(mut self, pages: impl IntoIterator<Item = Page>) -> Self {
        self.pages = Some(pages.into_iter().collect());
        self
    }

    /// Page check of the applicability rule.
    pub fn applies_to(&self, page: Page) -> bool {
        self.pages.as_ref().map_or(true, |pages| pages.contains(&page))
    }
}

/// Why a feature was not mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Current page is not in the feature's page set.
    PageMismatch,
    /// The runtime predicate returned false.
    PredicateFalse,
    /// The runtime predicate panicked.
    PredicateFailed,
}

impl SkipReason {
    /// Short machine-friendly name.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::PageMismatch => "page",
            SkipReason::PredicateFalse => "predicate_false",
            SkipReason::PredicateFailed => "predicate_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::PageMismatch => "page mismatch",
            SkipReason::PredicateFalse => "when() returned false",
            SkipReason::PredicateFailed => "when() failed",
        };
        f.write_str(text)
    }
}

/// Lifecycle state of one registered feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    /// Registered, not yet evaluated.
    Registered,
    /// Mount was invoked. A mount that returned an error still ends up here
    /// so its unmount hook runs at teardown.
    Mounted,
    /// Not applicable for this page load. Never retried.
    Skipped(SkipReason),
    /// Torn down.
    Unmounted,
}

impl FeatureState {
    pub fn is_mounted(&self) -> bool {
        matches!(self, FeatureState::Mounted)
    }
}
