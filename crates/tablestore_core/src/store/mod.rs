//! Typed store over a backing store client.

mod batch;
mod typed;

pub use typed::DataStore;

/// Options for [`DataStore::search_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of entities returned across all pages.
    pub limit: Option<usize>,

    /// Items evaluated per backend request.
    pub page_size: Option<usize>,

    /// Strongly consistent scan.
    pub consistent_read: bool,

    /// Attributes to return. The key attribute is always included.
    ///
    /// Entities must tolerate the missing attributes when deserialized,
    /// e.g. with `#[serde(default)]`.
    pub projection: Option<Vec<String>>,
}

impl ScanOptions {
    /// Creates default options: no limit, whole items, eventually consistent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of entities returned.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of items evaluated per backend request.
    #[must_use]
    pub const fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets whether the scan is strongly consistent.
    #[must_use]
    pub const fn consistent_read(mut self, value: bool) -> Self {
        self.consistent_read = value;
        self
    }

    /// Restricts the returned attributes.
    #[must_use]
    pub fn projection<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(attributes.into_iter().map(Into::into).collect());
        self
    }
}
