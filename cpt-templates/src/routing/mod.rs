//! Request-routing hook points
//!
//! The host's routing layer asks, per request, which template renders it and
//! lets registered routes adjust the main query. Request state is passed
//! explicitly: a [`TemplateRequest`] names the target slug and a
//! [`MainQuery`] carries the content-type filter.

mod table;

pub use table::{RoutePriorities, RoutingTable, DEFAULT_PRIORITY, SINGLE_TEMPLATE_PRIORITY};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::template::TemplateKind;

/// A request the host needs a template for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "slug", rename_all = "lowercase")]
pub enum TemplateRequest {
    /// Archive listing of a content type
    Archive(String),
    /// Single item of a content type
    Single(String),
    /// Listing of a taxonomy
    Taxonomy(String),
    /// Anything else (front page, search, ...)
    Other,
}

impl TemplateRequest {
    /// Template kind and slug, or `None` for [`TemplateRequest::Other`]
    #[must_use]
    pub fn target(&self) -> Option<(TemplateKind, &str)> {
        match self {
            Self::Archive(slug) => Some((TemplateKind::Archive, slug.as_str())),
            Self::Single(slug) => Some((TemplateKind::Single, slug.as_str())),
            Self::Taxonomy(slug) => Some((TemplateKind::Taxonomy, slug.as_str())),
            Self::Other => None,
        }
    }
}

/// The host's main query for the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainQuery {
    taxonomy: Option<String>,
    content_types: Vec<String>,
}

impl MainQuery {
    /// Query for a taxonomy listing
    #[must_use]
    pub fn for_taxonomy(slug: impl Into<String>) -> Self {
        Self {
            taxonomy: Some(slug.into()),
            content_types: Vec::new(),
        }
    }

    /// Query for a content type listing
    #[must_use]
    pub fn for_content_type(slug: impl Into<String>) -> Self {
        Self {
            taxonomy: None,
            content_types: vec![slug.into()],
        }
    }

    /// Whether this is a listing of taxonomy `slug`
    #[must_use]
    pub fn is_taxonomy(&self, slug: &str) -> bool {
        self.taxonomy.as_deref() == Some(slug)
    }

    /// Queried taxonomy, if any
    #[must_use]
    pub fn taxonomy(&self) -> Option<&str> {
        self.taxonomy.as_deref()
    }

    /// Content-type filter; empty means the host's default
    #[must_use]
    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    /// Replace the content-type filter
    pub fn set_content_types(&mut self, content_types: impl IntoIterator<Item = String>) {
        self.content_types = content_types.into_iter().collect();
    }
}

/// Capability a route exposes to the routing layer
///
/// Each `resolve_*` returns `Ok(None)` when the route does not handle the
/// slug, leaving the current template in place.
pub trait TemplateRoutes: Send + Sync {
    /// Template for the archive listing of `content_type`
    ///
    /// # Errors
    ///
    /// Returns an error if the derived template name is invalid.
    fn resolve_archive(&self, content_type: &str) -> Result<Option<PathBuf>>;

    /// Template for a single item of `content_type`
    ///
    /// # Errors
    ///
    /// Returns an error if the derived template name is invalid.
    fn resolve_single(&self, content_type: &str) -> Result<Option<PathBuf>>;

    /// Template for the listing of `taxonomy`
    ///
    /// # Errors
    ///
    /// Returns an error if the derived template name is invalid.
    fn resolve_taxonomy(&self, taxonomy: &str) -> Result<Option<PathBuf>>;

    /// Adjust the main query before it runs
    fn rewrite_query(&self, query: &mut MainQuery);

    /// Dispatch `request` to the matching hook
    ///
    /// # Errors
    ///
    /// Propagates the hook's error.
    fn route(&self, request: &TemplateRequest) -> Result<Option<PathBuf>> {
        match request {
            TemplateRequest::Archive(slug) => self.resolve_archive(slug),
            TemplateRequest::Single(slug) => self.resolve_single(slug),
            TemplateRequest::Taxonomy(slug) => self.resolve_taxonomy(slug),
            TemplateRequest::Other => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_target() {
        assert_eq!(
            TemplateRequest::Taxonomy("topic".to_string()).target(),
            Some((TemplateKind::Taxonomy, "topic"))
        );
        assert_eq!(TemplateRequest::Other.target(), None);
    }

    #[test]
    fn test_request_serde_shape() {
        let request: TemplateRequest =
            serde_json::from_str(r#"{"kind":"archive","slug":"blog"}"#).unwrap();
        assert_eq!(request, TemplateRequest::Archive("blog".to_string()));
    }

    #[test]
    fn test_main_query() {
        let mut query = MainQuery::for_taxonomy("topic");
        assert!(query.is_taxonomy("topic"));
        assert!(!query.is_taxonomy("region"));
        assert!(query.content_types().is_empty());

        query.set_content_types(vec!["blog".to_string()]);
        assert_eq!(query.content_types(), ["blog"]);

        let listing = MainQuery::for_content_type("blog");
        assert_eq!(listing.taxonomy(), None);
        assert_eq!(listing.content_types(), ["blog"]);
    }
}
