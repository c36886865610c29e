//! Request-time hooks of a resolver

use std::path::PathBuf;

use super::TemplateResolver;
use crate::content::{ContentType, Taxonomy};
use crate::error::Result;
use crate::routing::{MainQuery, TemplateRoutes};
use crate::template::TemplateKind;

impl TemplateResolver {
    fn bound_content_type(&self, slug: &str) -> bool {
        self.content_type
            .as_ref()
            .map(ContentType::slug)
            .is_some_and(|bound| bound == slug)
    }

    fn bound_taxonomy(&self, slug: &str) -> bool {
        self.taxonomy
            .as_ref()
            .map(Taxonomy::slug)
            .is_some_and(|bound| bound == slug)
    }
}

impl TemplateRoutes for TemplateResolver {
    fn resolve_archive(&self, content_type: &str) -> Result<Option<PathBuf>> {
        if !self.capture_archive || !self.bound_content_type(content_type) {
            return Ok(None);
        }
        self.resolve(TemplateKind::Archive, content_type).map(Some)
    }

    fn resolve_single(&self, content_type: &str) -> Result<Option<PathBuf>> {
        if !self.capture_single || !self.bound_content_type(content_type) {
            return Ok(None);
        }
        self.resolve(TemplateKind::Single, content_type).map(Some)
    }

    fn resolve_taxonomy(&self, taxonomy: &str) -> Result<Option<PathBuf>> {
        if !self.capture_archive || !self.bound_taxonomy(taxonomy) {
            return Ok(None);
        }
        self.resolve(TemplateKind::Taxonomy, taxonomy).map(Some)
    }

    fn rewrite_query(&self, query: &mut MainQuery) {
        if !self.capture_archive {
            return;
        }

        if let Some(taxonomy) = &self.taxonomy {
            if query.is_taxonomy(taxonomy.slug()) {
                query.set_content_types(taxonomy.object_types().iter().cloned());
                tracing::debug!(
                    taxonomy = taxonomy.slug(),
                    content_types = ?taxonomy.object_types(),
                    "Rewrote taxonomy query"
                );
            }
        }
    }
}
