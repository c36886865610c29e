//! Registration collaborators and the in-memory host registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::{ContentType, ContentTypeArgs, Taxonomy, TaxonomyArgs};

/// Longest accepted content type slug
pub const MAX_CONTENT_TYPE_SLUG_LEN: usize = 20;

/// Longest accepted taxonomy slug
pub const MAX_TAXONOMY_SLUG_LEN: usize = 32;

const RESERVED_CONTENT_TYPES: &[&str] = &[
    "post",
    "page",
    "attachment",
    "revision",
    "nav_menu_item",
    "custom_css",
    "customize_changeset",
    "action",
    "author",
    "order",
    "theme",
];

const RESERVED_TAXONOMIES: &[&str] = &[
    "category",
    "post_tag",
    "nav_menu",
    "link_category",
    "post_format",
    "author",
    "order",
    "type",
    "taxonomy",
    "term",
];

/// Errors reported by a registration collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Slug is empty, too long, or contains characters outside `[a-z0-9_-]`
    #[error("invalid slug '{slug}': must be 1 to {max_len} characters of a-z, 0-9, '_' or '-'")]
    InvalidSlug {
        /// Rejected slug
        slug: String,
        /// Maximum length for this kind of slug
        max_len: usize,
    },

    /// Slug is reserved by the host
    #[error("slug '{0}' is reserved")]
    ReservedSlug(String),

    /// Slug is already registered
    #[error("'{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Content-type registration collaborator
pub trait ContentTypeRegistrar: Send + Sync {
    /// Register a new content type
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is invalid, reserved or already taken.
    fn register_content_type(
        &self,
        slug: &str,
        args: ContentTypeArgs,
    ) -> Result<ContentType, RegistrationError>;

    /// Look up a registered content type
    fn content_type(&self, slug: &str) -> Option<ContentType>;
}

/// Taxonomy registration collaborator
pub trait TaxonomyRegistrar: Send + Sync {
    /// Whether a taxonomy with this slug exists
    fn taxonomy_exists(&self, slug: &str) -> bool;

    /// Register a taxonomy attached to the given content types
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is invalid, reserved or already taken.
    fn register_taxonomy(
        &self,
        slug: &str,
        object_types: &[String],
        args: TaxonomyArgs,
    ) -> Result<(), RegistrationError>;

    /// Attach an existing taxonomy to an existing content type
    ///
    /// Returns `false` if either side is unknown.
    fn register_taxonomy_for_object_type(&self, taxonomy: &str, content_type: &str) -> bool;

    /// Look up a registered taxonomy
    fn taxonomy(&self, slug: &str) -> Option<Taxonomy>;
}

#[derive(Debug, Default)]
struct RegistryState {
    content_types: HashMap<String, ContentType>,
    taxonomies: HashMap<String, Taxonomy>,
}

/// Thread-safe in-memory registration store
///
/// Cloning shares the underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugs of all registered content types, sorted
    #[must_use]
    pub fn content_type_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<_> = self.state.read().content_types.keys().cloned().collect();
        slugs.sort();
        slugs
    }

    /// Slugs of all registered taxonomies, sorted
    #[must_use]
    pub fn taxonomy_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<_> = self.state.read().taxonomies.keys().cloned().collect();
        slugs.sort();
        slugs
    }
}

fn validate_slug(slug: &str, max_len: usize, reserved: &[&str]) -> Result<(), RegistrationError> {
    let well_formed = !slug.is_empty()
        && slug.len() <= max_len
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');

    if !well_formed {
        return Err(RegistrationError::InvalidSlug {
            slug: slug.to_string(),
            max_len,
        });
    }

    if reserved.contains(&slug) {
        return Err(RegistrationError::ReservedSlug(slug.to_string()));
    }

    Ok(())
}

impl ContentTypeRegistrar for InMemoryRegistry {
    fn register_content_type(
        &self,
        slug: &str,
        args: ContentTypeArgs,
    ) -> Result<ContentType, RegistrationError> {
        validate_slug(slug, MAX_CONTENT_TYPE_SLUG_LEN, RESERVED_CONTENT_TYPES)?;

        let mut state = self.state.write();
        if state.content_types.contains_key(slug) {
            return Err(RegistrationError::AlreadyRegistered(slug.to_string()));
        }

        let content_type = ContentType::new(slug.to_string(), args);
        state
            .content_types
            .insert(slug.to_string(), content_type.clone());

        tracing::info!(content_type = slug, "Registered content type");
        Ok(content_type)
    }

    fn content_type(&self, slug: &str) -> Option<ContentType> {
        self.state.read().content_types.get(slug).cloned()
    }
}

impl TaxonomyRegistrar for InMemoryRegistry {
    fn taxonomy_exists(&self, slug: &str) -> bool {
        self.state.read().taxonomies.contains_key(slug)
    }

    fn register_taxonomy(
        &self,
        slug: &str,
        object_types: &[String],
        args: TaxonomyArgs,
    ) -> Result<(), RegistrationError> {
        validate_slug(slug, MAX_TAXONOMY_SLUG_LEN, RESERVED_TAXONOMIES)?;

        let mut state = self.state.write();
        if state.taxonomies.contains_key(slug) {
            return Err(RegistrationError::AlreadyRegistered(slug.to_string()));
        }

        // Unknown content types are attached later, or refused by
        // `register_taxonomy_for_object_type`.
        let known: Vec<String> = object_types
            .iter()
            .filter(|t| state.content_types.contains_key(t.as_str()))
            .cloned()
            .collect();

        state
            .taxonomies
            .insert(slug.to_string(), Taxonomy::new(slug.to_string(), known, args));

        tracing::info!(taxonomy = slug, ?object_types, "Registered taxonomy");
        Ok(())
    }

    fn register_taxonomy_for_object_type(&self, taxonomy: &str, content_type: &str) -> bool {
        let mut state = self.state.write();
        if !state.content_types.contains_key(content_type) {
            return false;
        }

        state.taxonomies.get_mut(taxonomy).is_some_and(|tax| {
            tax.attach(content_type);
            true
        })
    }

    fn taxonomy(&self, slug: &str) -> Option<Taxonomy> {
        self.state.read().taxonomies.get(slug).cloned()
    }
}
