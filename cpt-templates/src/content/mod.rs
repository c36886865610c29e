//! Content types and taxonomies
//!
//! Registration records owned by the host registry. A [`ContentType`] is a
//! distinct kind of publishable item with its own archive and single views;
//! a [`Taxonomy`] is a classification scheme attached to one or more content
//! types (its "object types").
//!
//! Registration itself goes through the collaborator traits in
//! [`registry`], with [`InMemoryRegistry`] as the bundled host.

mod registry;

pub use registry::{
    ContentTypeRegistrar, InMemoryRegistry, RegistrationError, TaxonomyRegistrar,
    MAX_CONTENT_TYPE_SLUG_LEN, MAX_TAXONOMY_SLUG_LEN,
};

use serde::{Deserialize, Serialize};

/// Display labels shown by the host's admin surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// General plural name, e.g. "Blog posts"
    pub name: Option<String>,
    /// Singular name, e.g. "Blog post"
    pub singular_name: Option<String>,
    /// Menu entry name
    pub menu_name: Option<String>,
}

/// Editor features a content type supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Supports {
    /// Title field
    Title,
    /// Main body editor
    Editor,
    /// Author selection
    Author,
    /// Featured image
    Thumbnail,
    /// Excerpt field
    Excerpt,
    /// Comments
    Comments,
    /// Revision history
    Revisions,
    /// Menu order and parent selection
    PageAttributes,
    /// Arbitrary key/value fields
    CustomFields,
}

/// Configuration map for registering a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTypeArgs {
    /// Display labels
    pub labels: Labels,
    /// Visible to authors and readers
    pub public: bool,
    /// Queryable from the front end; falls back to `public` when unset
    pub publicly_queryable: Option<bool>,
    /// Supported editor features
    pub supports: Vec<Supports>,
    /// Whether the content type has an archive listing
    pub has_archive: bool,
    /// Position in the admin menu
    pub menu_position: Option<u32>,
}

impl Default for ContentTypeArgs {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            public: false,
            publicly_queryable: None,
            supports: vec![Supports::Title, Supports::Editor],
            has_archive: false,
            menu_position: None,
        }
    }
}

impl ContentTypeArgs {
    /// Mark the content type public and front-end queryable
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.public = true;
        self.publicly_queryable = Some(true);
        self
    }

    /// Enable the archive listing
    #[must_use]
    pub const fn with_archive(mut self) -> Self {
        self.has_archive = true;
        self
    }

    /// Replace the supported editor features
    #[must_use]
    pub fn supports(mut self, supports: impl IntoIterator<Item = Supports>) -> Self {
        self.supports = supports.into_iter().collect();
        self
    }

    /// Set the admin menu position
    #[must_use]
    pub const fn menu_position(mut self, position: u32) -> Self {
        self.menu_position = Some(position);
        self
    }
}

/// A registered content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    slug: String,
    args: ContentTypeArgs,
}

impl ContentType {
    pub(crate) const fn new(slug: String, args: ContentTypeArgs) -> Self {
        Self { slug, args }
    }

    /// Unique slug, e.g. `blog`
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Arguments the content type was registered with
    #[must_use]
    pub const fn args(&self) -> &ContentTypeArgs {
        &self.args
    }

    /// Whether front-end requests may query this content type
    #[must_use]
    pub fn is_publicly_queryable(&self) -> bool {
        self.args.publicly_queryable.unwrap_or(self.args.public)
    }
}

/// Configuration map for registering a taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyArgs {
    /// Display labels
    pub labels: Labels,
    /// Visible to authors and readers
    pub public: bool,
    /// Queryable from the front end; falls back to `public` when unset
    pub publicly_queryable: Option<bool>,
    /// Category-like (true) or tag-like (false)
    pub hierarchical: bool,
}

impl Default for TaxonomyArgs {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            public: true,
            publicly_queryable: None,
            hierarchical: false,
        }
    }
}

impl TaxonomyArgs {
    /// Make the taxonomy category-like
    #[must_use]
    pub const fn hierarchical(mut self) -> Self {
        self.hierarchical = true;
        self
    }
}

/// A registered taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    slug: String,
    object_types: Vec<String>,
    args: TaxonomyArgs,
}

impl Taxonomy {
    pub(crate) const fn new(slug: String, object_types: Vec<String>, args: TaxonomyArgs) -> Self {
        Self {
            slug,
            object_types,
            args,
        }
    }

    /// Unique slug, e.g. `topic`
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Content type slugs this taxonomy is attached to
    #[must_use]
    pub fn object_types(&self) -> &[String] {
        &self.object_types
    }

    /// Arguments the taxonomy was registered with
    #[must_use]
    pub const fn args(&self) -> &TaxonomyArgs {
        &self.args
    }

    pub(crate) fn attach(&mut self, content_type: &str) {
        if !self.object_types.iter().any(|t| t == content_type) {
            self.object_types.push(content_type.to_string());
        }
    }
}
