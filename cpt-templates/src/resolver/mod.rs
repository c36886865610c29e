//! Template resolution with theme overloading
//!
//! A [`TemplateResolver`] models exactly one (content type, taxonomy) pairing.
//! It is configured once through a short sequence of fluent setup calls and
//! then shared read-only, usually inside a [`RoutingTable`].
//!
//! Resolution order for a logical template name:
//! 1. The active theme, when theme overloading is enabled (the default)
//! 2. `base_template_directory + name`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cpt_templates::content::{ContentTypeArgs, InMemoryRegistry, TaxonomyArgs};
//! use cpt_templates::resolver::TemplateResolver;
//! use cpt_templates::theme::NoThemeOverrides;
//!
//! # fn main() -> Result<(), cpt_templates::error::CptTemplatesError> {
//! let registry = InMemoryRegistry::new();
//! let mut blog = TemplateResolver::new(Arc::new(NoThemeOverrides));
//! blog.disable_theme_overloading()
//!     .set_base_template_directory("plugin")
//!     .create_content_type(&registry, "blog", ContentTypeArgs::default().public().with_archive())?
//!     .create_taxonomy(&registry, "topic", &["blog"], TaxonomyArgs::default().hierarchical())?
//!     .capture_single()
//!     .capture_archive();
//!
//! assert_eq!(
//!     blog.resolve_template_path("archive-blog.php")?,
//!     std::path::PathBuf::from(format!("plugin{}archive-blog.php", std::path::MAIN_SEPARATOR)),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! [`RoutingTable`]: crate::routing::RoutingTable

mod hooks;

use std::fmt;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use crate::content::{
    ContentType, ContentTypeArgs, ContentTypeRegistrar, Taxonomy, TaxonomyArgs, TaxonomyRegistrar,
};
use crate::error::{BindingKind, CptTemplatesError, Result};
use crate::template::{is_valid_template_name, TemplateKind, DEFAULT_TEMPLATE_EXTENSION};
use crate::theme::{NoThemeOverrides, TemplateLocator};

/// Base template directory used until one is registered
pub const DEFAULT_TEMPLATE_DIRECTORY: &str = "./";

/// Resolver for one content type and its taxonomy
pub struct TemplateResolver {
    theme_overloading: bool,
    base_template_directory: String,
    template_extension: String,
    locator: Arc<dyn TemplateLocator>,
    content_type: Option<ContentType>,
    taxonomy: Option<Taxonomy>,
    capture_archive: bool,
    capture_single: bool,
}

impl fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("theme_overloading", &self.theme_overloading)
            .field("base_template_directory", &self.base_template_directory)
            .field("template_extension", &self.template_extension)
            .field("content_type", &self.content_type.as_ref().map(ContentType::slug))
            .field("taxonomy", &self.taxonomy.as_ref().map(Taxonomy::slug))
            .field("capture_archive", &self.capture_archive)
            .field("capture_single", &self.capture_single)
            .finish_non_exhaustive()
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoThemeOverrides))
    }
}

impl TemplateResolver {
    /// Create a resolver that searches `locator` for theme overrides
    ///
    /// Theme overloading starts enabled and the base template directory is
    /// [`DEFAULT_TEMPLATE_DIRECTORY`].
    #[must_use]
    pub fn new(locator: Arc<dyn TemplateLocator>) -> Self {
        Self {
            theme_overloading: true,
            base_template_directory: DEFAULT_TEMPLATE_DIRECTORY.to_string(),
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            locator,
            content_type: None,
            taxonomy: None,
            capture_archive: false,
            capture_single: false,
        }
    }

    /// Let theme templates take precedence. On by default.
    pub fn enable_theme_overloading(&mut self) -> &mut Self {
        self.set_theme_overloading(true)
    }

    /// Always use templates from the base template directory
    pub fn disable_theme_overloading(&mut self) -> &mut Self {
        self.set_theme_overloading(false)
    }

    /// Toggle theme overloading
    pub fn set_theme_overloading(&mut self, enabled: bool) -> &mut Self {
        self.theme_overloading = enabled;
        self
    }

    /// Register the directory holding the bundled templates
    ///
    /// The path is stored with exactly one trailing separator.
    pub fn set_base_template_directory(&mut self, path: impl AsRef<str>) -> &mut Self {
        self.base_template_directory = normalize_directory(path.as_ref());
        self
    }

    /// Set the extension of derived template names (default `php`)
    pub fn set_template_extension(&mut self, extension: impl AsRef<str>) -> &mut Self {
        self.template_extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// Route archive and taxonomy listings through this resolver
    pub fn capture_archive(&mut self) -> &mut Self {
        self.capture_archive = true;
        self
    }

    /// Route single item views through this resolver
    pub fn capture_single(&mut self) -> &mut Self {
        self.capture_single = true;
        self
    }

    /// Bind an already registered content type
    ///
    /// # Errors
    ///
    /// Returns [`CptTemplatesError::AlreadyBound`] if a content type is bound;
    /// the existing binding is kept.
    pub fn bind_content_type(&mut self, content_type: ContentType) -> Result<&mut Self> {
        if self.content_type.is_some() {
            return Err(CptTemplatesError::AlreadyBound(BindingKind::ContentType));
        }
        self.content_type = Some(content_type);
        Ok(self)
    }

    /// Bind an already registered taxonomy
    ///
    /// # Errors
    ///
    /// Returns [`CptTemplatesError::AlreadyBound`] if a taxonomy is bound;
    /// the existing binding is kept.
    pub fn bind_taxonomy(&mut self, taxonomy: Taxonomy) -> Result<&mut Self> {
        if self.taxonomy.is_some() {
            return Err(CptTemplatesError::AlreadyBound(BindingKind::Taxonomy));
        }
        self.taxonomy = Some(taxonomy);
        Ok(self)
    }

    /// Register a content type and bind it
    ///
    /// # Errors
    ///
    /// Returns [`CptTemplatesError::AlreadyBound`] if a content type is bound,
    /// or the registrar's rejection as [`CptTemplatesError::Registration`].
    pub fn create_content_type<R>(
        &mut self,
        registrar: &R,
        slug: &str,
        args: ContentTypeArgs,
    ) -> Result<&mut Self>
    where
        R: ContentTypeRegistrar + ?Sized,
    {
        if self.content_type.is_some() {
            return Err(CptTemplatesError::AlreadyBound(BindingKind::ContentType));
        }

        let content_type = registrar.register_content_type(slug, args)?;
        self.bind_content_type(content_type)
    }

    /// Register a taxonomy, attach it to `object_types` and bind it
    ///
    /// # Errors
    ///
    /// - [`CptTemplatesError::AlreadyBound`] if a taxonomy is bound
    /// - [`CptTemplatesError::DuplicateTaxonomy`] if the slug exists already
    /// - [`CptTemplatesError::Registration`] if the registrar rejects it
    /// - [`CptTemplatesError::Association`] naming the first content type the
    ///   taxonomy could not be attached to
    pub fn create_taxonomy<R>(
        &mut self,
        registrar: &R,
        slug: &str,
        object_types: &[&str],
        args: TaxonomyArgs,
    ) -> Result<&mut Self>
    where
        R: TaxonomyRegistrar + ?Sized,
    {
        if self.taxonomy.is_some() {
            return Err(CptTemplatesError::AlreadyBound(BindingKind::Taxonomy));
        }
        if registrar.taxonomy_exists(slug) {
            return Err(CptTemplatesError::DuplicateTaxonomy(slug.to_string()));
        }

        let object_types: Vec<String> = object_types.iter().map(ToString::to_string).collect();
        registrar.register_taxonomy(slug, &object_types, args.clone())?;

        for content_type in &object_types {
            if !registrar.register_taxonomy_for_object_type(slug, content_type) {
                return Err(CptTemplatesError::Association {
                    taxonomy: slug.to_string(),
                    content_type: content_type.clone(),
                });
            }
        }

        let taxonomy = registrar
            .taxonomy(slug)
            .unwrap_or_else(|| Taxonomy::new(slug.to_string(), object_types, args));
        self.bind_taxonomy(taxonomy)
    }

    /// Path of the file that should render `template_name`
    ///
    /// With theme overloading enabled a theme match wins unconditionally;
    /// otherwise, or without a match, the name is appended to the base
    /// template directory. The theme is never consulted when overloading is
    /// disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CptTemplatesError::InvalidTemplateName`] for an empty name or
    /// one containing a path separator.
    pub fn resolve_template_path(&self, template_name: &str) -> Result<PathBuf> {
        if !is_valid_template_name(template_name) {
            return Err(CptTemplatesError::InvalidTemplateName(
                template_name.to_string(),
            ));
        }

        if self.theme_overloading {
            if let Some(path) = self.locator.locate(&[template_name]) {
                tracing::debug!(template = template_name, path = %path.display(), "Using theme template");
                return Ok(path);
            }
        }

        let path = PathBuf::from(format!("{}{template_name}", self.base_template_directory));
        tracing::debug!(template = template_name, path = %path.display(), "Using bundled template");
        Ok(path)
    }

    /// Resolve the logical template of `kind` for `slug`
    ///
    /// # Errors
    ///
    /// Returns [`CptTemplatesError::InvalidTemplateName`] if the derived name
    /// is not a valid file name.
    pub fn resolve(&self, kind: TemplateKind, slug: &str) -> Result<PathBuf> {
        self.resolve_template_path(&self.template_name(kind, slug))
    }

    /// Logical template name of `kind` for `slug`
    #[must_use]
    pub fn template_name(&self, kind: TemplateKind, slug: &str) -> String {
        kind.template_name(slug, &self.template_extension)
    }

    /// Whether theme templates take precedence
    #[must_use]
    pub const fn theme_overloading(&self) -> bool {
        self.theme_overloading
    }

    /// Normalized base template directory
    #[must_use]
    pub fn base_template_directory(&self) -> &str {
        &self.base_template_directory
    }

    /// Extension of derived template names
    #[must_use]
    pub fn template_extension(&self) -> &str {
        &self.template_extension
    }

    /// Bound content type, if any
    #[must_use]
    pub const fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    /// Bound taxonomy, if any
    #[must_use]
    pub const fn taxonomy(&self) -> Option<&Taxonomy> {
        self.taxonomy.as_ref()
    }

    /// Whether archive and taxonomy listings are routed here
    #[must_use]
    pub const fn captures_archive(&self) -> bool {
        self.capture_archive
    }

    /// Whether single item views are routed here
    #[must_use]
    pub const fn captures_single(&self) -> bool {
        self.capture_single
    }
}

/// Normalize `path` to end with exactly one separator
///
/// An empty path becomes [`DEFAULT_TEMPLATE_DIRECTORY`].
#[must_use]
pub fn normalize_directory(path: &str) -> String {
    if path.is_empty() {
        return DEFAULT_TEMPLATE_DIRECTORY.to_string();
    }

    let trimmed = path.trim_end_matches(|c: char| c == '/' || c == MAIN_SEPARATOR);
    format!("{trimmed}{MAIN_SEPARATOR}")
}
