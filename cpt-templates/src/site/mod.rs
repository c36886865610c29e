//! Site assembly from configuration
//!
//! Builds one [`TemplateResolver`] per configured group, registers its
//! content type and taxonomy in a shared [`InMemoryRegistry`], and wires the
//! finished resolvers into a [`RoutingTable`]. Groups are set up in order, so
//! a taxonomy may only attach to content types of its own or earlier groups.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{CptTemplatesConfig, GroupSettings, ThemeSettings};
use crate::content::InMemoryRegistry;
use crate::error::Result;
use crate::resolver::TemplateResolver;
use crate::routing::{MainQuery, RoutingTable, TemplateRequest};
use crate::template::{Post, RenderContext, TemplateKind, TemplateRenderer};
use crate::theme::{NoThemeOverrides, TemplateLocator, ThemeDirectories};

/// Configured resolvers, their registry and routing table
#[derive(Debug)]
pub struct Site {
    registry: InMemoryRegistry,
    routes: RoutingTable,
    groups: Vec<Arc<TemplateResolver>>,
    renderer: TemplateRenderer,
}

impl Site {
    /// Build a site with a fresh registry
    ///
    /// # Errors
    ///
    /// Returns the first registration or binding error of any group.
    pub fn from_config(config: &CptTemplatesConfig) -> Result<Self> {
        Self::with_registry(config, InMemoryRegistry::new())
    }

    /// Build a site registering into `registry`
    ///
    /// # Errors
    ///
    /// Returns the first registration or binding error of any group.
    pub fn with_registry(config: &CptTemplatesConfig, registry: InMemoryRegistry) -> Result<Self> {
        let locator = Self::locator(&config.theme);
        let mut routes = RoutingTable::new();
        let mut groups = Vec::with_capacity(config.groups.len());

        for group in &config.groups {
            let resolver = Arc::new(Self::build_group(group, Arc::clone(&locator), &registry)?);
            routes.register(Arc::clone(&resolver) as _);
            groups.push(resolver);
        }

        tracing::info!(
            groups = groups.len(),
            content_types = ?registry.content_type_slugs(),
            taxonomies = ?registry.taxonomy_slugs(),
            "Site assembled"
        );

        Ok(Self {
            registry,
            routes,
            groups,
            renderer: TemplateRenderer::with_date_format(&config.render.date_format),
        })
    }

    /// Override search collaborator described by `theme`
    #[must_use]
    pub fn locator(theme: &ThemeSettings) -> Arc<dyn TemplateLocator> {
        if theme.directories.is_empty() && !theme.user_overrides {
            return Arc::new(NoThemeOverrides);
        }

        let mut dirs = ThemeDirectories::new(theme.directories.iter().cloned());
        if theme.user_overrides {
            dirs = dirs.with_user_overrides(&theme.app_name);
        }
        Arc::new(dirs)
    }

    fn build_group(
        group: &GroupSettings,
        locator: Arc<dyn TemplateLocator>,
        registry: &InMemoryRegistry,
    ) -> Result<TemplateResolver> {
        let mut resolver = TemplateResolver::new(locator);
        resolver
            .set_theme_overloading(group.theme_overloading)
            .set_base_template_directory(&group.template_dir)
            .set_template_extension(&group.template_extension);

        if let Some(content_type) = &group.content_type {
            resolver.create_content_type(registry, &content_type.slug, content_type.args.clone())?;
        }

        if let Some(taxonomy) = &group.taxonomy {
            let object_types: Vec<&str> = taxonomy.object_types.iter().map(String::as_str).collect();
            resolver.create_taxonomy(registry, &taxonomy.slug, &object_types, taxonomy.args.clone())?;
        }

        if group.capture_archive {
            resolver.capture_archive();
        }
        if group.capture_single {
            resolver.capture_single();
        }

        Ok(resolver)
    }

    /// Template that renders `request`, falling back to `default`
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a route.
    pub fn template_for(&self, request: &TemplateRequest, default: PathBuf) -> Result<PathBuf> {
        self.routes.template_for(request, default)
    }

    /// Let every group adjust the main query
    pub fn prepare_query(&self, query: &mut MainQuery) {
        self.routes.prepare_query(query);
    }

    /// Resolve and render `request` with `posts`
    ///
    /// # Errors
    ///
    /// Returns error if routing fails or the template cannot be rendered.
    pub fn render(&self, request: &TemplateRequest, default: PathBuf, posts: &[Post]) -> Result<String> {
        let template = self.template_for(request, default)?;

        let (content_type, taxonomy) = match request.target() {
            Some((TemplateKind::Taxonomy, slug)) => (None, Some(slug)),
            Some((_, slug)) => (Some(slug), None),
            None => (None, None),
        };
        let ctx = RenderContext {
            posts,
            content_type,
            taxonomy,
        };

        Ok(self.renderer.render(&template, &ctx)?)
    }

    /// Registry holding every group's registrations
    #[must_use]
    pub const fn registry(&self) -> &InMemoryRegistry {
        &self.registry
    }

    /// Resolvers in configuration order
    #[must_use]
    pub fn groups(&self) -> &[Arc<TemplateResolver>] {
        &self.groups
    }

    /// Renderer shared by all groups
    #[must_use]
    pub const fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }
}
