//! cpt-templates: custom content types with theme-overridable templates
//!
//! Declare a custom content type and an associated taxonomy, then route
//! archive, single and taxonomy page rendering to bundled template files
//! that the active theme may override.
//!
//! # Design Principles
//!
//! 1. **One resolver, one pairing**: a [`TemplateResolver`] binds at most one
//!    content type and one taxonomy
//! 2. **Theme first**: with theme overloading enabled, a theme template wins
//!    over the bundled one
//! 3. **Setup once, read forever**: resolvers are configured up front and
//!    shared immutably afterwards
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use cpt_templates::prelude::*;
//!
//! # fn main() -> Result<(), CptTemplatesError> {
//! let registry = InMemoryRegistry::new();
//!
//! let mut blog = TemplateResolver::new(Arc::new(ThemeDirectories::new(["./theme"])));
//! blog.set_base_template_directory("./templates")
//!     .create_content_type(&registry, "blog", ContentTypeArgs::default().public().with_archive())?
//!     .create_taxonomy(&registry, "topic", &["blog"], TaxonomyArgs::default().hierarchical())?
//!     .capture_single()
//!     .capture_archive();
//!
//! let mut routes = RoutingTable::new();
//! routes.register(Arc::new(blog));
//!
//! let template = routes.template_for(
//!     &TemplateRequest::Archive("blog".to_string()),
//!     PathBuf::from("index.php"),
//! )?;
//! println!("rendering with {}", template.display());
//! # Ok(())
//! # }
//! ```
//!
//! [`TemplateResolver`]: resolver::TemplateResolver

pub mod config;
pub mod content;
pub mod error;
pub mod observability;
pub mod resolver;
pub mod routing;
pub mod site;
pub mod template;
pub mod theme;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use cpt_templates::prelude::*;
    //! ```

    pub use crate::config::CptTemplatesConfig;
    pub use crate::content::{
        ContentType, ContentTypeArgs, ContentTypeRegistrar, InMemoryRegistry, Labels,
        RegistrationError, Supports, Taxonomy, TaxonomyArgs, TaxonomyRegistrar,
    };
    pub use crate::error::{BindingKind, CptTemplatesError};
    pub use crate::resolver::TemplateResolver;
    pub use crate::routing::{MainQuery, RoutePriorities, RoutingTable, TemplateRequest, TemplateRoutes};
    pub use crate::site::Site;
    pub use crate::template::{Post, TemplateKind, TemplateRenderer};
    pub use crate::theme::{NoThemeOverrides, TemplateLocator, ThemeDirectories};
}
