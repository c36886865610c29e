//! Blog content type with a topic taxonomy
//!
//! Demonstrates:
//! - Registering a content type and taxonomy through one resolver
//! - Routing archive, single and taxonomy requests
//! - Rewriting the main query of a taxonomy listing
//!
//! Run with: `cargo run --example blog_site`

use std::path::PathBuf;
use std::sync::Arc;

use cpt_templates::{observability, prelude::*};

fn main() -> anyhow::Result<()> {
    observability::init()?;

    let registry = InMemoryRegistry::new();
    let theme = ThemeDirectories::new(["./demos/theme"]).with_user_overrides("cpt-templates");

    let mut blog = TemplateResolver::new(Arc::new(theme));
    blog.set_base_template_directory("./demos/templates")
        .set_template_extension("html")
        .create_content_type(
            &registry,
            "blog",
            ContentTypeArgs::default()
                .public()
                .with_archive()
                .supports([
                    Supports::Title,
                    Supports::Editor,
                    Supports::Thumbnail,
                    Supports::Excerpt,
                ])
                .menu_position(0),
        )?
        .create_taxonomy(
            &registry,
            "topic",
            &["blog"],
            TaxonomyArgs::default().hierarchical(),
        )?
        .capture_single()
        .capture_archive();

    let mut routes = RoutingTable::new();
    routes.register(Arc::new(blog));

    for request in [
        TemplateRequest::Archive("blog".to_string()),
        TemplateRequest::Single("blog".to_string()),
        TemplateRequest::Taxonomy("topic".to_string()),
    ] {
        let template = routes.template_for(&request, PathBuf::from("index.html"))?;
        tracing::info!(?request, template = %template.display(), "Resolved");
    }

    let mut query = MainQuery::for_taxonomy("topic");
    routes.prepare_query(&mut query);
    tracing::info!(content_types = ?query.content_types(), "Taxonomy query");

    Ok(())
}
