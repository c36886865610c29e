//! Integration tests for template resolution and routing
//!
//! Covers the override precedence rules end to end: a filesystem theme, the
//! resolver's bundled template directory and the routing table.

use std::fs;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use cpt_templates::prelude::*;
use proptest::prelude::*;

/// Theme that answers every lookup with a file under `theme/`
struct EverythingOverridden;

impl TemplateLocator for EverythingOverridden {
    fn locate(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates.first().map(|name| PathBuf::from("theme").join(name))
    }
}

/// Helper to build the blog resolver used by the scenarios
fn blog_resolver(
    locator: Arc<dyn TemplateLocator>,
    registry: &InMemoryRegistry,
) -> TemplateResolver {
    let mut resolver = TemplateResolver::new(locator);
    resolver
        .set_base_template_directory("plugin/")
        .create_content_type(
            registry,
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
        )
        .unwrap()
        .create_taxonomy(
            registry,
            "topic",
            &["blog"],
            TaxonomyArgs::default().hierarchical(),
        )
        .unwrap()
        .capture_single()
        .capture_archive();
    resolver
}

fn plugin(name: &str) -> PathBuf {
    PathBuf::from(format!("plugin{MAIN_SEPARATOR}{name}"))
}

#[test]
fn test_plugin_template_when_theme_has_none() {
    let theme = tempfile::tempdir().unwrap();
    let registry = InMemoryRegistry::new();
    let resolver = blog_resolver(Arc::new(ThemeDirectories::new([theme.path()])), &registry);

    assert_eq!(
        resolver.resolve_template_path("archive-blog.php").unwrap(),
        plugin("archive-blog.php")
    );
}

#[test]
fn test_theme_template_overrides_plugin() {
    let theme = tempfile::tempdir().unwrap();
    fs::write(theme.path().join("archive-blog.php"), "theme archive").unwrap();

    let registry = InMemoryRegistry::new();
    let resolver = blog_resolver(Arc::new(ThemeDirectories::new([theme.path()])), &registry);

    assert_eq!(
        resolver.resolve_template_path("archive-blog.php").unwrap(),
        theme.path().join("archive-blog.php")
    );
}

#[test]
fn test_routing_table_end_to_end() {
    let theme = tempfile::tempdir().unwrap();
    fs::write(theme.path().join("single-blog.php"), "theme single").unwrap();

    let registry = InMemoryRegistry::new();
    let resolver = blog_resolver(Arc::new(ThemeDirectories::new([theme.path()])), &registry);

    let mut routes = RoutingTable::new();
    routes.register(Arc::new(resolver));

    let single = routes
        .template_for(&TemplateRequest::Single("blog".into()), "single.php".into())
        .unwrap();
    assert_eq!(single, theme.path().join("single-blog.php"));

    let taxonomy = routes
        .template_for(&TemplateRequest::Taxonomy("topic".into()), "taxonomy.php".into())
        .unwrap();
    assert_eq!(taxonomy, plugin("taxonomy-topic.php"));

    let unrelated = routes
        .template_for(&TemplateRequest::Archive("news".into()), "archive.php".into())
        .unwrap();
    assert_eq!(unrelated, PathBuf::from("archive.php"));
}

#[test]
fn test_taxonomy_listing_rewrites_query() {
    let registry = InMemoryRegistry::new();
    let resolver = blog_resolver(Arc::new(NoThemeOverrides), &registry);

    let mut routes = RoutingTable::new();
    routes.register(Arc::new(resolver));

    let mut query = MainQuery::for_taxonomy("topic");
    routes.prepare_query(&mut query);
    assert_eq!(query.content_types(), ["blog"]);
}

#[test]
fn test_second_resolver_for_second_pairing() {
    let registry = InMemoryRegistry::new();
    let blog = blog_resolver(Arc::new(NoThemeOverrides), &registry);

    let mut news = TemplateResolver::default();
    news.set_base_template_directory("plugin")
        .create_content_type(&registry, "news", ContentTypeArgs::default().with_archive())
        .unwrap()
        .create_taxonomy(&registry, "region", &["news", "blog"], TaxonomyArgs::default())
        .unwrap()
        .capture_archive();

    let mut routes = RoutingTable::new();
    routes.register(Arc::new(blog)).register(Arc::new(news));

    let archive = routes
        .template_for(&TemplateRequest::Archive("news".into()), "archive.php".into())
        .unwrap();
    assert_eq!(archive, plugin("archive-news.php"));

    let mut query = MainQuery::for_taxonomy("region");
    routes.prepare_query(&mut query);
    assert_eq!(query.content_types(), ["news", "blog"]);
}

fn template_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,30}\\.(php|html)"
}

fn directory() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(/[a-z]{1,8}){0,3}/{0,2}"
}

proptest! {
    #[test]
    fn prop_override_wins_regardless_of_base(name in template_name(), dir in directory()) {
        let mut resolver = TemplateResolver::new(Arc::new(EverythingOverridden));
        resolver.set_base_template_directory(&dir);
        prop_assert_eq!(
            resolver.resolve_template_path(&name).unwrap(),
            PathBuf::from("theme").join(&name)
        );
    }

    #[test]
    fn prop_disabled_overloading_concatenates(name in template_name(), dir in directory()) {
        let mut resolver = TemplateResolver::new(Arc::new(EverythingOverridden));
        resolver
            .disable_theme_overloading()
            .set_base_template_directory(&dir);

        let base = resolver.base_template_directory().to_string();
        prop_assert_eq!(
            resolver.resolve_template_path(&name).unwrap(),
            PathBuf::from(format!("{base}{name}"))
        );
    }

    #[test]
    fn prop_base_directory_ends_with_one_separator(dir in directory()) {
        let mut resolver = TemplateResolver::default();
        resolver.set_base_template_directory(&dir);
        let once = resolver.base_template_directory().to_string();

        prop_assert!(once.ends_with(MAIN_SEPARATOR));
        prop_assert!(!once[..once.len() - 1].ends_with(['/', MAIN_SEPARATOR]));

        resolver.set_base_template_directory(&once);
        prop_assert_eq!(resolver.base_template_directory(), once.as_str());
    }
}
