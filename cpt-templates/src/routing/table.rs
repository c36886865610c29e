//! Priority-ordered routing table

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::{MainQuery, TemplateRequest, TemplateRoutes};
use crate::error::Result;

/// Priority of listing templates and query rewrites unless overridden
pub const DEFAULT_PRIORITY: i32 = 10;

/// Priority of single templates unless overridden
///
/// Runs late so the route's answer replaces most other customizations.
pub const SINGLE_TEMPLATE_PRIORITY: i32 = 999;

/// Priorities of a route's hooks; lower runs first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePriorities {
    /// Archive and taxonomy listing templates
    pub listing: i32,
    /// Single item templates
    pub single: i32,
    /// Main query rewrite
    pub query: i32,
}

impl Default for RoutePriorities {
    fn default() -> Self {
        Self {
            listing: DEFAULT_PRIORITY,
            single: SINGLE_TEMPLATE_PRIORITY,
            query: DEFAULT_PRIORITY,
        }
    }
}

struct Entry {
    priority: i32,
    route: Arc<dyn TemplateRoutes>,
}

/// Chain of routes consulted per request
///
/// Hooks run in ascending priority, registration order breaking ties. Every
/// answer replaces the current template, so the last route to answer wins.
#[derive(Default)]
pub struct RoutingTable {
    listing: Vec<Entry>,
    single: Vec<Entry>,
    query: Vec<Entry>,
}

impl fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTable")
            .field("routes", &self.len())
            .finish()
    }
}

fn insert(entries: &mut Vec<Entry>, priority: i32, route: Arc<dyn TemplateRoutes>) {
    let at = entries.partition_point(|e| e.priority <= priority);
    entries.insert(at, Entry { priority, route });
}

impl RoutingTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route at the default priorities
    pub fn register(&mut self, route: Arc<dyn TemplateRoutes>) -> &mut Self {
        self.register_with(route, RoutePriorities::default())
    }

    /// Register a route at explicit priorities
    pub fn register_with(
        &mut self,
        route: Arc<dyn TemplateRoutes>,
        priorities: RoutePriorities,
    ) -> &mut Self {
        insert(&mut self.listing, priorities.listing, Arc::clone(&route));
        insert(&mut self.single, priorities.single, Arc::clone(&route));
        insert(&mut self.query, priorities.query, route);
        self
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.query.len()
    }

    /// Whether no route is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Template that renders `request`, starting from the host's `default`
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a route.
    pub fn template_for(&self, request: &TemplateRequest, default: PathBuf) -> Result<PathBuf> {
        let entries = match request {
            TemplateRequest::Archive(_) | TemplateRequest::Taxonomy(_) => &self.listing,
            TemplateRequest::Single(_) => &self.single,
            TemplateRequest::Other => return Ok(default),
        };

        let mut template = default;
        for entry in entries {
            if let Some(path) = entry.route.route(request)? {
                template = path;
            }
        }

        tracing::debug!(?request, template = %template.display(), "Routed request");
        Ok(template)
    }

    /// Let every route adjust the main query
    pub fn prepare_query(&self, query: &mut MainQuery) {
        for entry in &self.query {
            entry.route.rewrite_query(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Route answering every request with a fixed path
    struct Fixed(&'static str);

    impl TemplateRoutes for Fixed {
        fn resolve_archive(&self, _content_type: &str) -> Result<Option<PathBuf>> {
            Ok(Some(PathBuf::from(self.0)))
        }

        fn resolve_single(&self, _content_type: &str) -> Result<Option<PathBuf>> {
            Ok(Some(PathBuf::from(self.0)))
        }

        fn resolve_taxonomy(&self, _taxonomy: &str) -> Result<Option<PathBuf>> {
            Ok(None)
        }

        fn rewrite_query(&self, query: &mut MainQuery) {
            let mut types = query.content_types().to_vec();
            types.push(self.0.to_string());
            query.set_content_types(types);
        }
    }

    #[test]
    fn test_empty_table_keeps_default() {
        let table = RoutingTable::new();
        assert!(table.is_empty());
        let template = table
            .template_for(&TemplateRequest::Archive("blog".into()), "index.php".into())
            .unwrap();
        assert_eq!(template, PathBuf::from("index.php"));
    }

    #[test]
    fn test_higher_priority_answer_wins() {
        let mut table = RoutingTable::new();
        table
            .register_with(
                Arc::new(Fixed("late.php")),
                RoutePriorities {
                    single: 999,
                    ..RoutePriorities::default()
                },
            )
            .register_with(
                Arc::new(Fixed("early.php")),
                RoutePriorities {
                    single: 10,
                    ..RoutePriorities::default()
                },
            );

        let template = table
            .template_for(&TemplateRequest::Single("blog".into()), "single.php".into())
            .unwrap();
        assert_eq!(template, PathBuf::from("late.php"));
    }

    #[test]
    fn test_ties_run_in_registration_order() {
        let mut table = RoutingTable::new();
        table
            .register(Arc::new(Fixed("first.php")))
            .register(Arc::new(Fixed("second.php")));
        assert_eq!(table.len(), 2);

        let template = table
            .template_for(&TemplateRequest::Archive("blog".into()), "archive.php".into())
            .unwrap();
        assert_eq!(template, PathBuf::from("second.php"));

        let mut query = MainQuery::default();
        table.prepare_query(&mut query);
        assert_eq!(query.content_types(), ["first.php", "second.php"]);
    }

    #[test]
    fn test_unanswered_hook_keeps_default() {
        let mut table = RoutingTable::new();
        table.register(Arc::new(Fixed("ignored.php")));

        let template = table
            .template_for(&TemplateRequest::Taxonomy("topic".into()), "taxonomy.php".into())
            .unwrap();
        assert_eq!(template, PathBuf::from("taxonomy.php"));

        let other = table
            .template_for(&TemplateRequest::Other, "index.php".into())
            .unwrap();
        assert_eq!(other, PathBuf::from("index.php"));
    }
}
