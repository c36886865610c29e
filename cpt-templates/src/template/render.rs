//! Rendering of resolved template files

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use minijinja::{Environment, ErrorKind};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format applied by the `date` filter when none is given (`01.05.2024`)
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Errors that can occur when rendering a template file
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to read template '{}': {source}", path.display())]
    ReadFailed {
        /// Resolved template path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Template compilation or rendering failed
    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),
}

/// A published item handed to listing and single templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Title
    pub title: String,
    /// Short summary
    #[serde(default)]
    pub excerpt: String,
    /// Canonical URL
    pub permalink: String,
    /// Publication time
    pub published: DateTime<Utc>,
    /// Featured image URL
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Variables available to a template
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext<'a> {
    /// Items to render, in display order
    pub posts: &'a [Post],
    /// Content type of the request, if any
    pub content_type: Option<&'a str>,
    /// Taxonomy of the request, if any
    pub taxonomy: Option<&'a str>,
}

/// Thread-safe renderer for resolved template files
///
/// Templates are compiled on first use and cached by path. `reload` drops
/// the cache for development hot-reload.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    env: Arc<RwLock<Environment<'static>>>,
    date_format: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a renderer using [`DEFAULT_DATE_FORMAT`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_date_format(DEFAULT_DATE_FORMAT)
    }

    /// Create a renderer whose `date` filter defaults to `format`
    #[must_use]
    pub fn with_date_format(format: impl Into<String>) -> Self {
        let date_format = format.into();
        Self {
            env: Arc::new(RwLock::new(Self::create_environment(&date_format))),
            date_format,
        }
    }

    fn create_environment(date_format: &str) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        let default_format = date_format.to_string();
        env.add_filter(
            "date",
            move |value: String, format: Option<String>| -> Result<String, minijinja::Error> {
                format_date(&value, format.as_deref().unwrap_or(&default_format))
            },
        );
        env
    }

    /// Render the template at `path`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or rendering fails.
    pub fn render(&self, path: &Path, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
        let name = path.to_string_lossy().into_owned();

        {
            let env = self.env.read();
            if let Ok(tmpl) = env.get_template(&name) {
                return tmpl.render(ctx).map_err(Into::into);
            }
        }

        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let mut env = self.env.write();
        env.add_template_owned(name.clone(), source)?;
        tracing::debug!(template = %name, "Compiled template");

        let rendered = env.get_template(&name)?.render(ctx)?;
        Ok(rendered)
    }

    /// Drop all compiled templates
    ///
    /// Atomically swaps in a fresh environment; the next render reads from
    /// disk again.
    pub fn reload(&self) {
        let fresh = Self::create_environment(&self.date_format);
        *self.env.write() = fresh;
        tracing::debug!("Template cache cleared");
    }
}

fn format_date(value: &str, format: &str) -> Result<String, minijinja::Error> {
    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("'{value}' is not an RFC 3339 timestamp: {e}"),
        )
    })?;

    let mut out = String::new();
    write!(out, "{}", parsed.format(format)).map_err(|_| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format '{format}'"),
        )
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn sample_posts() -> Vec<Post> {
        vec![Post {
            title: "Hello".to_string(),
            excerpt: "First post".to_string(),
            permalink: "/blog/hello".to_string(),
            published: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            thumbnail: None,
        }]
    }

    #[test]
    fn test_render_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive-blog.txt");
        fs::write(
            &path,
            "{% for post in posts %}{{ post.title }} {{ post.published | date }}\n{% endfor %}",
        )
        .unwrap();

        let posts = sample_posts();
        let ctx = RenderContext {
            posts: &posts,
            content_type: Some("blog"),
            taxonomy: None,
        };
        let out = TemplateRenderer::new().render(&path, &ctx).unwrap();
        assert_eq!(out, "Hello 01.05.2024\n");
    }

    #[test]
    fn test_date_filter_custom_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single-blog.txt");
        fs::write(&path, "{{ posts[0].published | date('%Y-%m-%d') }}").unwrap();

        let posts = sample_posts();
        let ctx = RenderContext {
            posts: &posts,
            ..RenderContext::default()
        };
        let out = TemplateRenderer::new().render(&path, &ctx).unwrap();
        assert_eq!(out, "2024-05-01");
    }

    #[test]
    fn test_missing_file() {
        let err = TemplateRenderer::new()
            .render(Path::new("/nonexistent/archive-blog.php"), &RenderContext::default())
            .unwrap_err();
        assert!(matches!(err, TemplateError::ReadFailed { .. }));
    }

    #[test]
    fn test_cache_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy-topic.txt");
        fs::write(&path, "v1").unwrap();

        let renderer = TemplateRenderer::new();
        let ctx = RenderContext::default();
        assert_eq!(renderer.render(&path, &ctx).unwrap(), "v1");

        fs::write(&path, "v2").unwrap();
        assert_eq!(renderer.render(&path, &ctx).unwrap(), "v1");

        renderer.reload();
        assert_eq!(renderer.render(&path, &ctx).unwrap(), "v2");
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        assert!(format_date("yesterday", DEFAULT_DATE_FORMAT).is_err());
    }
}
