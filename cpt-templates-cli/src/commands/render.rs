//! Render command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cpt_templates::routing::TemplateRequest;
use cpt_templates::template::Post;

use super::load_site;

/// Render a request with posts read from a JSON file
#[derive(Debug)]
pub struct RenderCommand {
    config: PathBuf,
    request: TemplateRequest,
    posts: Option<PathBuf>,
    default: PathBuf,
}

impl RenderCommand {
    /// Create a render command
    pub const fn new(
        config: PathBuf,
        request: TemplateRequest,
        posts: Option<PathBuf>,
        default: PathBuf,
    ) -> Self {
        Self {
            config,
            request,
            posts,
            default,
        }
    }

    /// Execute the render command
    ///
    /// # Errors
    ///
    /// Returns an error if the posts file is unreadable or rendering fails.
    pub fn execute(self) -> Result<()> {
        let site = load_site(&self.config)?;
        let posts = match &self.posts {
            Some(path) => read_posts(path)?,
            None => Vec::new(),
        };

        let html = site
            .render(&self.request, self.default, &posts)
            .context("Failed to render template")?;
        println!("{html}");
        Ok(())
    }
}

fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read posts from {}", path.display()))?;
    let posts: Vec<Post> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse posts in {}", path.display()))?;
    tracing::debug!(count = posts.len(), "Loaded posts");
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_posts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[{"title":"Hello","permalink":"/blog/hello","published":"2024-05-01T10:00:00Z"}]"#,
        )
        .unwrap();

        let posts = read_posts(&path).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello");
        assert!(posts[0].thumbnail.is_none());
    }

    #[test]
    fn test_read_posts_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(read_posts(&path).is_err());
    }
}
