//! CLI command implementations

mod check;
mod render;
mod resolve;

pub use check::CheckCommand;
pub use render::RenderCommand;
pub use resolve::ResolveCommand;

use std::path::Path;

use anyhow::{Context, Result};
use cpt_templates::config::CptTemplatesConfig;
use cpt_templates::routing::TemplateRequest;
use cpt_templates::site::Site;

/// Request kind accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestKind {
    /// Archive listing of a content type
    Archive,
    /// Single item of a content type
    Single,
    /// Listing of a taxonomy
    Taxonomy,
}

impl RequestKind {
    /// Build the request for `slug`
    pub fn request(self, slug: String) -> TemplateRequest {
        match self {
            Self::Archive => TemplateRequest::Archive(slug),
            Self::Single => TemplateRequest::Single(slug),
            Self::Taxonomy => TemplateRequest::Taxonomy(slug),
        }
    }
}

/// Load the configuration at `path` and assemble the site
fn load_site(path: &Path) -> Result<Site> {
    let config = CptTemplatesConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Site::from_config(&config).context("Failed to set up content types and taxonomies")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind() {
        assert_eq!(
            RequestKind::Taxonomy.request("topic".to_string()),
            TemplateRequest::Taxonomy("topic".to_string())
        );
    }

    #[test]
    fn test_load_site_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpt.toml");
        std::fs::write(&path, "[[groups]]\ntheme_overloading = \"maybe\"").unwrap();

        let err = load_site(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
