//! Configuration management for cpt-templates
//!
//! A site configuration declares the theme search path and one group per
//! resolver (a content type, its taxonomy and where their bundled templates
//! live). Sources are merged with clear precedence:
//!
//! 1. Environment variables (highest priority, `CPT_` prefix, `__` for nesting)
//! 2. The TOML file passed to [`CptTemplatesConfig::load`]
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! [theme]
//! directories = ["./themes/child", "./themes/parent"]
//! user_overrides = false
//!
//! [[groups]]
//! template_dir = "./templates"
//! theme_overloading = true
//! capture_archive = true
//! capture_single = true
//!
//! [groups.content_type]
//! slug = "blog"
//! public = true
//! has_archive = true
//! supports = ["title", "editor", "thumbnail", "excerpt"]
//!
//! [groups.taxonomy]
//! slug = "topic"
//! object_types = ["blog"]
//! hierarchical = true
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::content::{ContentTypeArgs, TaxonomyArgs};
use crate::error::Result;
use crate::resolver::DEFAULT_TEMPLATE_DIRECTORY;
use crate::template::{DEFAULT_DATE_FORMAT, DEFAULT_TEMPLATE_EXTENSION};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CPT_";

/// Theme search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Theme directories, active (child) theme first
    pub directories: Vec<PathBuf>,

    /// Also search `$XDG_CONFIG_HOME/{app_name}/templates/`
    pub user_overrides: bool,

    /// Application name used for the user override directory
    pub app_name: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            user_overrides: false,
            app_name: "cpt-templates".to_string(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Default format of the `date` filter
    pub date_format: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// A content type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDefinition {
    /// Unique slug
    pub slug: String,
    /// Registration arguments
    #[serde(flatten)]
    pub args: ContentTypeArgs,
}

/// A taxonomy declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyDefinition {
    /// Unique slug
    pub slug: String,
    /// Content types to attach to
    #[serde(default)]
    pub object_types: Vec<String>,
    /// Registration arguments
    #[serde(flatten)]
    pub args: TaxonomyArgs,
}

/// One resolver: a content type, its taxonomy and template settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    /// Directory holding the bundled templates
    pub template_dir: String,

    /// Let theme templates take precedence
    pub theme_overloading: bool,

    /// Extension of derived template names
    pub template_extension: String,

    /// Route archive and taxonomy listings through this group
    pub capture_archive: bool,

    /// Route single item views through this group
    pub capture_single: bool,

    /// Content type to register
    pub content_type: Option<ContentTypeDefinition>,

    /// Taxonomy to register
    pub taxonomy: Option<TaxonomyDefinition>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            template_dir: DEFAULT_TEMPLATE_DIRECTORY.to_string(),
            theme_overloading: true,
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            capture_archive: false,
            capture_single: false,
            content_type: None,
            taxonomy: None,
        }
    }
}

/// Complete cpt-templates configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CptTemplatesConfig {
    /// Theme search settings
    #[serde(default)]
    pub theme: ThemeSettings,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Resolver groups
    #[serde(default)]
    pub groups: Vec<GroupSettings>,
}

impl CptTemplatesConfig {
    /// Load configuration from a TOML file, then environment overrides
    ///
    /// A missing file yields defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns error if the file or an environment value is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = Self::figment(path).extract()?;

        tracing::debug!(
            path = %path.display(),
            groups = config.groups.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?;
        Ok(config)
    }

    /// The layered figment used by [`load`](Self::load)
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[theme]
directories = ["./theme"]

[[groups]]
template_dir = "./templates"
theme_overloading = false
capture_archive = true
capture_single = true

[groups.content_type]
slug = "blog"
public = true
has_archive = true
supports = ["title", "editor", "thumbnail", "excerpt"]
menu_position = 0

[groups.taxonomy]
slug = "topic"
object_types = ["blog"]
hierarchical = true
"#;

    #[test]
    fn test_defaults() {
        let config = CptTemplatesConfig::default();
        assert!(config.theme.directories.is_empty());
        assert!(!config.theme.user_overrides);
        assert_eq!(config.render.date_format, DEFAULT_DATE_FORMAT);
        assert!(config.groups.is_empty());

        let group = GroupSettings::default();
        assert!(group.theme_overloading);
        assert_eq!(group.template_dir, "./");
        assert_eq!(group.template_extension, "php");
    }

    #[test]
    fn test_parse_sample() {
        let config = CptTemplatesConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.theme.directories, vec![PathBuf::from("./theme")]);
        assert_eq!(config.groups.len(), 1);

        let group = &config.groups[0];
        assert!(!group.theme_overloading);
        assert!(group.capture_archive);
        assert_eq!(group.template_extension, "php");

        let content_type = group.content_type.as_ref().unwrap();
        assert_eq!(content_type.slug, "blog");
        assert!(content_type.args.public);
        assert!(content_type.args.has_archive);
        assert_eq!(content_type.args.menu_position, Some(0));
        assert_eq!(content_type.args.supports.len(), 4);

        let taxonomy = group.taxonomy.as_ref().unwrap();
        assert_eq!(taxonomy.object_types, vec!["blog".to_string()]);
        assert!(taxonomy.args.hierarchical);
        assert!(taxonomy.args.public);
    }

    #[test]
    fn test_toml_crate_agrees() {
        let via_toml: CptTemplatesConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(via_toml, CptTemplatesConfig::from_toml_str(SAMPLE).unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpt.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = CptTemplatesConfig::load(&path).unwrap();
        assert_eq!(config.groups.len(), 1);
    }

    #[test]
    fn test_malformed_config() {
        assert!(CptTemplatesConfig::from_toml_str("[[groups]]\ntheme_overloading = \"maybe\"").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("cpt.toml", SAMPLE)?;
            jail.set_env("CPT_RENDER__DATE_FORMAT", "%Y");

            let config: CptTemplatesConfig =
                CptTemplatesConfig::figment(Path::new("cpt.toml")).extract()?;
            assert_eq!(config.render.date_format, "%Y");
            assert_eq!(config.groups.len(), 1);
            Ok(())
        });
    }
}
