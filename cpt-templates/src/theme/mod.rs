//! Theme template lookup
//!
//! The override search collaborator used by the resolver. Given candidate
//! template names, a [`TemplateLocator`] returns the first one the active
//! theme provides.
//!
//! [`ThemeDirectories`] searches an ordered list of directories:
//! 1. The active (child) theme
//! 2. Parent themes, in order
//! 3. Optionally, user customizations in `$XDG_CONFIG_HOME/{app}/templates/`
//!
//! # Example
//!
//! ```rust
//! use cpt_templates::theme::{TemplateLocator, ThemeDirectories};
//!
//! let theme = ThemeDirectories::new(["./themes/child", "./themes/parent"]);
//! if let Some(path) = theme.locate(&["archive-blog.php"]) {
//!     println!("theme provides {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Override search collaborator
pub trait TemplateLocator: Send + Sync {
    /// Return the path of the first candidate the theme provides
    fn locate(&self, candidates: &[&str]) -> Option<PathBuf>;
}

/// Locator that never finds an override
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThemeOverrides;

impl TemplateLocator for NoThemeOverrides {
    fn locate(&self, _candidates: &[&str]) -> Option<PathBuf> {
        None
    }
}

/// Filesystem locator over an ordered list of theme directories
#[derive(Debug, Clone, Default)]
pub struct ThemeDirectories {
    directories: Vec<PathBuf>,
}

impl ThemeDirectories {
    /// Create a locator searching `directories` in order
    #[must_use]
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a directory searched after the existing ones
    #[must_use]
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Append the per-user customization directory for `app`
    ///
    /// No-op when the home directory cannot be determined.
    #[must_use]
    pub fn with_user_overrides(self, app: &str) -> Self {
        match Self::user_dir(app) {
            Some(dir) => self.with_directory(dir),
            None => self,
        }
    }

    /// Get the XDG config directory for user template customizations
    ///
    /// Returns `$XDG_CONFIG_HOME/{app}/templates/` or
    /// `~/.config/{app}/templates/` if not set.
    #[must_use]
    pub fn user_dir(app: &str) -> Option<PathBuf> {
        let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg)
        } else {
            dirs::home_dir()?.join(".config")
        };
        Some(base.join(app).join("templates"))
    }

    /// Directories in search order
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    fn find_in(dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(name);
        path.is_file().then_some(path)
    }
}

impl TemplateLocator for ThemeDirectories {
    fn locate(&self, candidates: &[&str]) -> Option<PathBuf> {
        for name in candidates {
            for dir in &self.directories {
                if let Some(path) = Self::find_in(dir, name) {
                    tracing::trace!(template = name, path = %path.display(), "Theme override found");
                    return Some(path);
                }
            }
        }
        None
    }
}
