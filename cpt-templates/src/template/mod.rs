//! Logical template names and rendering
//!
//! Request-time hooks derive a logical template name from a slug:
//!
//! | Request | Name |
//! |---|---|
//! | archive listing of content type `X` | `archive-X.{ext}` |
//! | single item of content type `X` | `single-X.{ext}` |
//! | listing of taxonomy `Y` | `taxonomy-Y.{ext}` |
//!
//! A logical name is only a lookup key; the file may not exist.

mod render;

pub use render::{Post, RenderContext, TemplateError, TemplateRenderer, DEFAULT_DATE_FORMAT};

use std::fmt;

/// Extension used for logical template names unless configured otherwise
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "php";

/// Kind of page a template renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Archive listing of a content type
    Archive,
    /// Single item of a content type
    Single,
    /// Listing of a taxonomy
    Taxonomy,
}

impl TemplateKind {
    /// Prefix of the logical template name
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Single => "single",
            Self::Taxonomy => "taxonomy",
        }
    }

    /// Logical template name for `slug`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpt_templates::template::TemplateKind;
    ///
    /// assert_eq!(TemplateKind::Archive.template_name("blog", "php"), "archive-blog.php");
    /// ```
    #[must_use]
    pub fn template_name(self, slug: &str, extension: &str) -> String {
        format!("{}-{slug}.{extension}", self.prefix())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Whether `name` can be used as a template file name
///
/// Rejects empty names and names containing a path separator.
#[must_use]
pub fn is_valid_template_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
