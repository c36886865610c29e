//! Error types and error handling

use std::fmt;

use thiserror::Error;

use crate::content::RegistrationError;
use crate::template::TemplateError;

/// Which one-time slot of a resolver a binding targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// The content type slot
    ContentType,
    /// The taxonomy slot
    Taxonomy,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentType => f.write_str("content type"),
            Self::Taxonomy => f.write_str("taxonomy"),
        }
    }
}

/// Library error type
#[derive(Debug, Error)]
pub enum CptTemplatesError {
    /// A second content type or taxonomy was bound to one resolver
    #[error("only one {0} per resolver is allowed; create a new resolver instead")]
    AlreadyBound(BindingKind),

    /// The taxonomy slug is already registered
    #[error("taxonomy '{0}' exists already")]
    DuplicateTaxonomy(String),

    /// A taxonomy could not be associated with one of its content types
    #[error("unable to register taxonomy '{taxonomy}' for content type '{content_type}'")]
    Association {
        /// Taxonomy slug
        taxonomy: String,
        /// Content type slug that refused the association
        content_type: String,
    },

    /// The registration collaborator rejected the request
    #[error("registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// Template name was empty or contained a path separator
    #[error("invalid template name '{0}'")]
    InvalidTemplateName(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Template rendering failed
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl From<figment::Error> for CptTemplatesError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Convenience result alias
pub type Result<T, E = CptTemplatesError> = std::result::Result<T, E>;
