//! Error types for scaffold generation
//!
//! All variants are generation-time failures. Generation is all-or-nothing:
//! any error aborts the run before a single file is surfaced, so a partial
//! or internally-inconsistent module can never be written to disk.

use thiserror::Error;

/// Scaffold generation error
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Resource name is not a usable identifier
    #[error("Invalid resource name '{name}': {reason}")]
    InvalidName {
        /// The offending name as supplied
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Field name is not a usable identifier
    #[error("Invalid field name '{name}': {reason}")]
    InvalidFieldName {
        /// The offending name as supplied
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Field name collides with a column the generator adds itself
    #[error("Field '{0}' is reserved: id, created_at and updated_at are added automatically")]
    ReservedField(String),

    /// Two fields share a name
    #[error("Duplicate field '{0}'")]
    DuplicateField(String),

    /// Field type token was not recognized
    #[error("Unknown field type '{ty}' for field '{field}'")]
    UnknownFieldType {
        /// Field the type was declared on
        field: String,
        /// The unrecognized type token
        ty: String,
    },

    /// No fields were supplied
    #[error("At least one field must be specified")]
    EmptyFields,

    /// Field spec string did not match `name:type[:optional]`
    #[error("Malformed field spec '{0}': expected name:type[:optional]")]
    MalformedFieldSpec(String),

    /// A template failed to parse at registration time
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// A template failed to render
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Rendered artifacts disagree with the shared symbol table
    #[error("Generated artifacts failed consistency check:\n{0}")]
    Consistency(String),
}

impl From<handlebars::TemplateError> for ScaffoldError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}
