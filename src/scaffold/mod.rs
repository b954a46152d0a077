//! CRUD scaffold generation
//!
//! One resource description flows once through name derivation and type
//! mapping into a shared symbol table; three renderers consume that table to
//! produce the type declarations, data-access composable and Pinia store of
//! a frontend module, and the result is checked against the consistency
//! contract before it is handed back.

pub mod field_type;
pub mod generator;
pub mod helpers;
pub mod templates;
pub mod verify;

pub use field_type::{FieldDefinition, FieldType, RESERVED_FIELD_NAMES};
pub use generator::{GeneratedFile, ResourceSpec, ScaffoldGenerator};
pub use helpers::{NameSet, TemplateHelpers};
pub use templates::TemplateRegistry;
