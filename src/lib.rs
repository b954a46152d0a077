//! crudcraft library
//!
//! Generates the frontend half of a CRUD resource: given a resource name and
//! an ordered list of typed fields, it emits TypeScript type declarations, a
//! Vue data-access composable and a Pinia store whose identifiers, types and
//! call relationships are guaranteed to agree with each other.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod error;
pub mod scaffold;

pub use error::ScaffoldError;
pub use scaffold::{
    FieldDefinition, FieldType, GeneratedFile, NameSet, ResourceSpec, ScaffoldGenerator,
    TemplateHelpers, TemplateRegistry,
};
