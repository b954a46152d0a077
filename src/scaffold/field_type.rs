//! Field type system for CRUD scaffolding
//!
//! A field carries a semantic type, not a target-language type: the mapping
//! to TypeScript syntax lives in exactly one place (`FieldType::ts_type`) so
//! no renderer can hardcode a diverging token.

use crate::error::ScaffoldError;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;

/// Field names the generator reserves for itself.
///
/// The entity type always ends with `created_at`/`updated_at` and always
/// starts with `id`; user fields must not redeclare them.
pub const RESERVED_FIELD_NAMES: [&str; 3] = ["id", "created_at", "updated_at"];

/// Semantic field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text
    String,
    /// Numeric value (integers and floats collapse to one target type)
    Number,
    /// True/false flag
    Boolean,
    /// Point in time, carried on the wire as an ISO-8601 string
    Date,
    /// Numeric identifier of another resource
    Reference,
}

impl FieldType {
    /// Parse a type token as it appears in field specs and schema files.
    ///
    /// Accepts the aliases users actually write (`text`, `int`, `datetime`,
    /// `references`, ...). Returns `None` for unknown tokens; unknown types
    /// are a hard error upstream, never a silent default.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "string" | "text" => Some(Self::String),
            "number" | "int" | "integer" | "float" => Some(Self::Number),
            "bool" | "boolean" => Some(Self::Boolean),
            "date" | "datetime" | "time" => Some(Self::Date),
            "reference" | "references" => Some(Self::Reference),
            _ => None,
        }
    }

    /// TypeScript type token for this field type.
    ///
    /// This table is the single source of truth consulted by every artifact.
    #[must_use]
    pub const fn ts_type(self) -> &'static str {
        match self {
            Self::String | Self::Date => "string",
            Self::Number | Self::Reference => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether the field participates in free-text search.
    ///
    /// Only `String` qualifies. `Date` shares the `string` target token but
    /// is not searchable: the decision is made on the semantic type, never
    /// on the rendered token.
    #[must_use]
    pub const fn is_searchable(self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Reference => "reference",
        };
        write!(f, "{name}")
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).ok_or_else(|| {
            de::Error::custom(format!(
                "unknown field type '{token}'; expected one of: string, number, boolean, date, reference"
            ))
        })
    }
}

/// One field of a resource
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    /// Field name (snake_case identifier)
    pub name: String,
    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional fields render with a `?` marker in Entity and Create
    #[serde(default)]
    pub optional: bool,
}

impl FieldDefinition {
    /// Parse a CLI field spec of the form `name:type` or `name:type:optional`.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec is malformed, the name is not a valid
    /// identifier, or the type token is unknown.
    pub fn parse(spec: &str) -> Result<Self, ScaffoldError> {
        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default();
        let Some(ty) = parts.next() else {
            return Err(ScaffoldError::MalformedFieldSpec(spec.to_string()));
        };

        let optional = match parts.next() {
            None => false,
            Some("optional") => true,
            Some(_) => return Err(ScaffoldError::MalformedFieldSpec(spec.to_string())),
        };
        if parts.next().is_some() {
            return Err(ScaffoldError::MalformedFieldSpec(spec.to_string()));
        }

        validate_field_name(name)?;
        let field_type =
            FieldType::parse(ty).ok_or_else(|| ScaffoldError::UnknownFieldType {
                field: name.to_string(),
                ty: ty.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            field_type,
            optional,
        })
    }
}

/// Validate that a field name is a snake_case ASCII identifier.
///
/// # Errors
///
/// Returns `ScaffoldError::InvalidFieldName` describing the violation.
pub fn validate_field_name(name: &str) -> Result<(), ScaffoldError> {
    if name.is_empty() {
        return Err(ScaffoldError::InvalidFieldName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    let first = name.chars().next().unwrap_or('0');
    if !first.is_ascii_lowercase() && first != '_' {
        return Err(ScaffoldError::InvalidFieldName {
            name: name.to_string(),
            reason: "must start with a lowercase letter or underscore".to_string(),
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ScaffoldError::InvalidFieldName {
            name: name.to_string(),
            reason: "only lowercase letters, digits and underscores are allowed".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_aliases() {
        assert_eq!(FieldType::parse("string"), Some(FieldType::String));
        assert_eq!(FieldType::parse("text"), Some(FieldType::String));
        assert_eq!(FieldType::parse("int"), Some(FieldType::Number));
        assert_eq!(FieldType::parse("float"), Some(FieldType::Number));
        assert_eq!(FieldType::parse("bool"), Some(FieldType::Boolean));
        assert_eq!(FieldType::parse("datetime"), Some(FieldType::Date));
        assert_eq!(FieldType::parse("references"), Some(FieldType::Reference));
        assert_eq!(FieldType::parse("uuid"), None);
    }

    #[test]
    fn test_ts_type_table() {
        assert_eq!(FieldType::String.ts_type(), "string");
        assert_eq!(FieldType::Number.ts_type(), "number");
        assert_eq!(FieldType::Boolean.ts_type(), "boolean");
        assert_eq!(FieldType::Date.ts_type(), "string");
        assert_eq!(FieldType::Reference.ts_type(), "number");
    }

    #[test]
    fn test_only_strings_are_searchable() {
        assert!(FieldType::String.is_searchable());
        assert!(!FieldType::Number.is_searchable());
        assert!(!FieldType::Boolean.is_searchable());
        // Date maps to the `string` token but must not be searched.
        assert!(!FieldType::Date.is_searchable());
        assert!(!FieldType::Reference.is_searchable());
    }

    #[test]
    fn test_parse_field_spec() {
        let field = FieldDefinition::parse("title:string").unwrap();
        assert_eq!(field.name, "title");
        assert_eq!(field.field_type, FieldType::String);
        assert!(!field.optional);

        let field = FieldDefinition::parse("due_date:datetime:optional").unwrap();
        assert_eq!(field.name, "due_date");
        assert_eq!(field.field_type, FieldType::Date);
        assert!(field.optional);
    }

    #[test]
    fn test_parse_field_spec_errors() {
        assert!(matches!(
            FieldDefinition::parse("title"),
            Err(ScaffoldError::MalformedFieldSpec(_))
        ));
        assert!(matches!(
            FieldDefinition::parse("title:string:unique"),
            Err(ScaffoldError::MalformedFieldSpec(_))
        ));
        assert!(matches!(
            FieldDefinition::parse("title:varchar"),
            Err(ScaffoldError::UnknownFieldType { .. })
        ));
        assert!(matches!(
            FieldDefinition::parse("Title:string"),
            Err(ScaffoldError::InvalidFieldName { .. })
        ));
        assert!(matches!(
            FieldDefinition::parse("my field:string"),
            Err(ScaffoldError::InvalidFieldName { .. })
        ));
    }

    #[test]
    fn test_schema_deserialization() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{ "name": "title", "type": "string" }"#).unwrap();
        assert_eq!(field.name, "title");
        assert!(!field.optional);

        let field: FieldDefinition =
            serde_json::from_str(r#"{ "name": "done", "type": "bool", "optional": true }"#)
                .unwrap();
        assert_eq!(field.field_type, FieldType::Boolean);
        assert!(field.optional);

        let err = serde_json::from_str::<FieldDefinition>(
            r#"{ "name": "x", "type": "decimal" }"#,
        );
        assert!(err.is_err());
    }
}
