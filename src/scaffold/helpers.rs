//! Name derivation helpers
//!
//! Every identifier the three artifacts share is derived exactly once, here.
//! Renderers consume the resulting [`NameSet`] and never re-pluralize or
//! re-case on their own; that is what keeps independently rendered files in
//! agreement.

use crate::error::ScaffoldError;
use convert_case::{Case, Casing};

/// Irregular plural overrides, lowercase singular to lowercase plural.
///
/// Pluralization is not invertible; the generator never attempts to derive
/// a singular from a plural.
const IRREGULAR_PLURALS: [(&str, &str); 8] = [
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
];

/// Casing and pluralization transforms shared by the generator
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert a word to its plural form.
    ///
    /// Irregular nouns come from an explicit override list; everything else
    /// follows suffix rules: `s`/`x`/`ch`/`sh` append `es`, a trailing `z`
    /// doubles before `es`, a consonant followed by `y` becomes `ies`, and
    /// the default appends `s`. A vowel followed by `y` takes a plain `s`
    /// (`Key` pluralizes to `Keys`).
    #[must_use]
    pub fn pluralize(word: &str) -> String {
        let lower = word.to_lowercase();
        for (singular, plural) in IRREGULAR_PLURALS {
            if lower == singular {
                return match_capitalization(word, plural);
            }
        }

        if lower.ends_with('z') {
            return format!("{word}zes");
        }

        if lower.ends_with('s')
            || lower.ends_with('x')
            || lower.ends_with("ch")
            || lower.ends_with("sh")
        {
            return format!("{word}es");
        }

        if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
            let stem = &word[..word.len() - 1];
            return format!("{stem}ies");
        }

        format!("{word}s")
    }

    /// Convert a `PascalCase` identifier to lowerCamelCase.
    ///
    /// The input is parsed as Pascal case so only uppercase letters split
    /// words; a digit inside a name (`Task2`) is not a word boundary.
    #[must_use]
    pub fn to_lower_camel(s: &str) -> String {
        s.from_case(Case::Pascal).to_case(Case::Camel)
    }
}

/// True when the word ends in a vowel followed by `y` (e.g. `key`, `day`).
fn ends_with_vowel_y(lower: &str) -> bool {
    let mut chars = lower.chars().rev();
    if chars.next() != Some('y') {
        return false;
    }
    matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

/// Re-apply the capitalization of the source word to an override plural.
fn match_capitalization(source: &str, plural: &str) -> String {
    if source.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = plural.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().collect::<String>() + chars.as_str()
        })
    } else {
        plural.to_string()
    }
}

/// The four identifier variants every artifact derives its names from.
///
/// Computed once per generation run and read-only thereafter. Both plural
/// forms come from the same pluralization decision so the PascalCase and
/// lowerCamelCase plurals always denote the same word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    /// `Task`, `UserProfile`
    pub pascal_singular: String,
    /// `Tasks`, `UserProfiles`
    pub pascal_plural: String,
    /// `task`, `userProfile`
    pub lower_singular: String,
    /// `tasks`, `userProfiles`
    pub lower_plural: String,
}

impl NameSet {
    /// Derive all casing/pluralization variants from a `PascalCase` base name.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::InvalidName` when the base name is empty, not
    /// ASCII-alphanumeric, or does not start with an uppercase letter.
    pub fn derive(base_name: &str) -> Result<Self, ScaffoldError> {
        validate_resource_name(base_name)?;

        let pascal_singular = base_name.to_string();
        let pascal_plural = TemplateHelpers::pluralize(base_name);
        let lower_singular = TemplateHelpers::to_lower_camel(&pascal_singular);
        // Derived from the already-pluralized Pascal form, never re-pluralized.
        let lower_plural = TemplateHelpers::to_lower_camel(&pascal_plural);

        Ok(Self {
            pascal_singular,
            pascal_plural,
            lower_singular,
            lower_plural,
        })
    }
}

fn validate_resource_name(name: &str) -> Result<(), ScaffoldError> {
    if name.is_empty() {
        return Err(ScaffoldError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    if !name.chars().next().unwrap_or('0').is_ascii_uppercase() {
        return Err(ScaffoldError::InvalidName {
            name: name.to_string(),
            reason: "must be PascalCase (start with an uppercase letter)".to_string(),
        });
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ScaffoldError::InvalidName {
            name: name.to_string(),
            reason: "only ASCII letters and digits are allowed".to_string(),
        });
    }

    Ok(())
}
