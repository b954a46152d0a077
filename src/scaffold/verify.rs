//! Cross-artifact consistency contract
//!
//! The three artifacts are rendered independently, so after rendering the
//! whole set is checked against the one symbol table it was rendered from:
//! every type the composable and store import must be declared in the types
//! file, every operation the store delegates to must be exported by the
//! composable, and paths and module ids must use the shared plural form.
//! A violated contract aborts the run; callers never see a partial set.

use super::generator::GeneratedFile;
use super::helpers::NameSet;
use crate::error::ScaffoldError;
use std::fmt::Write as _;

/// Check the consistency contract across a rendered file set.
///
/// # Errors
///
/// Returns `ScaffoldError::Consistency` listing every violation found.
pub fn verify(files: &[GeneratedFile], names: &NameSet) -> Result<(), ScaffoldError> {
    let mut violations = Vec::new();

    let Some(types) = find(files, "/types/") else {
        violations.push("missing types artifact".to_string());
        return Err(consistency(violations));
    };
    let Some(composable) = find(files, "/composables/") else {
        violations.push("missing composable artifact".to_string());
        return Err(consistency(violations));
    };
    let Some(store) = find(files, "/stores/") else {
        violations.push("missing store artifact".to_string());
        return Err(consistency(violations));
    };

    check_types(types, names, &mut violations);
    check_composable(composable, names, &mut violations);
    check_store(store, names, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(consistency(violations))
    }
}

fn find<'a>(files: &'a [GeneratedFile], segment: &str) -> Option<&'a GeneratedFile> {
    files
        .iter()
        .find(|f| f.path.to_string_lossy().contains(segment))
}

fn consistency(violations: Vec<String>) -> ScaffoldError {
    let mut message = String::new();
    for violation in violations {
        let _ = writeln!(message, "  - {violation}");
    }
    ScaffoldError::Consistency(message.trim_end().to_string())
}

/// Require that `content` contains `needle`, recording a violation otherwise.
fn expect(content: &str, needle: &str, artifact: &str, violations: &mut Vec<String>) {
    if !content.contains(needle) {
        violations.push(format!("{artifact} artifact is missing `{needle}`"));
    }
}

fn check_types(file: &GeneratedFile, names: &NameSet, violations: &mut Vec<String>) {
    let pascal = &names.pascal_singular;
    expect(&file.content, &format!("export interface {pascal} {{"), "types", violations);
    expect(
        &file.content,
        &format!("export interface {pascal}CreateRequest"),
        "types",
        violations,
    );
    expect(
        &file.content,
        &format!("export interface {pascal}UpdateRequest"),
        "types",
        violations,
    );
    expect(
        &file.content,
        &format!("export interface {pascal}ListResponse"),
        "types",
        violations,
    );
    expect(
        &file.content,
        &format!("{}: {pascal}[]", names.lower_plural),
        "types",
        violations,
    );

    let expected_path = format!(
        "app/{}/types/{}.ts",
        names.lower_plural, names.lower_singular
    );
    if file.path.to_string_lossy() != expected_path {
        violations.push(format!(
            "types artifact path `{}` does not match `{expected_path}`",
            file.path.display()
        ));
    }
}

fn check_composable(file: &GeneratedFile, names: &NameSet, violations: &mut Vec<String>) {
    let pascal = &names.pascal_singular;
    let plural = &names.pascal_plural;

    expect(
        &file.content,
        &format!("export function use{plural}()"),
        "composable",
        violations,
    );
    // The collection path is the contract with the backend; both the list
    // and the item routes must use the shared lowerCamel plural.
    expect(
        &file.content,
        &format!("'/{}'", names.lower_plural),
        "composable",
        violations,
    );
    expect(
        &file.content,
        &format!("'/{}/' + id", names.lower_plural),
        "composable",
        violations,
    );
    expect(
        &file.content,
        &format!("from '../types/{}'", names.lower_singular),
        "composable",
        violations,
    );

    for operation in [
        format!("fetch{plural}"),
        format!("fetch{pascal}"),
        format!("create{pascal}"),
        format!("update{pascal}"),
        format!("delete{pascal}"),
    ] {
        expect(&file.content, &format!("const {operation} = async"), "composable", violations);
    }
}

fn check_store(file: &GeneratedFile, names: &NameSet, violations: &mut Vec<String>) {
    let pascal = &names.pascal_singular;
    let plural = &names.pascal_plural;
    let lower_plural = &names.lower_plural;

    // The store's module id and its wiring to the composable both derive
    // from the same name set.
    expect(
        &file.content,
        &format!("defineStore('{lower_plural}'"),
        "store",
        violations,
    );
    expect(
        &file.content,
        &format!("from '../composables/use{plural}'"),
        "store",
        violations,
    );
    expect(
        &file.content,
        &format!("from '../types/{}'", names.lower_singular),
        "store",
        violations,
    );

    // Every delegation target must be an operation the composable exports.
    for operation in [
        format!("fetch{plural}"),
        format!("fetch{pascal}"),
        format!("create{pascal}"),
        format!("update{pascal}"),
        format!("delete{pascal}"),
    ] {
        expect(
            &file.content,
            &format!("{lower_plural}Api.{operation}("),
            "store",
            violations,
        );
    }

    let expected_path = format!("app/{lower_plural}/stores/{lower_plural}.ts");
    if file.path.to_string_lossy() != expected_path {
        violations.push(format!(
            "store artifact path `{}` does not match `{expected_path}`",
            file.path.display()
        ));
    }
}
