//! Scaffold generator orchestrator
//!
//! Turns one validated resource description into the three artifacts of a
//! frontend CRUD module: type declarations, a data-access composable and a
//! Pinia store. The name set and type tokens are computed exactly once into
//! a shared symbol table; each renderer consumes that table unchanged, which
//! is what guarantees the files agree on every identifier.

use super::field_type::{validate_field_name, FieldDefinition, RESERVED_FIELD_NAMES};
use super::helpers::NameSet;
use super::templates::{self, TemplateRegistry};
use super::verify;
use crate::error::ScaffoldError;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;

/// Declarative description of one resource, as supplied by the schema source
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSpec {
    /// Base name in singular `PascalCase` form (e.g. `Task`, `UserProfile`)
    pub name: String,
    /// Ordered field list; declaration order is preserved in every artifact
    pub fields: Vec<FieldDefinition>,
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from the frontend root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// CRUD scaffold generator
pub struct ScaffoldGenerator {
    names: NameSet,
    fields: Vec<FieldDefinition>,
    templates: TemplateRegistry,
}

impl ScaffoldGenerator {
    /// Create a generator from an already-assembled resource description.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource name is not `PascalCase`
    /// alphanumeric, the field list is empty, a field name is reserved
    /// (`id`, `created_at`, `updated_at`) or duplicated, or a template
    /// fails to parse.
    pub fn new(resource: ResourceSpec) -> Result<Self, ScaffoldError> {
        let names = NameSet::derive(&resource.name)?;

        if resource.fields.is_empty() {
            return Err(ScaffoldError::EmptyFields);
        }

        let mut seen = HashSet::new();
        for field in &resource.fields {
            // Schema files bypass FieldDefinition::parse, so names are
            // (re-)validated here for both input paths.
            validate_field_name(&field.name)?;
            if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
                return Err(ScaffoldError::ReservedField(field.name.clone()));
            }
            if !seen.insert(field.name.clone()) {
                return Err(ScaffoldError::DuplicateField(field.name.clone()));
            }
        }

        let templates = TemplateRegistry::new()?;

        Ok(Self {
            names,
            fields: resource.fields,
            templates,
        })
    }

    /// Create a generator from CLI-style field specs (`name:type[:optional]`).
    ///
    /// # Errors
    ///
    /// Returns an error if any field spec is malformed or the assembled
    /// resource fails validation.
    pub fn from_args(model: &str, field_specs: &[String]) -> Result<Self, ScaffoldError> {
        let fields = field_specs
            .iter()
            .map(|spec| FieldDefinition::parse(spec))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(ResourceSpec {
            name: model.to_string(),
            fields,
        })
    }

    /// The derived name set this generator renders with.
    #[must_use]
    pub const fn names(&self) -> &NameSet {
        &self.names
    }

    /// Build the shared symbol table consumed by every renderer.
    ///
    /// Everything the templates substitute comes from here; renderers never
    /// recompute a name, path or type token.
    fn symbol_table(&self) -> serde_json::Value {
        let fields: Vec<_> = self
            .fields
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "ts_type": f.field_type.ts_type(),
                    "optional": f.optional,
                })
            })
            .collect();

        let searchable_fields: Vec<_> = self
            .fields
            .iter()
            .filter(|f| f.field_type.is_searchable())
            .map(|f| json!({ "name": f.name }))
            .collect();

        json!({
            "pascal_singular": self.names.pascal_singular,
            "pascal_plural": self.names.pascal_plural,
            "lower_singular": self.names.lower_singular,
            "lower_plural": self.names.lower_plural,
            "collection_path": format!("/{}", self.names.lower_plural),
            "fields": fields,
            "searchable_fields": searchable_fields,
        })
    }

    /// Generate all module files.
    ///
    /// Renders the three artifacts from one symbol table, then checks the
    /// consistency contract across them. On any error nothing is returned:
    /// a partial or disagreeing file set is never emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the rendered artifacts
    /// disagree with the symbol table.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>, ScaffoldError> {
        let table = self.symbol_table();

        let files = vec![
            self.generate_types(&table)?,
            self.generate_composable(&table)?,
            self.generate_store(&table)?,
        ];

        verify::verify(&files, &self.names)?;

        Ok(files)
    }

    /// Generate the TypeScript type declarations file.
    fn generate_types(&self, table: &serde_json::Value) -> Result<GeneratedFile, ScaffoldError> {
        let content = self.templates.render(templates::TYPES, table)?;
        let path = PathBuf::from(format!(
            "app/{}/types/{}.ts",
            self.names.lower_plural, self.names.lower_singular
        ));

        Ok(GeneratedFile {
            path,
            content,
            description: format!("Type declarations for {}", self.names.pascal_singular),
        })
    }

    /// Generate the data-access composable file.
    fn generate_composable(
        &self,
        table: &serde_json::Value,
    ) -> Result<GeneratedFile, ScaffoldError> {
        let content = self.templates.render(templates::COMPOSABLE, table)?;
        let path = PathBuf::from(format!(
            "app/{}/composables/use{}.ts",
            self.names.lower_plural, self.names.pascal_plural
        ));

        Ok(GeneratedFile {
            path,
            content,
            description: format!("API composable for {}", self.names.pascal_plural),
        })
    }

    /// Generate the Pinia store file.
    fn generate_store(&self, table: &serde_json::Value) -> Result<GeneratedFile, ScaffoldError> {
        let content = self.templates.render(templates::STORE, table)?;
        let path = PathBuf::from(format!(
            "app/{0}/stores/{0}.ts",
            self.names.lower_plural
        ));

        Ok(GeneratedFile {
            path,
            content,
            description: format!("Pinia store for {}", self.names.pascal_plural),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_generator() -> ScaffoldGenerator {
        ScaffoldGenerator::from_args(
            "Task",
            &["title:string".to_string(), "done:boolean".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_new_generator() {
        let generator = task_generator();
        assert_eq!(generator.names().pascal_plural, "Tasks");
        assert_eq!(generator.names().lower_plural, "tasks");
    }

    #[test]
    fn test_invalid_model_name() {
        let result = ScaffoldGenerator::from_args("task", &["title:string".to_string()]);
        assert!(matches!(result, Err(ScaffoldError::InvalidName { .. })));
    }

    #[test]
    fn test_no_fields() {
        let result = ScaffoldGenerator::from_args("Task", &[]);
        assert!(matches!(result, Err(ScaffoldError::EmptyFields)));
    }

    #[test]
    fn test_reserved_field_rejected() {
        for reserved in ["id:number", "created_at:date", "updated_at:date"] {
            let result = ScaffoldGenerator::from_args(
                "Task",
                &["title:string".to_string(), reserved.to_string()],
            );
            assert!(
                matches!(result, Err(ScaffoldError::ReservedField(_))),
                "should reject {reserved}"
            );
        }
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = ScaffoldGenerator::from_args(
            "Task",
            &["title:string".to_string(), "title:text".to_string()],
        );
        assert!(matches!(result, Err(ScaffoldError::DuplicateField(_))));
    }

    #[test]
    fn test_generate_produces_three_files() {
        let files = task_generator().generate().unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].path, PathBuf::from("app/tasks/types/task.ts"));
        assert_eq!(
            files[1].path,
            PathBuf::from("app/tasks/composables/useTasks.ts")
        );
        assert_eq!(files[2].path, PathBuf::from("app/tasks/stores/tasks.ts"));
    }

    #[test]
    fn test_types_field_order_and_envelope() {
        let files = ScaffoldGenerator::from_args(
            "Task",
            &[
                "title:string".to_string(),
                "done:boolean".to_string(),
                "due_date:datetime:optional".to_string(),
            ],
        )
        .unwrap()
        .generate()
        .unwrap();

        let types = &files[0].content;

        // Entity: id first, declared fields in order, timestamps last.
        let entity_start = types.find("export interface Task {").unwrap();
        let entity_end = types[entity_start..].find('}').unwrap() + entity_start;
        let entity = &types[entity_start..entity_end];
        let positions: Vec<usize> = [
            "id: number",
            "title: string",
            "done: boolean",
            "due_date?: string",
            "created_at: string",
            "updated_at: string",
        ]
        .iter()
        .map(|needle| entity.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Create keeps requiredness; Update is fully optional.
        assert!(types.contains("export interface TaskCreateRequest"));
        assert!(types.contains("export interface TaskUpdateRequest"));
        let update_start = types.find("TaskUpdateRequest").unwrap();
        let update_end = types[update_start..].find('}').unwrap() + update_start;
        let update = &types[update_start..update_end];
        assert!(update.contains("title?: string"));
        assert!(update.contains("done?: boolean"));
        assert!(update.contains("due_date?: string"));

        // Pagination envelope for the store contract.
        assert!(types.contains("export interface TaskListResponse"));
        assert!(types.contains("tasks: Task[]"));
        assert!(types.contains("export interface QueryParams"));
    }

    #[test]
    fn test_composable_protocol() {
        let files = task_generator().generate().unwrap();
        let composable = &files[1].content;

        assert!(composable.contains("export function useTasks()"));
        assert!(composable.contains("apiClient.get('/tasks', { params })"));
        assert!(composable.contains("apiClient.post('/tasks', data)"));
        assert!(composable.contains("apiClient.put('/tasks/' + id, data)"));
        assert!(composable.contains("apiClient.delete('/tasks/' + id)"));

        // Uniform try/capture/finally protocol: one finally-clear per
        // operation, no operation left without it.
        assert_eq!(composable.matches("loading.value = true").count(), 5);
        assert_eq!(composable.matches("finally {").count(), 5);
        assert_eq!(composable.matches("loading.value = false").count(), 5);

        // Mutations rethrow so awaited callers see the failure.
        assert_eq!(composable.matches("throw e").count(), 2);

        // Refetch-on-write: each mutation refetches the collection.
        assert_eq!(composable.matches("await fetchTasks()").count(), 3);
    }

    #[test]
    fn test_store_contract() {
        let files = task_generator().generate().unwrap();
        let store = &files[2].content;

        assert!(store.contains("defineStore('tasks'"));
        assert!(store.contains("const tasksApi = useTasks()"));
        assert!(store.contains("Failed to fetch tasks"));
        assert!(store.contains("Failed to fetch task"));
        assert!(store.contains("Failed to create task"));
        assert!(store.contains("Failed to update task"));
        assert!(store.contains("Failed to delete task"));

        // Optimistic patch, not refetch: mutations touch the local list.
        assert!(store.contains("tasks.value.push(newItem)"));
        assert!(store.contains("pagination.value.total += 1"));
        assert!(store.contains("pagination.value.total -= 1"));
        assert!(store.contains("selectedTask.value = null"));

        // Page-size change resets to the first page.
        assert!(store.contains("fetchTasks({ page: 1, page_size: perPage })"));

        // Every async action clears loading on both paths.
        assert_eq!(store.matches("loading.value = true").count(), 5);
        assert_eq!(store.matches("loading.value = false").count(), 5);
    }

    #[test]
    fn test_store_documents_interleaving_limitation() {
        let files = task_generator().generate().unwrap();
        let store = &files[2].content;

        // The emitted module itself carries the no-mutual-exclusion note,
        // not just this crate's docs.
        assert!(store.contains("not mutually exclusive"));
        assert!(store.contains("last write wins"));
    }

    #[test]
    fn test_failed_fetch_keeps_previous_selection() {
        let files = task_generator().generate().unwrap();
        let store = &files[2].content;

        // Selection is only replaced on success; a failed fetch records the
        // error and leaves the previous selection in place.
        assert!(store.contains("if (item) {\n        selectedTask.value = item"));
        assert!(!store.contains("selectedTask.value = item\n      return item"));
    }

    #[test]
    fn test_search_covers_only_string_fields() {
        let files = ScaffoldGenerator::from_args(
            "Task",
            &[
                "title:string".to_string(),
                "notes:text".to_string(),
                "done:boolean".to_string(),
                "due_date:datetime".to_string(),
            ],
        )
        .unwrap()
        .generate()
        .unwrap();

        let store = &files[2].content;
        assert!(store.contains("item.title && item.title.toLowerCase().includes(query)"));
        assert!(store.contains("item.notes && item.notes.toLowerCase().includes(query)"));
        // Boolean fields never enter the search chain, and neither does a
        // date even though its target token is `string`.
        assert!(!store.contains("item.done"));
        assert!(!store.contains("item.due_date"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let first = task_generator().generate().unwrap();
        let second = task_generator().generate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_digit_bearing_name_flows_into_paths() {
        let files = ScaffoldGenerator::from_args("Task2", &["title:string".to_string()])
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(files[0].path, PathBuf::from("app/task2s/types/task2.ts"));
        assert_eq!(
            files[1].path,
            PathBuf::from("app/task2s/composables/useTask2s.ts")
        );
        assert_eq!(files[2].path, PathBuf::from("app/task2s/stores/task2s.ts"));
        assert!(files[1].content.contains("apiClient.get('/task2s', { params })"));
        assert!(files[2].content.contains("defineStore('task2s'"));
    }

    #[test]
    fn test_irregular_plural_flows_into_paths() {
        let files = ScaffoldGenerator::from_args("Person", &["name:string".to_string()])
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(files[0].path, PathBuf::from("app/people/types/person.ts"));
        assert_eq!(
            files[1].path,
            PathBuf::from("app/people/composables/usePeople.ts")
        );
        assert!(files[1].content.contains("apiClient.get('/people', { params })"));
        assert!(files[2].content.contains("defineStore('people'"));
    }
}
