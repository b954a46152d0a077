//! Embedded artifact templates and the registry that renders them
//!
//! All three templates consume the same symbol table built by the generator;
//! none of them performs its own name or type derivation. Handlebars HTML
//! escaping is disabled since the output is code, not markup.

use crate::error::ScaffoldError;
use handlebars::Handlebars;

/// Template name for the type-declarations artifact
pub const TYPES: &str = "types";
/// Template name for the data-access composable artifact
pub const COMPOSABLE: &str = "composable";
/// Template name for the Pinia store artifact
pub const STORE: &str = "store";

/// TypeScript type declarations.
///
/// The entity interface always starts with `id` and always ends with the
/// `created_at`/`updated_at` pair; user fields keep declaration order in all
/// three request shapes. Update requests are fully optional: the backend
/// applies partial-update semantics, so absent keys are omitted rather than
/// sent as nulls.
pub const TYPES_TEMPLATE: &str = r"export interface {{pascal_singular}} {
  id: number
{{#each fields}}  {{name}}{{#if optional}}?{{/if}}: {{ts_type}}
{{/each}}  created_at: string
  updated_at: string
}

export interface {{pascal_singular}}CreateRequest {
{{#each fields}}  {{name}}{{#if optional}}?{{/if}}: {{ts_type}}
{{/each}}}

export interface {{pascal_singular}}UpdateRequest {
{{#each fields}}  {{name}}?: {{ts_type}}
{{/each}}}

export interface Pagination {
  total: number
  page: number
  page_size: number
  total_pages: number
}

export interface QueryParams {
  page?: number
  page_size?: number
  search?: string
}

export interface {{pascal_singular}}ListResponse {
  {{lower_plural}}: {{pascal_singular}}[]
  pagination: Pagination
}
";

/// Data-access composable (refetch-on-write strategy).
///
/// Every operation follows the same protocol: set loading, clear error,
/// attempt, record the message on failure, clear loading in `finally`.
/// Mutations refetch the full collection on success so the held list never
/// drifts from the backend. Create/update rethrow after recording so awaited
/// callers can detect failure; fetches return null and delete returns false.
pub const COMPOSABLE_TEMPLATE: &str = r"import { ref } from 'vue'
import { apiClient } from '~/core/api/client'
import type { {{pascal_singular}}, {{pascal_singular}}CreateRequest, {{pascal_singular}}UpdateRequest, {{pascal_singular}}ListResponse, QueryParams } from '../types/{{lower_singular}}'

export function use{{pascal_plural}}() {
  const {{lower_plural}} = ref<{{pascal_singular}}[]>([])
  const loading = ref(false)
  const error = ref<string | null>(null)

  const fetch{{pascal_plural}} = async (params?: QueryParams): Promise<{{pascal_singular}}ListResponse | null> => {
    loading.value = true
    error.value = null
    try {
      const response = await apiClient.get('{{collection_path}}', { params })
      {{lower_plural}}.value = response.data.{{lower_plural}}
      return response.data
    } catch (e: any) {
      error.value = e.message
      return null
    } finally {
      loading.value = false
    }
  }

  const fetch{{pascal_singular}} = async (id: number): Promise<{{pascal_singular}} | null> => {
    loading.value = true
    error.value = null
    try {
      const response = await apiClient.get('{{collection_path}}/' + id)
      return response.data
    } catch (e: any) {
      error.value = e.message
      return null
    } finally {
      loading.value = false
    }
  }

  const create{{pascal_singular}} = async (data: {{pascal_singular}}CreateRequest): Promise<{{pascal_singular}}> => {
    loading.value = true
    error.value = null
    try {
      const response = await apiClient.post('{{collection_path}}', data)
      await fetch{{pascal_plural}}()
      return response.data
    } catch (e: any) {
      error.value = e.message
      throw e
    } finally {
      loading.value = false
    }
  }

  const update{{pascal_singular}} = async (id: number, data: {{pascal_singular}}UpdateRequest): Promise<{{pascal_singular}}> => {
    loading.value = true
    error.value = null
    try {
      const response = await apiClient.put('{{collection_path}}/' + id, data)
      await fetch{{pascal_plural}}()
      return response.data
    } catch (e: any) {
      error.value = e.message
      throw e
    } finally {
      loading.value = false
    }
  }

  const delete{{pascal_singular}} = async (id: number): Promise<boolean> => {
    loading.value = true
    error.value = null
    try {
      await apiClient.delete('{{collection_path}}/' + id)
      await fetch{{pascal_plural}}()
      return true
    } catch (e: any) {
      error.value = e.message
      return false
    } finally {
      loading.value = false
    }
  }

  return {
    {{lower_plural}},
    loading,
    error,
    fetch{{pascal_plural}},
    fetch{{pascal_singular}},
    create{{pascal_singular}},
    update{{pascal_singular}},
    delete{{pascal_singular}}
  }
}
";

/// Pinia store (optimistic-patch strategy).
///
/// Wraps the composable instead of duplicating its logic. Successful
/// mutations patch the in-memory collection locally (push/replace/remove)
/// without refetching, trading perfect consistency for responsiveness.
/// Failures never propagate to the caller: create/update return null and
/// delete returns false, with a fixed human-readable message recorded.
///
/// Concurrent operations against the same store interleave with no mutual
/// exclusion; the host UI is expected to serialize user-triggered calls.
pub const STORE_TEMPLATE: &str = r"import { defineStore } from 'pinia'
import { ref, computed } from 'vue'
import { use{{pascal_plural}} } from '../composables/use{{pascal_plural}}'
import type { {{pascal_singular}}, {{pascal_singular}}CreateRequest, {{pascal_singular}}UpdateRequest, QueryParams } from '../types/{{lower_singular}}'

// Concurrent actions on this store are not mutually exclusive: their
// loading/error flags and collection patches interleave, last write wins.
// Serialize user-triggered operations in the host UI if that matters.
export const use{{pascal_plural}}Store = defineStore('{{lower_plural}}', () => {
  // Data-access layer with the API operations
  const {{lower_plural}}Api = use{{pascal_plural}}()

  // State
  const {{lower_plural}} = ref<{{pascal_singular}}[]>([])
  const selected{{pascal_singular}} = ref<{{pascal_singular}} | null>(null)
  const loading = ref(false)
  const error = ref<string | null>(null)
  const pagination = ref({
    total: 0,
    page: 1,
    page_size: 10,
    total_pages: 1
  })

  // Search
  const searchQuery = ref('')

  // Getters
  const total{{pascal_plural}} = computed(() => pagination.value.total)
  const has{{pascal_plural}} = computed(() => {{lower_plural}}.value.length > 0)
  const isEmpty = computed(() => {{lower_plural}}.value.length === 0)
  const isLoading = computed(() => loading.value)

  // Recomputed on every read; fine for UI-sized collections
  const filtered{{pascal_plural}} = computed(() => {
    if (!searchQuery.value) {
      return {{lower_plural}}.value
    }
    const query = searchQuery.value.toLowerCase()
    return {{lower_plural}}.value.filter((item: {{pascal_singular}}) => {
      {{#each searchable_fields}}if (item.{{name}} && item.{{name}}.toLowerCase().includes(query)) return true
      {{/each}}return false
    })
  })

  // Actions - delegate to the composable, then patch local state
  const fetch{{pascal_plural}} = async (params?: QueryParams): Promise<void> => {
    loading.value = true
    error.value = null
    try {
      const result = await {{lower_plural}}Api.fetch{{pascal_plural}}(params)
      if (result) {
        {{lower_plural}}.value = result.{{lower_plural}}
        pagination.value = result.pagination
      } else {
        error.value = 'Failed to fetch {{lower_plural}}'
      }
    } finally {
      loading.value = false
    }
  }

  const fetch{{pascal_singular}} = async (id: number): Promise<{{pascal_singular}} | null> => {
    loading.value = true
    error.value = null
    try {
      const item = await {{lower_plural}}Api.fetch{{pascal_singular}}(id)
      if (item) {
        selected{{pascal_singular}}.value = item
      } else {
        // Keep the previous selection when the fetch fails.
        error.value = 'Failed to fetch {{lower_singular}}'
      }
      return item
    } finally {
      loading.value = false
    }
  }

  const create{{pascal_singular}} = async (data: {{pascal_singular}}CreateRequest): Promise<{{pascal_singular}} | null> => {
    loading.value = true
    error.value = null
    try {
      const newItem = await {{lower_plural}}Api.create{{pascal_singular}}(data)
      {{lower_plural}}.value.push(newItem)
      pagination.value.total += 1
      return newItem
    } catch {
      error.value = 'Failed to create {{lower_singular}}'
      return null
    } finally {
      loading.value = false
    }
  }

  const update{{pascal_singular}} = async (id: number, data: {{pascal_singular}}UpdateRequest): Promise<{{pascal_singular}} | null> => {
    loading.value = true
    error.value = null
    try {
      const updatedItem = await {{lower_plural}}Api.update{{pascal_singular}}(id, data)
      const index = {{lower_plural}}.value.findIndex(item => item.id === id)
      if (index !== -1) {
        {{lower_plural}}.value[index] = updatedItem
      }
      if (selected{{pascal_singular}}.value?.id === id) {
        selected{{pascal_singular}}.value = updatedItem
      }
      return updatedItem
    } catch {
      error.value = 'Failed to update {{lower_singular}}'
      return null
    } finally {
      loading.value = false
    }
  }

  const delete{{pascal_singular}} = async (id: number): Promise<boolean> => {
    loading.value = true
    error.value = null
    try {
      const ok = await {{lower_plural}}Api.delete{{pascal_singular}}(id)
      if (ok) {
        {{lower_plural}}.value = {{lower_plural}}.value.filter(item => item.id !== id)
        if (selected{{pascal_singular}}.value?.id === id) {
          selected{{pascal_singular}}.value = null
        }
        pagination.value.total -= 1
      } else {
        error.value = 'Failed to delete {{lower_singular}}'
      }
      return ok
    } finally {
      loading.value = false
    }
  }

  // Helper actions
  const setSearchQuery = (query: string) => {
    searchQuery.value = query
  }

  const setPage = async (page: number): Promise<void> => {
    await fetch{{pascal_plural}}({ page, page_size: pagination.value.page_size })
  }

  const setPerPage = async (perPage: number): Promise<void> => {
    await fetch{{pascal_plural}}({ page: 1, page_size: perPage })
  }

  const clearError = () => {
    error.value = null
  }

  const clearSelected{{pascal_singular}} = () => {
    selected{{pascal_singular}}.value = null
  }

  const clearFilters = () => {
    searchQuery.value = ''
  }

  return {
    // State
    {{lower_plural}},
    selected{{pascal_singular}},
    loading,
    error,
    pagination,
    searchQuery,

    // Getters
    total{{pascal_plural}},
    has{{pascal_plural}},
    isEmpty,
    isLoading,
    filtered{{pascal_plural}},

    // Actions
    fetch{{pascal_plural}},
    fetch{{pascal_singular}},
    create{{pascal_singular}},
    update{{pascal_singular}},
    delete{{pascal_singular}},
    setSearchQuery,
    setPage,
    setPerPage,
    clearError,
    clearSelected{{pascal_singular}},
    clearFilters
  }
})
";

/// Registry of the three artifact templates
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Create a registry with all artifact templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any embedded template fails to parse.
    pub fn new() -> Result<Self, ScaffoldError> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_template_string(TYPES, TYPES_TEMPLATE)?;
        handlebars.register_template_string(COMPOSABLE, COMPOSABLE_TEMPLATE)?;
        handlebars.register_template_string(STORE, STORE_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    /// Render a registered template against the shared symbol table.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, ScaffoldError> {
        Ok(self.handlebars.render(name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_parses_all_templates() {
        assert!(TemplateRegistry::new().is_ok());
    }

    #[test]
    fn test_code_is_not_html_escaped() {
        let registry = TemplateRegistry::new().unwrap();
        let context = serde_json::json!({
            "pascal_singular": "Task",
            "pascal_plural": "Tasks",
            "lower_singular": "task",
            "lower_plural": "tasks",
            "collection_path": "/tasks",
            "fields": [],
            "searchable_fields": [],
        });

        let rendered = registry.render(COMPOSABLE, &context).unwrap();
        assert!(rendered.contains("ref<Task[]>"));
        assert!(!rendered.contains("&lt;"));
    }
}
