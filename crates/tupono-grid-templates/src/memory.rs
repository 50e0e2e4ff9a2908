//! In-process template store

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::store::TemplateStore;
use crate::types::{NewTemplate, Template, TemplateFilter, TemplateId, TemplatePatch, TemplateSummary};

/// Template store backed by a map
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<TemplateId, Template>,
    next_id: u64,
}

impl MemoryTemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn create(&mut self, payload: NewTemplate) -> StoreResult<TemplateId> {
        payload.validate()?;
        self.next_id += 1;
        let id = TemplateId(self.next_id);
        self.templates
            .insert(id, Template::create(id, payload, Utc::now()));
        Ok(id)
    }

    fn update(&mut self, id: TemplateId, patch: TemplatePatch) -> StoreResult<()> {
        patch.validate()?;
        let template = self
            .templates
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        template.apply(patch, Utc::now());
        Ok(())
    }

    fn get_by_id(&self, id: TemplateId) -> StoreResult<Template> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, filter: &TemplateFilter) -> StoreResult<Vec<TemplateSummary>> {
        Ok(self
            .templates
            .values()
            .filter(|template| filter.matches(template))
            .map(Template::summary)
            .collect())
    }

    fn remove(&mut self, id: TemplateId) -> StoreResult<()> {
        self.templates
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SheetKind;
    use tupono_grid_core::SerializedSheet;

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = MemoryTemplateStore::new();
        let sheet = SerializedSheet::default();

        let first = store
            .create(NewTemplate::new("a", SheetKind::Feedback, sheet.clone()))
            .unwrap();
        store.remove(first).unwrap();
        let second = store
            .create(NewTemplate::new("b", SheetKind::Feedback, sheet))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_create_stores_nothing() {
        let mut store = MemoryTemplateStore::new();
        let result = store.create(NewTemplate::new("", SheetKind::Report, SerializedSheet::default()));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.is_empty());
    }
}
