//! Template store trait

use crate::error::StoreResult;
use crate::types::{NewTemplate, Template, TemplateFilter, TemplateId, TemplatePatch, TemplateSummary};

/// Persistence for serialized sheets, keyed by template id
///
/// Implementations must leave stored records untouched when an operation fails.
pub trait TemplateStore {
    /// Store a new record and return its id
    fn create(&mut self, payload: NewTemplate) -> StoreResult<TemplateId>;

    /// Apply a partial update to an existing record
    fn update(&mut self, id: TemplateId, patch: TemplatePatch) -> StoreResult<()>;

    /// Fetch a full record
    fn get_by_id(&self, id: TemplateId) -> StoreResult<Template>;

    /// List records matching `filter`, ordered by id
    fn list(&self, filter: &TemplateFilter) -> StoreResult<Vec<TemplateSummary>>;

    /// Delete a record
    fn remove(&mut self, id: TemplateId) -> StoreResult<()>;
}

impl<S: TemplateStore + ?Sized> TemplateStore for &mut S {
    fn create(&mut self, payload: NewTemplate) -> StoreResult<TemplateId> {
        (**self).create(payload)
    }

    fn update(&mut self, id: TemplateId, patch: TemplatePatch) -> StoreResult<()> {
        (**self).update(id, patch)
    }

    fn get_by_id(&self, id: TemplateId) -> StoreResult<Template> {
        (**self).get_by_id(id)
    }

    fn list(&self, filter: &TemplateFilter) -> StoreResult<Vec<TemplateSummary>> {
        (**self).list(filter)
    }

    fn remove(&mut self, id: TemplateId) -> StoreResult<()> {
        (**self).remove(id)
    }
}
