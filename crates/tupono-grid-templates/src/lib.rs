//! # tupono-grid-templates
//!
//! Persistence for serialized sheets. A template record carries its metadata plus the
//! sheet under a `sheet` field; the store treats the sheet as an opaque blob.
//!
//! - [`TemplateStore`] - create / update / get / list / remove
//! - [`MemoryTemplateStore`] - in-process store
//! - [`DirTemplateStore`] - one JSON file per template in a directory

mod dir;
mod error;
mod memory;
mod store;
mod types;

pub use dir::DirTemplateStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryTemplateStore;
pub use store::TemplateStore;
pub use types::{
    NewTemplate, SheetKind, Template, TemplateFilter, TemplateId, TemplatePatch,
    TemplateSummary, Visibility,
};
