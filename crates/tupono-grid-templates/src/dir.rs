//! Directory-backed template store

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::store::TemplateStore;
use crate::types::{NewTemplate, Template, TemplateFilter, TemplateId, TemplatePatch, TemplateSummary};

const EXTENSION: &str = "json";
const NEXT_ID_FILE: &str = "next-id";

/// Template store keeping one pretty-printed JSON file per record
///
/// Files are named `<id>.json`. Writes go to a temporary sibling first and are renamed
/// into place, so a failed write never leaves a half-written record behind. A `next-id`
/// file keeps the lowest id not yet handed out, so ids of removed records are never
/// reused.
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    root: PathBuf,
}

impl DirTemplateStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: TemplateId) -> PathBuf {
        self.root.join(format!("{}.{}", id, EXTENSION))
    }

    /// Ids of all record files, ascending
    fn ids(&self) -> StoreResult<Vec<TemplateId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let id = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok());
            if let Some(id) = id {
                ids.push(TemplateId(id));
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Lowest id not yet allocated, from the high-water file and the records present
    fn next_id(&self) -> StoreResult<TemplateId> {
        let path = self.root.join(NEXT_ID_FILE);
        let recorded = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<u64>(&bytes)
                .map_err(|source| StoreError::Corrupt { path, source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 1,
            Err(e) => return Err(e.into()),
        };
        let after_last = self.ids()?.last().map_or(1, |last| last.0 + 1);
        Ok(TemplateId(recorded.max(after_last)))
    }

    fn read(&self, id: TemplateId) -> StoreResult<Template> {
        let path = self.path_for(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })
    }

    fn write(&self, template: &Template) -> StoreResult<()> {
        write_atomic(&self.path_for(template.id), template)
    }
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = (|| -> StoreResult<()> {
        let mut writer = BufWriter::new(fs::File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

impl TemplateStore for DirTemplateStore {
    fn create(&mut self, payload: NewTemplate) -> StoreResult<TemplateId> {
        payload.validate()?;
        let id = self.next_id()?;

        self.write(&Template::create(id, payload, Utc::now()))?;
        write_atomic(&self.root.join(NEXT_ID_FILE), &(id.0 + 1))?;
        tracing::debug!("Created template {} in {}", id, self.root.display());
        Ok(id)
    }

    fn update(&mut self, id: TemplateId, patch: TemplatePatch) -> StoreResult<()> {
        patch.validate()?;
        let mut template = self.read(id)?;
        template.apply(patch, Utc::now());
        self.write(&template)?;
        tracing::debug!("Updated template {}", id);
        Ok(())
    }

    fn get_by_id(&self, id: TemplateId) -> StoreResult<Template> {
        self.read(id)
    }

    fn list(&self, filter: &TemplateFilter) -> StoreResult<Vec<TemplateSummary>> {
        let mut summaries = Vec::new();
        for id in self.ids()? {
            match self.read(id) {
                Ok(template) if filter.matches(&template) => summaries.push(template.summary()),
                Ok(_) => {}
                Err(StoreError::Corrupt { path, source }) => {
                    tracing::warn!("Ignoring unreadable template {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summaries)
    }

    fn remove(&mut self, id: TemplateId) -> StoreResult<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => {
                tracing::debug!("Removed template {}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
