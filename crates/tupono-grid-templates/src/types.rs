//! Template records and queries

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tupono_grid_core::SerializedSheet;

use crate::error::{StoreError, StoreResult};

/// Opaque template identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u64);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        s.trim()
            .parse()
            .map(TemplateId)
            .map_err(|_| StoreError::Validation(format!("invalid template id '{}'", s)))
    }
}

/// Which editor a sheet belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetKind {
    /// Engagement feedback sheets
    #[default]
    Feedback,
    /// Report sheets
    Report,
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SheetKind::Feedback => "feedback",
            SheetKind::Report => "report",
        })
    }
}

impl FromStr for SheetKind {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feedback" => Ok(SheetKind::Feedback),
            "report" => Ok(SheetKind::Report),
            other => Err(StoreError::Validation(format!("unknown sheet kind '{}'", other))),
        }
    }
}

/// Who can see a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the author
    #[default]
    Private,
    /// Everyone in the organisation
    Organisation,
    /// Everyone
    Public,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Private => "private",
            Visibility::Organisation => "organisation",
            Visibility::Public => "public",
        })
    }
}

impl FromStr for Visibility {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "organisation" | "organization" => Ok(Visibility::Organisation),
            "public" => Ok(Visibility::Public),
            other => Err(StoreError::Validation(format!("unknown visibility '{}'", other))),
        }
    }
}

/// Payload for creating a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub kind: SheetKind,
    pub sheet: SerializedSheet,
}

impl NewTemplate {
    /// A reusable template of the given kind
    pub fn new<S: Into<String>>(name: S, kind: SheetKind, sheet: SerializedSheet) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_template: true,
            visibility: Visibility::default(),
            kind,
            sheet,
        }
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Set visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as a plain content record rather than a reusable template
    pub fn as_content(mut self) -> Self {
        self.is_template = false;
        self
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        validate_name(&self.name)
    }
}

/// Partial update of a stored template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SerializedSheet>,
}

impl TemplatePatch {
    /// Patch that only replaces the sheet
    pub fn sheet(sheet: SerializedSheet) -> Self {
        Self {
            sheet: Some(sheet),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

/// A stored template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub is_template: bool,
    pub visibility: Visibility,
    pub kind: SheetKind,
    pub sheet: SerializedSheet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub(crate) fn create(id: TemplateId, payload: NewTemplate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name.trim().to_string(),
            description: payload.description,
            is_template: payload.is_template,
            visibility: payload.visibility,
            kind: payload.kind,
            sheet: payload.sheet,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, patch: TemplatePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(is_template) = patch.is_template {
            self.is_template = is_template;
        }
        if let Some(visibility) = patch.visibility {
            self.visibility = visibility;
        }
        if let Some(sheet) = patch.sheet {
            self.sheet = sheet;
        }
        self.updated_at = now;
    }

    /// Listing view of this template
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            is_template: self.is_template,
            visibility: self.visibility,
            kind: self.kind,
            updated_at: self.updated_at,
        }
    }
}

/// Listing entry, without the sheet body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub is_template: bool,
    pub visibility: Visibility,
    pub kind: SheetKind,
    pub updated_at: DateTime<Utc>,
}

/// Query for [`TemplateStore::list`](crate::TemplateStore::list)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Only this kind of sheet
    pub kind: Option<SheetKind>,
    /// Only records marked as reusable templates
    pub templates_only: bool,
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
}

impl TemplateFilter {
    /// Match everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Reusable templates of one kind
    pub fn templates(kind: SheetKind) -> Self {
        Self {
            kind: Some(kind),
            templates_only: true,
            name_contains: None,
        }
    }

    /// Whether a template passes this filter
    pub fn matches(&self, template: &Template) -> bool {
        if self.kind.map_or(false, |kind| kind != template.kind) {
            return false;
        }
        if self.templates_only && !template.is_template {
            return false;
        }
        match &self.name_contains {
            Some(needle) => template
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("template name is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, kind: SheetKind, is_template: bool) -> Template {
        let mut payload = NewTemplate::new(name, kind, SerializedSheet::default());
        payload.is_template = is_template;
        Template::create(TemplateId(1), payload, Utc::now())
    }

    #[test]
    fn test_filter_matches() {
        let report = template("Quarterly Report", SheetKind::Report, true);
        let content = template("Visit notes", SheetKind::Feedback, false);

        assert!(TemplateFilter::all().matches(&report));
        assert!(TemplateFilter::templates(SheetKind::Report).matches(&report));
        assert!(!TemplateFilter::templates(SheetKind::Feedback).matches(&report));
        assert!(!TemplateFilter::templates(SheetKind::Feedback).matches(&content));

        let by_name = TemplateFilter {
            name_contains: Some("quarterly".into()),
            ..Default::default()
        };
        assert!(by_name.matches(&report));
        assert!(!by_name.matches(&content));
    }

    #[test]
    fn test_apply_patch() {
        let mut stored = template("Old", SheetKind::Feedback, true);
        let created = stored.created_at;

        stored.apply(
            TemplatePatch {
                name: Some("  New  ".into()),
                visibility: Some(Visibility::Public),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(stored.name, "New");
        assert_eq!(stored.visibility, Visibility::Public);
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn test_record_json_shape() {
        let stored = template("Sheet", SheetKind::Report, true);
        let value = serde_json::to_value(&stored).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["isTemplate"], true);
        assert_eq!(value["kind"], "report");
        assert_eq!(value["visibility"], "private");
        assert_eq!(value["sheet"]["rows"], 8);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Report".parse::<SheetKind>().unwrap(), SheetKind::Report);
        assert_eq!(
            "organization".parse::<Visibility>().unwrap(),
            Visibility::Organisation
        );
        assert!("draft".parse::<Visibility>().is_err());
        assert_eq!(" 42 ".parse::<TemplateId>().unwrap(), TemplateId(42));
        assert!("abc".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let payload = NewTemplate::new("   ", SheetKind::Feedback, SerializedSheet::default());
        assert!(matches!(payload.validate(), Err(StoreError::Validation(_))));
        assert!(TemplatePatch {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .is_err());
    }
}
