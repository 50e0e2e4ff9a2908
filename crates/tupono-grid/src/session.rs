//! Editing session shared by the feedback and report editors
//!
//! A [`SheetEditor`] owns the grid being edited, the focused position and the id of the
//! stored record it is bound to. View code drives it through commands and reads the
//! grid back for rendering; the parent form receives the serialized sheet through the
//! change listener rather than by reaching into the view.

use std::fmt;

use tupono_grid_core::{CellCoord, FormatPatch, Grid, GridOptions, SerializedSheet};
use tupono_grid_templates::{
    NewTemplate, SheetKind, TemplateId, TemplatePatch, TemplateStore, Visibility,
};

use crate::error::{SessionError, SessionResult};

type ChangeListener = Box<dyn FnMut(&SerializedSheet)>;

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Metadata for storing the current sheet as a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMeta {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    /// Reusable template rather than a one-off content record
    pub is_template: bool,
}

impl TemplateMeta {
    /// A private reusable template with the given name
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            visibility: Visibility::default(),
            is_template: true,
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
}

/// An editing session over one sheet
pub struct SheetEditor {
    kind: SheetKind,
    grid: Grid,
    focus: Option<CellCoord>,
    template_id: Option<TemplateId>,
    notice: Option<Notice>,
    listener: Option<ChangeListener>,
}

impl fmt::Debug for SheetEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetEditor")
            .field("kind", &self.kind)
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .field("focus", &self.focus)
            .field("template_id", &self.template_id)
            .field("notice", &self.notice)
            .finish()
    }
}

impl SheetEditor {
    /// Start a session on a default-sized sheet
    pub fn new(kind: SheetKind) -> Self {
        Self::from_grid(kind, Grid::default())
    }

    /// Start a session on a sheet sized by `options`
    pub fn with_options(kind: SheetKind, options: &GridOptions) -> tupono_grid_core::Result<Self> {
        Ok(Self::from_grid(kind, Grid::with_options(options)?))
    }

    /// Start a session on an existing grid
    pub fn from_grid(kind: SheetKind, grid: Grid) -> Self {
        Self {
            kind,
            grid,
            focus: None,
            template_id: None,
            notice: None,
            listener: None,
        }
    }

    /// Session for the engagement feedback editor
    pub fn feedback() -> Self {
        Self::new(SheetKind::Feedback)
    }

    /// Session for the report editor
    pub fn report() -> Self {
        Self::new(SheetKind::Report)
    }

    /// Register the callback that receives the serialized sheet after every change
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&SerializedSheet) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    // === State ===

    /// Which editor this session serves
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// The grid being edited
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current sheet in transport form
    pub fn sheet(&self) -> SerializedSheet {
        self.grid.serialize()
    }

    /// The stored record this session saves to, if any
    pub fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    /// The current message for the user, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear the current message
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // === Focus ===

    /// The focused position
    pub fn focused(&self) -> Option<CellCoord> {
        self.focus
    }

    /// The master of the focused position's region
    pub fn focused_master(&self) -> Option<CellCoord> {
        self.focus.and_then(|focus| self.grid.master_of(focus))
    }

    /// Move focus; a position outside the grid is ignored
    pub fn focus(&mut self, coord: CellCoord) -> bool {
        if !self.grid.contains(coord) {
            return false;
        }
        self.focus = Some(coord);
        true
    }

    /// Drop focus
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    // === Structure ===

    /// Append a row
    pub fn add_row(&mut self) -> bool {
        let changed = self.grid.add_row();
        self.changed(changed)
    }

    /// Append a column
    pub fn add_column(&mut self) -> bool {
        let changed = self.grid.add_column();
        self.changed(changed)
    }

    /// Drop the last row
    pub fn remove_row(&mut self) -> bool {
        let changed = self.grid.remove_row();
        self.refocus();
        self.changed(changed)
    }

    /// Drop the last column
    pub fn remove_column(&mut self) -> bool {
        let changed = self.grid.remove_column();
        self.refocus();
        self.changed(changed)
    }

    /// Whether "merge right" is available for the focused region
    pub fn can_merge_right(&self) -> bool {
        self.focus.map_or(false, |focus| self.grid.can_merge_right(focus))
    }

    /// Whether "merge down" is available for the focused region
    pub fn can_merge_down(&self) -> bool {
        self.focus.map_or(false, |focus| self.grid.can_merge_down(focus))
    }

    /// Whether the focused region can be split
    pub fn can_split(&self) -> bool {
        self.focus
            .and_then(|focus| self.grid.region_of(focus))
            .map_or(false, |region| !region.is_single())
    }

    /// Grow the focused region by one column
    pub fn merge_right(&mut self) -> bool {
        let changed = match self.focus {
            Some(focus) => self.grid.merge_right(focus),
            None => false,
        };
        self.changed(changed)
    }

    /// Grow the focused region by one row
    pub fn merge_down(&mut self) -> bool {
        let changed = match self.focus {
            Some(focus) => self.grid.merge_down(focus),
            None => false,
        };
        self.changed(changed)
    }

    /// Split the focused region
    pub fn split(&mut self) -> bool {
        let changed = match self.focus {
            Some(focus) => self.grid.split(focus),
            None => false,
        };
        self.changed(changed)
    }

    // === Content and formatting ===

    /// Apply formatting to the focused position
    pub fn set_formatting(&mut self, patch: &FormatPatch) -> bool {
        let changed = match self.focus {
            Some(focus) if !patch.is_empty() => self.grid.set_formatting(focus, patch),
            _ => false,
        };
        self.changed(changed)
    }

    /// Flip bold on the focused position
    pub fn toggle_bold(&mut self) -> bool {
        match self.focused_cell_flag(|cell| cell.bold) {
            Some(bold) => self.set_formatting(&FormatPatch::new().bold(!bold)),
            None => false,
        }
    }

    /// Flip italic on the focused position
    pub fn toggle_italic(&mut self) -> bool {
        match self.focused_cell_flag(|cell| cell.italic) {
            Some(italic) => self.set_formatting(&FormatPatch::new().italic(!italic)),
            None => false,
        }
    }

    /// Replace a cell's rich-text content
    pub fn set_content<S: Into<String>>(&mut self, coord: CellCoord, content: S) -> bool {
        let changed = self.grid.set_content(coord, content);
        self.changed(changed)
    }

    fn focused_cell_flag(&self, flag: impl Fn(&tupono_grid_core::Cell) -> bool) -> Option<bool> {
        self.focus
            .and_then(|focus| self.grid.cell(focus))
            .map(flag)
    }

    // === Persistence ===

    /// Start over with an empty default sheet, unbound from any record
    pub fn new_sheet(&mut self) {
        self.replace_grid(Grid::default(), None);
    }

    /// Store the current sheet as a new record and bind the session to it
    pub fn save_as<S>(&mut self, store: &mut S, meta: TemplateMeta) -> SessionResult<TemplateId>
    where
        S: TemplateStore + ?Sized,
    {
        let payload = NewTemplate {
            name: meta.name,
            description: meta.description,
            is_template: meta.is_template,
            visibility: meta.visibility,
            kind: self.kind,
            sheet: self.grid.serialize(),
        };

        match store.create(payload) {
            Ok(id) => {
                self.template_id = Some(id);
                self.notice = Some(Notice::info("Saved"));
                Ok(id)
            }
            Err(e) => Err(self.fail("save", e.into())),
        }
    }

    /// Write the current sheet to the bound record
    pub fn save<S>(&mut self, store: &mut S) -> SessionResult<()>
    where
        S: TemplateStore + ?Sized,
    {
        let Some(id) = self.template_id else {
            return Err(self.fail("save", SessionError::Unbound));
        };

        match store.update(id, TemplatePatch::sheet(self.grid.serialize())) {
            Ok(()) => {
                self.notice = Some(Notice::info("Saved"));
                Ok(())
            }
            Err(e) => Err(self.fail("save", e.into())),
        }
    }

    /// Replace the sheet with a stored record and bind the session to it
    pub fn load<S>(&mut self, store: &S, id: TemplateId) -> SessionResult<()>
    where
        S: TemplateStore + ?Sized,
    {
        let grid = self.fetch(store, id)?;
        self.replace_grid(grid, Some(id));
        Ok(())
    }

    /// Replace the sheet with a stored template as a starting point
    ///
    /// Unlike [`SheetEditor::load`], the session stays unbound so the next save creates
    /// a new record instead of overwriting the template.
    pub fn apply_template<S>(&mut self, store: &S, id: TemplateId) -> SessionResult<()>
    where
        S: TemplateStore + ?Sized,
    {
        let grid = self.fetch(store, id)?;
        self.replace_grid(grid, None);
        Ok(())
    }

    fn fetch<S>(&mut self, store: &S, id: TemplateId) -> SessionResult<Grid>
    where
        S: TemplateStore + ?Sized,
    {
        let template = match store.get_by_id(id) {
            Ok(template) => template,
            Err(e) => return Err(self.fail("load", e.into())),
        };

        if template.kind != self.kind {
            let err = SessionError::KindMismatch {
                id: id.to_string(),
                expected: self.kind,
                found: template.kind,
            };
            return Err(self.fail("load", err));
        }

        let (grid, report) = Grid::hydrate_report(&template.sheet);
        if !report.skipped.is_empty() {
            tracing::warn!(
                "Template {} loaded with {} damaged entries dropped",
                id,
                report.skipped.len()
            );
        }
        Ok(grid)
    }

    fn replace_grid(&mut self, grid: Grid, template_id: Option<TemplateId>) {
        self.grid = grid;
        self.template_id = template_id;
        self.focus = None;
        self.notice = None;
        self.changed(true);
    }

    fn fail(&mut self, action: &str, err: SessionError) -> SessionError {
        tracing::warn!("Sheet {} failed: {}", action, err);
        self.notice = Some(Notice::error(format!("Could not {} the sheet: {}", action, err)));
        err
    }

    /// Keep focus valid after the grid shrinks
    fn refocus(&mut self) {
        if let Some(focus) = self.focus {
            if !self.grid.contains(focus) {
                self.focus = None;
            }
        }
    }

    fn changed(&mut self, changed: bool) -> bool {
        if changed {
            if let Some(listener) = self.listener.as_mut() {
                listener(&self.grid.serialize());
            }
        }
        changed
    }
}
