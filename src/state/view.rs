// View state - sort, presentation mode and hidden-file visibility of one tab
use super::sort::{SortKey, SortOptions, SortOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation mode identifier. The set of modes belongs to the content view,
/// so this is an open string id rather than a closed enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewMode(pub String);

impl ViewMode {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::new("icon")
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mode as offered by the content view, for building the view-mode menu.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModeInfo {
    pub mode: ViewMode,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub sort: SortOptions,
    pub view_mode: ViewMode,
    pub show_hidden: bool,
    /// Persisted per folder when set; otherwise mirrors the global default.
    pub owns_config: bool,
    /// Column layout, only meaningful while `owns_config` is set.
    pub columns: Option<Vec<String>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort: SortOptions::default(),
            view_mode: ViewMode::default(),
            show_hidden: false,
            owns_config: false,
            columns: None,
        }
    }
}

/// One changed field of a `ViewState`, with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewField {
    SortKey(SortKey),
    SortOrder(SortOrder),
    CaseSensitive(bool),
    FoldersFirst(bool),
    ViewMode(ViewMode),
    ShowHidden(bool),
    Columns(Vec<String>),
}

impl ViewState {
    /// Copy of this state that mirrors the global default.
    pub fn inherited(&self) -> Self {
        Self {
            owns_config: false,
            columns: None,
            ..self.clone()
        }
    }

    /// Apply one field. Returns whether the state changed.
    pub fn apply(&mut self, field: &ViewField) -> bool {
        match field {
            ViewField::SortKey(key) => replace(&mut self.sort.key, *key),
            ViewField::SortOrder(order) => replace(&mut self.sort.order, *order),
            ViewField::CaseSensitive(on) => replace(&mut self.sort.case_sensitive, *on),
            ViewField::FoldersFirst(on) => replace(&mut self.sort.folders_first, *on),
            ViewField::ViewMode(mode) => replace(&mut self.view_mode, mode.clone()),
            ViewField::ShowHidden(on) => replace(&mut self.show_hidden, *on),
            ViewField::Columns(columns) => {
                // the global column layout is not mirrored into the tab
                self.owns_config && replace(&mut self.columns, Some(columns.clone()))
            }
        }
    }

    pub fn get(&self, field: &ViewField) -> ViewField {
        match field {
            ViewField::SortKey(_) => ViewField::SortKey(self.sort.key),
            ViewField::SortOrder(_) => ViewField::SortOrder(self.sort.order),
            ViewField::CaseSensitive(_) => ViewField::CaseSensitive(self.sort.case_sensitive),
            ViewField::FoldersFirst(_) => ViewField::FoldersFirst(self.sort.folders_first),
            ViewField::ViewMode(_) => ViewField::ViewMode(self.view_mode.clone()),
            ViewField::ShowHidden(_) => ViewField::ShowHidden(self.show_hidden),
            ViewField::Columns(_) => ViewField::Columns(self.columns.clone().unwrap_or_default()),
        }
    }
}

/// Fields that differ between two sort settings, in a stable order.
pub fn sort_changes(old: &SortOptions, new: &SortOptions) -> Vec<ViewField> {
    let mut fields = Vec::new();
    if old.key != new.key {
        fields.push(ViewField::SortKey(new.key));
    }
    if old.order != new.order {
        fields.push(ViewField::SortOrder(new.order));
    }
    if old.case_sensitive != new.case_sensitive {
        fields.push(ViewField::CaseSensitive(new.case_sensitive));
    }
    if old.folders_first != new.folders_first {
        fields.push(ViewField::FoldersFirst(new.folders_first));
    }
    fields
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
