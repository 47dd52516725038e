// Sort options for file listing
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Size,
    Modified,
    Type,
    Extension,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::Size,
        SortKey::Modified,
        SortKey::Type,
        SortKey::Extension,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Modified => "Modification Time",
            SortKey::Type => "File Type",
            SortKey::Extension => "Extension",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortOptions {
    pub key: SortKey,
    pub order: SortOrder,
    pub case_sensitive: bool,
    pub folders_first: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            order: SortOrder::Ascending,
            case_sensitive: false,
            folders_first: true,
        }
    }
}

impl SortOptions {
    pub fn toggle_order(&mut self) {
        self.order = match self.order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
    }

    pub fn is_ascending(&self) -> bool {
        self.order == SortOrder::Ascending
    }
}
