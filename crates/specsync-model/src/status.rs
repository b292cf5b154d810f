//! Lifecycle status of a design item.

use std::fmt;

/// How far along a design item's spec is.
///
/// `None`, `Draft` and `Completed` are producible by the pipeline.
/// `Deleted` only ever arrives from the remote store; a row whose existing
/// record is deleted is never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    None,
    Draft,
    Completed,
    Deleted,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::None => "none",
            ItemStatus::Draft => "draft",
            ItemStatus::Completed => "completed",
            ItemStatus::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<ItemStatus> {
        match value {
            "none" => Some(ItemStatus::None),
            "draft" => Some(ItemStatus::Draft),
            "completed" => Some(ItemStatus::Completed),
            "deleted" => Some(ItemStatus::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
