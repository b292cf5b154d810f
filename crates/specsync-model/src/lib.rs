//! # specsync-model
//!
//! Record layer for design-spec reconciliation.
//!
//! This crate provides:
//! - `Spec`: the canonical form of one CSV sheet row
//! - `ItemType` and companion vocabularies, with the per-type field-group
//!   activity table shared by validation and payload transformation
//! - `SpecProjection`: the flat comparison projection used for change
//!   detection and revision decisions
//! - wire-facing record and payload shapes exchanged with the design store
//! - the sheet parser (header-indexed, column order independent)
//!
//! It intentionally does not validate or orchestrate. Rule checking lives
//! in `specsync-validate`; reconciliation lives in `specsync-pipeline`.

pub mod item_type;
pub mod payload;
pub mod projection;
pub mod record;
pub mod sheet;
pub mod spec;
pub mod status;

pub use item_type::{ActionType, ButtonType, DataType, ItemType};
pub use payload::{
    DatabaseDetails, ItemDetails, NavigationDetails, SpecDetails, SpecPayload, ValidationDetails,
};
pub use projection::{SpecProjection, projections_equal};
pub use record::{
    ExistingRecord, Frame, REVISION_CHANGE_TYPE_USER, Revision, User, WrittenRecord,
};
pub use sheet::{SheetError, parse_specs};
pub use spec::Spec;
pub use status::ItemStatus;
