//! Shared traits implemented by every persisted record type.

use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Structural checks applied to records read back from storage.
///
/// Decoding only proves the JSON had the right shape; `check` rejects values
/// that decode fine but break the record's invariants.
pub trait SchemaCheck {
    fn check(&self) -> Result<(), String>;
}

/// Returns a fresh time-ordered identifier.
pub fn new_record_id() -> Uuid {
    Uuid::now_v7()
}
