//! Update semantics shared by the team and person resources

/// How an update request treats fields it does not mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Every writable field must be present (PUT)
    Full,
    /// Absent fields keep their current value (PATCH)
    #[default]
    Partial,
}

impl UpdateMode {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial)
    }
}

/// Message reported for a writable field missing from a full update
pub const FIELD_REQUIRED: &str = "This field is required.";
