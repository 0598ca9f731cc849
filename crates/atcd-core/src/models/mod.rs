//! Domain models for the dossier history records.

mod family;
mod pediatric;

pub use family::*;
pub use pediatric::*;

/// Trimmed value of a leaf, or `None` when it is absent or blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    present(value).is_none()
}
