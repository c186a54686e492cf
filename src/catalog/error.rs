use thiserror::Error;

/// Errors surfaced by the catalog snapshot.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The refresh failed; the previous snapshot is still in place.
    #[error("{0}")]
    LoadFailed(String),
}
