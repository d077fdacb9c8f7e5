use std::fmt;
use thiserror::Error;

/// Which slice of catalog data a load was fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Categories,
    Sections,
    Entries,
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slice::Categories => "categories",
            Slice::Sections => "sections",
            Slice::Entries => "entries",
        })
    }
}

/// The only way a catalog read can fail. Callers degrade to an empty slice.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("failed to load {slice}: {reason}")]
    LoadFailure { slice: Slice, reason: String },
}

impl CatalogError {
    pub fn load_failure(slice: Slice, reason: impl fmt::Display) -> Self {
        CatalogError::LoadFailure { slice, reason: reason.to_string() }
    }

    pub fn slice(&self) -> Slice {
        match self {
            CatalogError::LoadFailure { slice, .. } => *slice,
        }
    }
}
