//! Error types for page construction.
//!
//! Behavior handlers never fail; the only fallible steps are loading a page
//! description and resolving the elements every behavior depends on.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Every behavior reads the navbar, so a page without one is rejected
    /// up front instead of failing on the first scroll.
    #[error("page has no `.navbar` element")]
    MissingNavbar,

    #[error("failed to read page file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed page description")]
    Syntax(#[from] toml::de::Error),

    /// Sizes feed straight into scroll targets, so NaN or infinities
    /// would leave the viewport stuck.
    #[error("page field `{field}` must be a finite, non-negative number, got {value}")]
    InvalidGeometry { field: String, value: f64 },

    #[error("invalid page file {}", path.display())]
    InvalidPage {
        path: PathBuf,
        #[source]
        source: Box<PageError>,
    },
}
