//! Typed content blocks as delivered by the CMS.
//!
//! A body is an ordered sequence of [`Block`]s. Blocks are produced once per
//! post or note and treated as read-only for the duration of a render.

pub mod block;
pub mod span;

pub use block::*;
pub use span::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Body is not a valid block sequence: {source}")]
    InvalidBody { source: serde_json::Error },
}

/// Parses a body from the CMS JSON representation.
///
/// Unknown block types survive as [`Block::Unknown`]; only a body that is not a
/// sequence of block objects is rejected.
pub fn parse_body(json: &str) -> Result<Vec<Block>, ModelError> {
    serde_json::from_str(json).map_err(|source| ModelError::InvalidBody { source })
}
