use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::block::{Block, BlockChildrenResponse};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid data: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("Invalid data: block {block_id} nests deeper than {limit} levels")]
    TooDeep { block_id: String, limit: usize },
}

/// Limits applied on top of the schema when the payload is untrusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Maximum nesting depth of `children` arrays. Top-level blocks are depth 1.
    pub max_depth: Option<usize>,
}

/// Validate a raw "block children" response and return the typed tree.
pub fn validate(raw: &Value) -> Result<BlockChildrenResponse, ValidationError> {
    validate_with(raw, &ValidationOptions::default())
}

pub fn validate_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<BlockChildrenResponse, ValidationError> {
    let response = BlockChildrenResponse::deserialize(raw)?;
    check_limits(&response.results, options)?;
    log::debug!(
        "validated {} top-level blocks (has_more: {})",
        response.results.len(),
        response.has_more
    );
    Ok(response)
}

/// Same as [`validate`], starting from JSON text.
pub fn validate_str(raw: &str) -> Result<BlockChildrenResponse, ValidationError> {
    let value: Value = serde_json::from_str(raw)?;
    validate(&value)
}

fn check_limits(blocks: &[Block], options: &ValidationOptions) -> Result<(), ValidationError> {
    match options.max_depth {
        Some(limit) => check_depth(blocks, 1, limit),
        None => Ok(()),
    }
}

fn check_depth(blocks: &[Block], depth: usize, limit: usize) -> Result<(), ValidationError> {
    for block in blocks {
        if depth > limit {
            return Err(ValidationError::TooDeep {
                block_id: block.id.to_string(),
                limit,
            });
        }
        check_depth(block.kind.children(), depth + 1, limit)?;
    }
    Ok(())
}
