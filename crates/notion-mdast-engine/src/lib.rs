//! # notion-mdast-engine
//!
//! Converts the block tree returned by the Notion API into an
//! [mdast](https://github.com/syntax-tree/mdast) syntax tree.
//!
//! ```text
//! JSON payload → notion::validate → Vec<Block> → transform → mdast::Root
//! ```
//!
//! [`parse_notion`] runs both steps. Validation is the only step that can
//! fail; [`transform`] accepts any well-typed block sequence.

pub mod mdast;
pub mod notion;
pub mod transform;


pub use mdast::{BlockContent, ListItem, PhrasingContent, Root};
pub use notion::{Block, BlockKind, RichText, ValidationError, ValidationOptions};
pub use transform::{group_list, map_rich_text, transform};

/// Validates a raw "block children" response and transforms its results.
pub fn parse_notion(raw: &serde_json::Value) -> Result<Root, ValidationError> {
    parse_notion_with(raw, &ValidationOptions::default())
}

pub fn parse_notion_with(
    raw: &serde_json::Value,
    options: &ValidationOptions,
) -> Result<Root, ValidationError> {
    let response = notion::validate_with(raw, options)?;
    Ok(transform(&response.results))
}
