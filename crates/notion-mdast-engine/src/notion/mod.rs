//! # Notion block model
//!
//! Typed mirror of the Notion "retrieve block children" payload.
//!
//! - **`block`**: `Block`, the closed `BlockKind` union and its payloads
//! - **`rich_text`**: `RichText` runs, `Annotations` and mention targets
//! - **`validate`**: `validate()` turns untyped JSON into a `BlockChildrenResponse`
//!
//! Validation is the only fallible step of the pipeline. Everything
//! downstream works on the typed tree and cannot fail.

pub mod block;
pub mod rich_text;
pub mod validate;

pub use block::{
    Block, BlockChildrenResponse, BlockKind, CodeBlock, FileObject, HeadingBlock, ImageBlock,
    ListItemRef, ListKind, TextBlock, ToDoBlock,
};
pub use rich_text::{Annotations, ApiColor, Mention, RichText, concat_plain_text};
pub use validate::{ValidationError, ValidationOptions, validate, validate_str, validate_with};
