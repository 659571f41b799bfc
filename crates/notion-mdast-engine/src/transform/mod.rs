//! # Block transformation
//!
//! Rewrites a typed Notion block tree into an mdast [`Root`](crate::mdast::Root).
//!
//! ## Modules
//!
//! - **`blocks`**: `transform()` walks sibling blocks left to right and
//!   dispatches on block kind
//! - **`lists`**: `group_list()` turns a run of same-kind list blocks into one
//!   list node and recurses into nested children
//! - **`inline`**: `map_rich_text()` maps annotated rich text runs onto
//!   phrasing nodes
//!
//! ## Key Invariants
//!
//! - Every list item starts with exactly one paragraph of its own text
//! - A list's `ordered` flag is fixed by the first block of its run
//! - Task list items always carry `checked`; other list items never do
//! - The walk is pure: it never fails and never mutates its input

pub mod blocks;
pub mod inline;
pub mod lists;

pub use blocks::transform;
pub use inline::map_rich_text;
pub use lists::group_list;
