//! Record flattening and tabular preview.
//!
//! ```text
//! nested record ──flatten(path)──▶ Vec<Value> ──format_cell──▶ cell text
//!                                                   │
//!                      one column per path ◀────────┘
//! ```

mod flatten;
mod table;

pub use flatten::{flatten, flatten_many, flatten_str};
pub use table::{
    build_preview, format_cell, run_preview, PreviewColumn, PreviewOptions, PreviewRow,
    PreviewTable,
};
