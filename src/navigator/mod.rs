//! Interactive schema navigation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  NavigatorController                        │
//! │  open / expand / filter / search / select / close           │
//! │                           │                                 │
//! │        ┌──────────────────┴──────────────────┐              │
//! │        ▼                                     ▼              │
//! │  ┌───────────────────────┐      ┌────────────────────────┐  │
//! │  │  PanelStack           │      │  SchemaMetadataProvider│  │
//! │  │  - panels[0..depth]   │      │  (async, may fail)     │  │
//! │  │  - generation stamps  │      └────────────────────────┘  │
//! │  │  - in-flight tickets  │                                  │
//! │  └───────────────────────┘                                  │
//! │                           │ select                          │
//! │                           ▼                                 │
//! │                    path::resolve ──► NavigatorEvent         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod controller;
mod error;
mod panel;
mod stack;

pub use controller::{NavigatorController, NavigatorEvent, NavigatorEvents};
pub use error::{NavigationError, NavigationErrorKind, NavigationResult};
pub use panel::{FilterMode, Hop, Panel};
pub use stack::{
    ExpandOutcome, ExpandStart, ExpandTicket, OpenOutcome, OpenTicket, PanelStack, MAX_DEPTH,
};
