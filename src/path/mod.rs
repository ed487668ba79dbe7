//! Dotted relationship paths.
//!
//! A path is built once, when a field is selected, from the hops recorded in
//! the panel stack:
//!
//! ```text
//! Account ──OwnerId (lookup)──► User ──ManagerId (lookup)──► User . Email
//!            "owner"                  "manager"                 "Email"
//!
//!                       => owner.manager.Email
//! ```
//!
//! Lookup hops contribute the lower-cased field name without its `Id`
//! suffix; child relationship hops contribute the relationship name as
//! declared. The leaf is kept verbatim.

mod dotted;
mod resolver;
mod segment;

pub use dotted::{DottedPath, PathParseError};
pub use resolver::resolve;
pub use segment::{derive_segment, PathSegment};
