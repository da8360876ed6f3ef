//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Item entry, deletion and export commands
pub mod item;

/// List and notification views
pub mod listing;

// Export commands
pub use general::*;
pub use item::*;
pub use listing::*;
