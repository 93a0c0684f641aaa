//! Markdown formatting of plans, runs and sessions.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! lists go through the wrappers in [`collections`]. The CLI hands the
//! output to its terminal renderer.
//!
//! ```rust
//! use research_core::plan::parse;
//!
//! let plan = parse("1. Search web\n2. Write report");
//! assert_eq!(
//!     plan.to_string(),
//!     "## Plan (2/2 Selected)\n\n- [x] 1. Search web\n- [x] 2. Write report\n"
//! );
//! ```

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{RunLog, Sessions};
pub use datetime::{LocalDateTime, LocalTime};
