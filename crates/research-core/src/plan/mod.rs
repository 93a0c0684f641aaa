//! Plan parsing and checklist review.
//!
//! Planner output is plain text. [`parse`] turns it into a [`ParsedPlan`]
//! whose numbered lines become toggleable steps, and [`PlanReview`] turns the
//! user's selection back into the single string the planner understands:
//! the literal `"accept"`, or a regenerated list of the kept steps.
//!
//! ```rust
//! use research_core::plan::{PlanResponse, PlanReview};
//!
//! let mut review = PlanReview::new("1. Search web\n2. Draft outline\n3. Write report");
//! review.toggle(1).unwrap();
//!
//! let response = review.confirm();
//! assert_eq!(
//!     response.as_message(),
//!     "Please update the plan to include ONLY these steps:\n1. Search web\n2. Write report"
//! );
//! assert!(matches!(response, PlanResponse::Partial(_)));
//! ```
//!
//! [`ParsedPlan`]: crate::models::ParsedPlan

pub mod parser;
pub mod review;

pub use parser::{parse, split_backend_payload};
pub use review::{PlanResponse, PlanReview, ACCEPT, PARTIAL_SELECTION_PREAMBLE};
