//! # Candidate Resolver
//!
//! Looks a cleaned title up in an external [`Catalog`], narrows and ranks the
//! results, and decides between auto-accepting the best candidate and asking
//! a [`CandidateSelector`].

pub mod catalog;
pub mod resolver;
pub mod select;

pub use catalog::Catalog;
pub use resolver::{CONFIDENCE_MARGIN, CandidateResolver, is_confident, rank};
pub use select::{CandidateSelector, Selection, SkipSelector};
