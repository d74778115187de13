//! Semantic version parsing and constraint matching.
//!
//! Versions follow `[v]MAJOR[.MINOR[.PATCH]][-PRERELEASE][+BUILD]`, with
//! missing minor/patch components treated as 0. Constraints pair an
//! operator with a bound version; a constraint list is a conjunction.
//!
//! # Modules
//!
//! - [`version`] - Version parsing, ordering, and rendering
//! - [`constraint`] - Operators, constraints, and constraint lists
//! - [`error`] - Parse error types
//!
//! # Example
//!
//! ```
//! use envdoctor::semver::{ConstraintSet, Version};
//!
//! let required = ConstraintSet::parse(">=1.22 <1.25").unwrap();
//! assert!(required.is_satisfied_by(&Version::parse("1.23.1").unwrap()));
//! assert!(!required.is_satisfied_by(&Version::parse("1.25").unwrap()));
//! ```

pub mod constraint;
pub mod error;
pub mod version;

pub use constraint::{satisfies_all, Constraint, ConstraintSet, Operator};
pub use error::SemverError;
pub use version::Version;
