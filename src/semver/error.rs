//! Error types for version and constraint parsing.

use thiserror::Error;

/// Failure to parse a version, a constraint, or a constraint list.
///
/// Every variant is recoverable by the caller; the engine never panics on
/// malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemverError {
    /// Version input was the empty string.
    #[error("version string cannot be empty")]
    EmptyVersion,

    /// Version input did not match the grammar end to end.
    #[error("invalid version format: {0}")]
    InvalidVersion(String),

    /// A numeric component matched the grammar but could not be converted.
    #[error("invalid {component} version: {value}")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },

    /// Constraint input was the empty string.
    #[error("constraint string cannot be empty")]
    EmptyConstraint,

    /// Constraint list input was empty or whitespace only.
    #[error("constraint list cannot be empty")]
    EmptyConstraintList,

    /// A constraint prefix looked like an operator but is not one.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// The version part of a constraint failed to parse.
    #[error("invalid version in constraint '{constraint}': {source}")]
    InvalidConstraint {
        constraint: String,
        #[source]
        source: Box<SemverError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_version_message() {
        assert_eq!(
            SemverError::EmptyVersion.to_string(),
            "version string cannot be empty"
        );
    }

    #[test]
    fn empty_inputs_are_distinguishable() {
        let version = SemverError::EmptyVersion.to_string();
        let constraint = SemverError::EmptyConstraint.to_string();
        let list = SemverError::EmptyConstraintList.to_string();

        assert!(version.contains("version"));
        assert!(constraint.contains("constraint string"));
        assert!(list.contains("constraint list"));
    }

    #[test]
    fn invalid_version_names_input() {
        let err = SemverError::InvalidVersion("a.b.c".into());
        assert!(err.to_string().contains("a.b.c"));
    }

    #[test]
    fn unknown_operator_names_token() {
        let err = SemverError::UnknownOperator("=>".into());
        assert!(err.to_string().contains("=>"));
    }

    #[test]
    fn invalid_constraint_surfaces_inner_error() {
        let err = SemverError::InvalidConstraint {
            constraint: ">=x".into(),
            source: Box::new(SemverError::InvalidVersion("x".into())),
        };
        let msg = err.to_string();
        assert!(msg.contains(">=x"));
        assert!(msg.contains("invalid version format: x"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
