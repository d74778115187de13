//! Version constraints and their satisfaction rules.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::SemverError;
use super::version::Version;

/// Characters that may begin an operator token.
const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!', '~', '^'];

/// Comparison operator of a single constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    /// Same major and minor, patch at least the bound's.
    Tilde,
    /// Compatible changes, with 0.x bounds pinned more tightly.
    Caret,
    NotEqual,
}

impl Operator {
    /// Canonical token for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Tilde => "~",
            Operator::Caret => "^",
            Operator::NotEqual => "!=",
        }
    }

    /// Map a token to its operator.
    pub fn from_token(token: &str) -> Result<Self, SemverError> {
        match token {
            "=" => Ok(Operator::Equal),
            ">" => Ok(Operator::Greater),
            ">=" => Ok(Operator::GreaterEqual),
            "<" => Ok(Operator::Less),
            "<=" => Ok(Operator::LessEqual),
            "~" => Ok(Operator::Tilde),
            "^" => Ok(Operator::Caret),
            "!=" => Ok(Operator::NotEqual),
            other => Err(SemverError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// An operator paired with the bound version it compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Operator,
    pub version: Version,
}

impl Constraint {
    pub fn new(op: Operator, version: Version) -> Self {
        Self { op, version }
    }

    /// Parse a single constraint token such as `>=1.22` or `^0.2.3`.
    ///
    /// The whole leading run of operator characters is taken as the token,
    /// so malformed prefixes like `=>` or `==` are reported as unknown
    /// operators rather than being split into a valid operator and a bad
    /// version. No prefix means equality.
    pub fn parse(input: &str) -> Result<Self, SemverError> {
        if input.is_empty() {
            return Err(SemverError::EmptyConstraint);
        }

        let split = input
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(input.len());
        let (token, rest) = input.split_at(split);

        let op = if token.is_empty() {
            Operator::Equal
        } else {
            Operator::from_token(token)?
        };

        let version = Version::parse(rest).map_err(|e| SemverError::InvalidConstraint {
            constraint: input.to_string(),
            source: Box::new(e),
        })?;

        Ok(Self { op, version })
    }

    /// Whether `candidate` falls within this constraint.
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        let bound = &self.version;
        let ordering = candidate.compare(bound);

        match self.op {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::Greater => ordering == Ordering::Greater,
            Operator::GreaterEqual => ordering != Ordering::Less,
            Operator::Less => ordering == Ordering::Less,
            Operator::LessEqual => ordering != Ordering::Greater,
            Operator::NotEqual => ordering != Ordering::Equal,
            Operator::Tilde => {
                candidate.major == bound.major
                    && candidate.minor == bound.minor
                    && candidate.patch >= bound.patch
            }
            Operator::Caret => {
                if candidate.major != bound.major {
                    return false;
                }
                if bound.major == 0 {
                    if bound.minor == 0 {
                        candidate.patch == bound.patch
                    } else {
                        candidate.minor == bound.minor && candidate.patch >= bound.patch
                    }
                } else {
                    candidate.minor > bound.minor
                        || (candidate.minor == bound.minor && candidate.patch >= bound.patch)
                }
            }
        }
    }
}

impl FromStr for Constraint {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Operator::Equal => write!(f, "{}", self.version),
            op => write!(f, "{}{}", op, self.version),
        }
    }
}

/// A conjunction of constraints, as written in a requirement like `>=1.22 <1.25`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet(Vec<Constraint>);

impl ConstraintSet {
    /// Parse a whitespace-separated constraint list.
    ///
    /// Parsing is all-or-nothing: the first bad token's error is returned.
    pub fn parse(input: &str) -> Result<Self, SemverError> {
        let constraints = input
            .split_whitespace()
            .map(Constraint::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if constraints.is_empty() {
            return Err(SemverError::EmptyConstraintList);
        }

        Ok(Self(constraints))
    }

    /// True when every constraint accepts `candidate`.
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        satisfies_all(candidate, &self.0)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ConstraintSet {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}

/// True when `version` satisfies every constraint in `constraints`.
pub fn satisfies_all(version: &Version, constraints: &[Constraint]) -> bool {
    constraints.iter().all(|c| c.is_satisfied_by(version))
}
