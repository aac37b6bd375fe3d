// src/core/status.rs

use std::fmt;
use std::ops::Not;

/// Three-valued answer to a predicate over a ring.
///
/// Inexact rings (balls, intervals) cannot always decide whether an element
/// is zero, so predicates never collapse to `bool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }

    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    pub fn is_false(self) -> bool {
        self == Truth::False
    }

    pub fn is_unknown(self) -> bool {
        self == Truth::Unknown
    }

    /// Kleene conjunction: a definite `False` wins over `Unknown`.
    pub fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }

    /// Kleene disjunction: a definite `True` wins over `Unknown`.
    pub fn or(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::True, _) | (_, Truth::True) => Truth::True,
            (Truth::False, Truth::False) => Truth::False,
            _ => Truth::Unknown,
        }
    }
}

impl Not for Truth {
    type Output = Truth;

    fn not(self) -> Truth {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        Truth::from_bool(value)
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => write!(f, "true"),
            Truth::False => write!(f, "false"),
            Truth::Unknown => write!(f, "unknown"),
        }
    }
}

/// Failure outcome of a ring or polynomial operation.
///
/// Ordered so that the worse outcome compares greater: `Unable < Domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum GrError {
    /// The ring could not decide or compute the answer (inexact zero test,
    /// missing capability such as exact division by 3).
    #[error("unable to compute the result in this ring")]
    Unable,

    /// The result is mathematically undefined for these inputs.
    #[error("result is undefined for these inputs (domain error)")]
    Domain,
}

impl GrError {
    /// Worst of two outcomes.
    pub fn combine(self, other: GrError) -> GrError {
        self.max(other)
    }
}

/// `Ok` is SUCCESS.
pub type GrResult<T> = Result<T, GrError>;

/// Accumulates outcomes of a sequence of sub-operations that deliberately
/// keeps going after a failure, the way status flags are OR-ed together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    worst: Option<GrError>,
}

impl Status {
    pub fn new() -> Self {
        Status { worst: None }
    }

    /// Records the outcome of `result` and hands back its value on success.
    pub fn record<T>(&mut self, result: GrResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    pub fn fail(&mut self, error: GrError) {
        self.worst = Some(match self.worst {
            Some(w) => w.combine(error),
            None => error,
        });
    }

    pub fn is_success(&self) -> bool {
        self.worst.is_none()
    }

    pub fn finish(self) -> GrResult<()> {
        match self.worst {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}

/// Worst-of combination of two unit results.
pub fn combine(a: GrResult<()>, b: GrResult<()>) -> GrResult<()> {
    match (a, b) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(x), Err(y)) => Err(x.combine(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_kleene_logic() {
        assert_eq!(Truth::True.and(Truth::Unknown), Truth::Unknown);
        assert_eq!(Truth::False.and(Truth::Unknown), Truth::False);
        assert_eq!(Truth::True.or(Truth::Unknown), Truth::True);
        assert_eq!(Truth::False.or(Truth::Unknown), Truth::Unknown);
        assert_eq!(!Truth::Unknown, Truth::Unknown);
        assert_eq!(!Truth::True, Truth::False);
    }

    #[test]
    fn test_error_ordering() {
        assert!(GrError::Unable < GrError::Domain);
        assert_eq!(GrError::Unable.combine(GrError::Domain), GrError::Domain);
        assert_eq!(combine(Ok(()), Err(GrError::Unable)), Err(GrError::Unable));
        assert_eq!(combine(Err(GrError::Domain), Err(GrError::Unable)), Err(GrError::Domain));
    }

    #[test]
    fn test_status_accumulates_worst() {
        let mut status = Status::new();
        assert_eq!(status.record::<u32>(Ok(3)), Some(3));
        assert!(status.is_success());
        assert_eq!(status.record::<u32>(Err(GrError::Unable)), None);
        assert_eq!(status.record::<u32>(Ok(4)), Some(4));
        assert_eq!(status.finish(), Err(GrError::Unable));

        let mut status = Status::new();
        status.fail(GrError::Domain);
        status.fail(GrError::Unable);
        assert_eq!(status.finish(), Err(GrError::Domain));
    }
}
