//! Lifecycle state machine for academic periods (years, terms, sequences).
//!
//! Each scope moves through `Draft -> Active -> Closed`, never backwards.
//! "At most one Active per scope" is enforced twice: by an existence check
//! before insert and by a partial unique index (`uq_*_single_active`) so
//! concurrent creates lose the race at the constraint instead of producing
//! a second active record.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Minimum number of sequences a term must hold before it can be closed.
pub const MIN_SEQUENCES_PER_TERM: i64 = 2;
/// Minimum number of terms a year must hold before it can be closed.
pub const MIN_TERMS_PER_YEAR: i64 = 3;
/// Minimum number of sequences (across all terms) a year must hold before
/// it can be closed.
pub const MIN_SEQUENCES_PER_YEAR: i64 = 6;

/// Status of a year, term, or sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStatus {
    Draft,
    Active,
    Closed,
}

impl PeriodStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PeriodStatus::Draft => "draft",
            PeriodStatus::Active => "active",
            PeriodStatus::Closed => "closed",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, PeriodStatus::Active)
    }

    /// Whether the transition `self -> to` is a legal forward move.
    pub const fn can_transition(self, to: PeriodStatus) -> bool {
        matches!(
            (self, to),
            (PeriodStatus::Draft, PeriodStatus::Active)
                | (PeriodStatus::Active, PeriodStatus::Closed)
        )
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PeriodStatus::Draft),
            "active" => Ok(PeriodStatus::Active),
            "closed" => Ok(PeriodStatus::Closed),
            other => Err(CoreError::Internal(format!(
                "Unknown period status '{other}'"
            ))),
        }
    }
}

/// Check the counted-children precondition for closing a term.
pub fn check_close_term(sequence_count: i64) -> Result<(), CoreError> {
    if sequence_count < MIN_SEQUENCES_PER_TERM {
        return Err(CoreError::forbidden(format!(
            "You can't deactivate a term with less than {MIN_SEQUENCES_PER_TERM} sequences"
        )));
    }
    Ok(())
}

/// Check the counted-children preconditions for closing a year.
pub fn check_close_year(term_count: i64, sequence_count: i64) -> Result<(), CoreError> {
    if term_count < MIN_TERMS_PER_YEAR {
        return Err(CoreError::forbidden(format!(
            "Cannot deactivate a year with less than {MIN_TERMS_PER_YEAR} terms"
        )));
    }
    if sequence_count < MIN_SEQUENCES_PER_YEAR {
        return Err(CoreError::forbidden(format!(
            "Cannot deactivate a year with less than {MIN_SEQUENCES_PER_YEAR} sequences"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_status_round_trip() {
        for status in [
            PeriodStatus::Draft,
            PeriodStatus::Active,
            PeriodStatus::Closed,
        ] {
            let parsed: PeriodStatus = status.as_str().parse().expect("parse should succeed");
            assert_eq!(parsed, status);
        }
        assert!("bogus".parse::<PeriodStatus>().is_err());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(PeriodStatus::Draft.can_transition(PeriodStatus::Active));
        assert!(PeriodStatus::Active.can_transition(PeriodStatus::Closed));

        // No skips, no reversals.
        assert!(!PeriodStatus::Draft.can_transition(PeriodStatus::Closed));
        assert!(!PeriodStatus::Closed.can_transition(PeriodStatus::Active));
        assert!(!PeriodStatus::Active.can_transition(PeriodStatus::Draft));
        assert!(!PeriodStatus::Active.can_transition(PeriodStatus::Active));
    }

    #[test]
    fn test_close_term_requires_two_sequences() {
        assert_matches!(check_close_term(0), Err(CoreError::Forbidden(_)));
        assert_matches!(check_close_term(1), Err(CoreError::Forbidden(_)));
        assert!(check_close_term(2).is_ok());
        assert!(check_close_term(5).is_ok());
    }

    #[test]
    fn test_close_year_requires_three_terms_and_six_sequences() {
        assert_matches!(check_close_year(2, 6), Err(CoreError::Forbidden(_)));
        assert_matches!(check_close_year(3, 5), Err(CoreError::Forbidden(_)));
        assert!(check_close_year(3, 6).is_ok());
        assert!(check_close_year(4, 9).is_ok());
    }
}
