//! Pure statistics helpers behind the reporting endpoints.
//!
//! The repositories fetch flat rows; everything numeric happens here so the
//! division-by-zero guards and rounding rules are testable without a
//! database.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Score at or above which a mark counts as a pass (exactly half of 20).
pub const PASS_SCORE: f64 = 10.0;

/// Round to two decimals, the precision used in API payloads.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted average of `(score, coefficient)` pairs.
///
/// The denominator is the sum of coefficients of subjects actually marked,
/// not of all enrolled subjects. Returns 0 when there are no marks.
pub fn weighted_average(marks: &[(f64, i32)]) -> f64 {
    let total_coefficient: i32 = marks.iter().map(|(_, c)| c).sum();
    if total_coefficient == 0 {
        return 0.0;
    }
    let total_score: f64 = marks.iter().map(|(s, c)| s * f64::from(*c)).sum();
    total_score / f64::from(total_coefficient)
}

/// A student's average for one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceAverage {
    pub name: String,
    pub average: f64,
}

/// Drop a performance list that is a single zero-average entry; it only
/// means no marks have been entered yet.
pub fn suppress_blank_performance(averages: Vec<SequenceAverage>) -> Vec<SequenceAverage> {
    match averages.as_slice() {
        [only] if only.average == 0.0 => Vec::new(),
        _ => averages,
    }
}

/// One mark feeding the class/subject/sequence report.
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry {
    pub score: f64,
    pub is_male: bool,
}

/// Head-count totals split by gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub total: i64,
    pub male: i64,
    pub female: i64,
}

/// Pass/fail statistics for one class, subject, and sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PassFailReport {
    pub enrolment: GenderCounts,
    pub passes: GenderCounts,
    pub fails: GenderCounts,
    /// `None` whenever the matching enrolment count is zero.
    pub pass_percentage: Option<f64>,
    pub male_pass_percentage: Option<f64>,
    pub female_pass_percentage: Option<f64>,
    /// Defined as `100 - pass percentage`, so `None` exactly when the pass
    /// percentage is `None`.
    pub fail_percentage: Option<f64>,
    pub male_fail_percentage: Option<f64>,
    pub female_fail_percentage: Option<f64>,
    pub average_score: Option<f64>,
}

impl PassFailReport {
    pub fn compute(entries: &[ScoredEntry]) -> Self {
        let mut enrolment = GenderCounts::default();
        let mut passes = GenderCounts::default();
        let mut score_sum = 0.0;

        for entry in entries {
            enrolment.total += 1;
            score_sum += entry.score;
            if entry.is_male {
                enrolment.male += 1;
            } else {
                enrolment.female += 1;
            }
            if entry.score >= PASS_SCORE {
                passes.total += 1;
                if entry.is_male {
                    passes.male += 1;
                } else {
                    passes.female += 1;
                }
            }
        }

        let fails = GenderCounts {
            total: enrolment.total - passes.total,
            male: enrolment.male - passes.male,
            female: enrolment.female - passes.female,
        };

        let pass_percentage = percentage(passes.total, enrolment.total);
        let male_pass_percentage = percentage(passes.male, enrolment.male);
        let female_pass_percentage = percentage(passes.female, enrolment.female);

        let average_score = if enrolment.total > 0 {
            #[allow(clippy::cast_precision_loss)]
            Some(round2(score_sum / enrolment.total as f64))
        } else {
            None
        };

        PassFailReport {
            enrolment,
            passes,
            fails,
            pass_percentage,
            male_pass_percentage,
            female_pass_percentage,
            fail_percentage: pass_percentage.map(|p| round2(100.0 - p)),
            male_fail_percentage: male_pass_percentage.map(|p| round2(100.0 - p)),
            female_fail_percentage: female_pass_percentage.map(|p| round2(100.0 - p)),
            average_score,
        }
    }
}

fn percentage(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(round2(numerator as f64 / denominator as f64 * 100.0))
}

/// Age by calendar-year subtraction, matching the rest of the school's
/// paperwork rather than exact birthdays.
pub fn age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}
