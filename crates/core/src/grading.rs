//! Score-to-grade evaluation.

/// Half-open grading intervals over `[0, 20]`, finest first.
const GRADE_TABLE: [(f64, f64, &str, &str); 6] = [
    (0.0, 5.0, "F", "Very Poor"),
    (5.0, 8.0, "E", "Poor"),
    (8.0, 10.0, "D", "Below Average"),
    (10.0, 13.0, "C", "Good"),
    (13.0, 18.0, "B", "Very Good"),
    (18.0, 20.0, "A", "Excellent"),
];

/// Map a score in `[0, 20]` to a `(grade, remark)` pair.
///
/// Two exact boundary values override the interval table: a score of 20
/// (above every half-open interval) is (A, Excellent), and a score of
/// exactly 10 is (C, Average) rather than the interval's (C, Good).
/// Out-of-range scores fall back to (N/A, N/A); callers are expected to
/// have validated the range already.
pub fn evaluate(score: f64) -> (&'static str, &'static str) {
    if score == 20.0 {
        return ("A", "Excellent");
    }
    if score == 10.0 {
        return ("C", "Average");
    }

    for (low, high, grade, remark) in GRADE_TABLE {
        if low <= score && score < high {
            return (grade, remark);
        }
    }

    ("N/A", "N/A")
}

/// Round a score to the 3-decimal precision marks are stored at.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_table() {
        assert_eq!(evaluate(0.0), ("F", "Very Poor"));
        assert_eq!(evaluate(4.999), ("F", "Very Poor"));
        assert_eq!(evaluate(5.0), ("E", "Poor"));
        assert_eq!(evaluate(7.5), ("E", "Poor"));
        assert_eq!(evaluate(8.0), ("D", "Below Average"));
        assert_eq!(evaluate(9.999), ("D", "Below Average"));
        assert_eq!(evaluate(10.001), ("C", "Good"));
        assert_eq!(evaluate(12.0), ("C", "Good"));
        assert_eq!(evaluate(13.0), ("B", "Very Good"));
        assert_eq!(evaluate(17.999), ("B", "Very Good"));
        assert_eq!(evaluate(18.0), ("A", "Excellent"));
        assert_eq!(evaluate(19.5), ("A", "Excellent"));
    }

    #[test]
    fn test_boundary_overrides() {
        // 20 sits above the last half-open interval and 10 would otherwise
        // read (C, Good); both are deliberate special cases.
        assert_eq!(evaluate(20.0), ("A", "Excellent"));
        assert_eq!(evaluate(10.0), ("C", "Average"));
    }

    #[test]
    fn test_out_of_range_falls_back() {
        assert_eq!(evaluate(-0.5), ("N/A", "N/A"));
        assert_eq!(evaluate(20.001), ("N/A", "N/A"));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(15.5), 15.5);
        assert_eq!(round_score(12.34567), 12.346);
        assert_eq!(round_score(0.0004), 0.0);
    }
}
