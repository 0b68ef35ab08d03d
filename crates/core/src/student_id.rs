//! External student-id generation.
//!
//! Ids look like `FAS24K042`: school initials, two-digit admission year,
//! one uppercase letter, and a three-digit zero-padded number. Letter and
//! number are drawn fresh on every attempt; after [`MAX_ATTEMPTS`]
//! collisions against the supplied snapshot of known ids the generator
//! reports exhaustion. The database still enforces uniqueness through
//! `students.student_id UNIQUE`, so a race between two concurrent creates
//! fails at the constraint rather than producing a duplicate.

use std::collections::HashSet;

use rand::Rng;

/// Give up after this many collisions.
pub const MAX_ATTEMPTS: u32 = 20;

/// The identifier space for the year is (practically) used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpaceExhausted;

/// Generates unique student ids against a pre-fetched snapshot of the ids
/// already in use.
pub struct StudentIdGenerator {
    school_initials: String,
    year_suffix: String,
    existing: HashSet<String>,
}

impl StudentIdGenerator {
    /// `admission_year` is the full calendar year (e.g. 2024); only its last
    /// two digits appear in the id.
    pub fn new(
        school_initials: &str,
        admission_year: i32,
        existing: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            school_initials: school_initials.to_string(),
            year_suffix: format!("{:02}", admission_year.rem_euclid(100)),
            existing: existing.into_iter().collect(),
        }
    }

    /// Draw candidate ids until one misses the snapshot or the attempt
    /// budget runs out.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, IdSpaceExhausted> {
        for _ in 0..MAX_ATTEMPTS {
            let letter = (b'A' + rng.random_range(0..26u8)) as char;
            let number = rng.random_range(1..=999u16);
            let candidate = format!(
                "{}{}{}{:03}",
                self.school_initials, self.year_suffix, letter, number
            );

            if !self.existing.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(IdSpaceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_first_attempt_is_well_formed() {
        let generator = StudentIdGenerator::new("FAS", 2024, Vec::new());
        let mut rng = StdRng::seed_from_u64(7);
        let id = generator.generate(&mut rng).expect("space is empty");

        assert_eq!(id.len(), 9);
        assert!(id.starts_with("FAS24"));
        let letter = id.as_bytes()[5];
        assert!(letter.is_ascii_uppercase());
        assert!(id[6..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_id_misses_snapshot() {
        let existing = vec!["FAS24A001".to_string(), "FAS24B002".to_string()];
        let generator = StudentIdGenerator::new("FAS", 2024, existing.clone());
        let mut rng = StdRng::seed_from_u64(42);
        let id = generator.generate(&mut rng).expect("plenty of space left");
        assert!(!existing.contains(&id));
    }

    #[test]
    fn test_exhaustion_after_max_attempts() {
        // Fill the entire space for the year so every draw collides.
        let mut existing = Vec::with_capacity(26 * 999);
        for letter in b'A'..=b'Z' {
            for number in 1..=999u16 {
                existing.push(format!("FAS2024{}{:03}", letter as char, number));
            }
        }
        // Initials chosen so candidates match the filled space exactly.
        let generator = StudentIdGenerator::new("FAS20", 2024, existing);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generator.generate(&mut rng), Err(IdSpaceExhausted));
    }
}
