use std::fmt;

use lexicard_types::WordRecord;

/// How many records can be shown as a fill-in-the-blank card
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoverageReport {
    pub total: usize,
    pub quizzable: usize,
    pub missing: usize,
}

impl CoverageReport {
    pub fn from_records(records: &[WordRecord]) -> Self {
        let mut report = CoverageReport::default();

        for record in records {
            if record.word.is_empty() {
                continue;
            }
            report.total += 1;

            let has_target = record
                .quiz
                .as_ref()
                .is_some_and(|quiz| !quiz.target_word.is_empty());
            if has_target {
                report.quizzable += 1;
            } else {
                report.missing += 1;
            }
        }

        report
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.quizzable as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total words: {}", self.total)?;
        writeln!(f, "{}", "-".repeat(20))?;
        writeln!(
            f,
            "Quizzable Words (Enriched): {} ({:.2}%)",
            self.quizzable,
            self.percentage()
        )?;
        writeln!(f, "Failed (No Quiz Data): {}", self.missing)?;
        write!(f, "{}", "-".repeat(20))
    }
}
