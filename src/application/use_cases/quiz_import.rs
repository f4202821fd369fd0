// ============================================================
// QUIZ IMPORT USE CASE
// ============================================================
// Orchestrate CSV parsing, row validation, difficulty grouping,
// and date distribution for one uploaded file

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::quiz::{
    answer_mismatch_warnings, distribute, end_date, is_empty_row, validate_row, CleanedRow,
    DateBucket, Difficulty, GroupedRows, RawRow,
};
use crate::infrastructure::csv::CsvParser;

/// One rejected row: 1-based position in the file plus its errors.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidRow {
    pub row_index: usize,
    pub errors: Vec<String>,
}

/// Everything the review screen needs after processing one CSV.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub date_buckets: Vec<DateBucket>,
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_rows: Vec<InvalidRow>,
    pub easy_count: usize,
    pub medium_count: usize,
    pub difficult_count: usize,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Answer/option consistency warnings; informational only
    pub answer_warnings: Vec<String>,
}

impl ImportReport {
    pub fn number_of_days(&self) -> usize {
        self.date_buckets.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_rows.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.invalid_rows.is_empty() || !self.answer_warnings.is_empty()
    }

    /// Human-readable processing summary for the notification surface.
    pub fn summary(&self) -> String {
        let skipped = if self.invalid_count() > 0 {
            format!(", {} invalid row(s) skipped", self.invalid_count())
        } else {
            String::new()
        };
        let range = match self.end_date {
            Some(end) => format!("{} to {}", self.start_date, end),
            None => "N/A".to_string(),
        };
        format!(
            "Processed {} valid row(s){}: {} Easy, {} Medium, {} Difficult. \
             Organized across {} date(s). Date range: {}.",
            self.valid_count,
            skipped,
            self.easy_count,
            self.medium_count,
            self.difficult_count,
            self.number_of_days(),
            range
        )
    }
}

/// Quiz CSV processing use case
pub struct QuizImportUseCase {
    parser: CsvParser,
}

impl QuizImportUseCase {
    pub fn new() -> Self {
        Self {
            parser: CsvParser::new(),
        }
    }

    /// Process CSV content already in memory.
    pub fn process_content(&self, content: &str, start_date: NaiveDate) -> Result<ImportReport> {
        let delimiter = CsvParser::detect_delimiter(content);
        let rows = CsvParser::new()
            .with_delimiter(delimiter)
            .parse_content(content)
            .map_err(|e| AppError::ParseError(format!("Failed to parse CSV content: {}", e)))?;
        self.process_rows(rows, start_date)
    }

    /// Process a CSV file from disk.
    pub fn process_file(&self, path: &Path, start_date: NaiveDate) -> Result<ImportReport> {
        let rows = self
            .parser
            .parse_file(path)
            .map_err(|e| AppError::ParseError(format!("Failed to parse CSV file: {}", e)))?;
        self.process_rows(rows, start_date)
    }

    /// Run the pipeline over parsed rows: empty-row filter, validation,
    /// difficulty grouping, date distribution.
    pub fn process_rows(&self, rows: Vec<RawRow>, start_date: NaiveDate) -> Result<ImportReport> {
        if rows.is_empty() {
            return Err(AppError::ValidationError(
                "The CSV file appears to be empty or has no valid data.".to_string(),
            ));
        }

        // Rows without a title never reach validation and count as nothing
        let rows: Vec<RawRow> = rows.into_iter().filter(|row| !is_empty_row(row)).collect();
        let total_rows = rows.len();

        let mut valid_rows: Vec<(usize, CleanedRow)> = Vec::new();
        let mut invalid_rows: Vec<InvalidRow> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let row_index = index + 1; // 1-based for user-facing messages
            let validation = validate_row(row);
            if validation.is_valid {
                valid_rows.push((row_index, validation.cleaned_row));
            } else {
                invalid_rows.push(InvalidRow {
                    row_index,
                    errors: validation.errors,
                });
            }
        }

        if !invalid_rows.is_empty() {
            warn!(count = invalid_rows.len(), "CSV rows failed validation");
        }

        // Valid means "passed validation"; a row dropped later for an
        // unrecognized type still counts here
        let valid_count = valid_rows.len();

        let mut answer_warnings = Vec::new();
        let mut grouped = GroupedRows::default();

        for (row_index, row) in valid_rows {
            for warning in answer_mismatch_warnings(&row) {
                answer_warnings.push(format!("row {}: {}", row_index, warning));
            }

            match Difficulty::classify(&row) {
                Some(Difficulty::Easy) => grouped.easy.push(row),
                Some(Difficulty::Medium) => grouped.medium.push(row),
                Some(Difficulty::Difficult) => grouped.difficult.push(row),
                None => {
                    warn!(row = row_index, "Unrecognized quiz type, row skipped");
                }
            }
        }

        let easy_count = grouped.easy.len();
        let medium_count = grouped.medium.len();
        let difficult_count = grouped.difficult.len();

        let date_buckets = distribute(&grouped, start_date);
        let end_date = end_date(start_date, date_buckets.len());

        let report = ImportReport {
            date_buckets,
            total_rows,
            valid_count,
            invalid_rows,
            easy_count,
            medium_count,
            difficult_count,
            start_date,
            end_date,
            answer_warnings,
        };

        info!(
            total = report.total_rows,
            valid = report.valid_count,
            invalid = report.invalid_count(),
            days = report.number_of_days(),
            "CSV processed"
        );

        Ok(report)
    }
}

impl Default for QuizImportUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "type,title,desc,variable_score,\
question 1,question 1 option 1,question 1 option 2,question 1 option 3,question 1 option 4,question 1 answer";

    fn quiz_line(quiz_type: &str, title: &str, answer: &str) -> String {
        format!(
            "{},{},{} description,10,What?,a,b,c,d,{}",
            quiz_type, title, title, answer
        )
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_scenario_mixed_rows() {
        // row1 easy complete, row2 medium complete, row3 hard missing option 4
        let content = format!(
            "{}\n{}\n{}\nhard,Broken,Broken description,10,What?,a,b,c,,a",
            HEADER,
            quiz_line("easy", "Easy quiz", "a"),
            quiz_line("medium", "Medium quiz", "b"),
        );
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.valid_count, 2);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(
            report.invalid_rows[0].errors,
            vec!["Missing required field: question 1 option 4 for question 1"]
        );
        assert_eq!(report.number_of_days(), 1);

        let bucket = &report.date_buckets[0];
        assert!(bucket.easy.is_some());
        assert!(bucket.medium.is_some());
        assert!(bucket.difficult.is_none());
        assert_eq!(report.end_date, Some(start()));
    }

    #[test]
    fn test_scenario_single_type_spreads_days() {
        let lines: Vec<String> = (1..=4)
            .map(|i| quiz_line("easy", &format!("Quiz {}", i), "a"))
            .collect();
        let content = format!("{}\n{}", HEADER, lines.join("\n"));
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();

        assert_eq!(report.number_of_days(), 4);
        assert_eq!(report.easy_count, 4);
        assert_eq!(report.medium_count, 0);
        let dates: Vec<_> = report
            .date_buckets
            .iter()
            .map(|b| b.date.to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]
        );
        assert_eq!(report.end_date.unwrap().to_string(), "2025-01-04");
        assert!(report.date_buckets.iter().all(|b| b.easy.is_some()));
        assert!(report.date_buckets.iter().all(|b| b.medium.is_none()));
    }

    #[test]
    fn test_empty_csv_rejected() {
        let err = QuizImportUseCase::new()
            .process_content("type,title,desc\n", start())
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_blank_title_rows_not_counted() {
        let content = format!(
            "{}\n{}\n,,,10,What?,a,b,c,d,a",
            HEADER,
            quiz_line("easy", "Real quiz", "a")
        );
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();

        // The title-less row contributes to neither valid nor invalid counts
        assert_eq!(report.total_rows, 1);
        assert_eq!(report.valid_count, 1);
        assert_eq!(report.invalid_count(), 0);
    }

    #[test]
    fn test_unknown_type_silently_dropped() {
        let content = format!(
            "{}\n{}\n{}",
            HEADER,
            quiz_line("easy", "Known", "a"),
            quiz_line("trivial", "Unknown", "a")
        );
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();

        // Dropped from every bucket, but still a valid row and not an error
        assert_eq!(report.valid_count, 2);
        assert_eq!(report.invalid_count(), 0);
        assert_eq!(report.easy_count, 1);
        assert_eq!(report.number_of_days(), 1);
    }

    #[test]
    fn test_answer_mismatch_surfaces_warning() {
        let content = format!("{}\n{}", HEADER, quiz_line("easy", "Quiz", "z"));
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();

        assert_eq!(report.valid_count, 1);
        assert_eq!(
            report.answer_warnings,
            vec!["row 1: question 1 answer must match one of its options"]
        );
    }

    #[test]
    fn test_summary_mentions_counts_and_range() {
        let content = format!(
            "{}\n{}\n{}",
            HEADER,
            quiz_line("easy", "One", "a"),
            quiz_line("medium", "Two", "b")
        );
        let report = QuizImportUseCase::new()
            .process_content(&content, start())
            .unwrap();
        let summary = report.summary();

        assert!(summary.contains("2 valid row(s)"));
        assert!(summary.contains("1 Easy, 1 Medium, 0 Difficult"));
        assert!(summary.contains("1 date(s)"));
        assert!(summary.contains("2025-01-01 to 2025-01-01"));
    }
}
