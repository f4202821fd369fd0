// ============================================================
// ROW VALIDATOR
// ============================================================
// Per-row cleaning and validation: required base fields plus up to
// three embedded multiple-choice question blocks

use once_cell::sync::Lazy;
use regex::Regex;

use super::row::{answer_key, clean_value, option_key, question_key, CleanedRow, RawRow};

/// Only the first three discovered question indices participate,
/// regardless of their numeric value.
pub const MAX_QUESTIONS: usize = 3;

const REQUIRED_FIELDS: [&str; 4] = ["type", "title", "desc", "variable_score"];

static QUESTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^question\s*(\d+)$").unwrap());

static QUESTION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^question\s*\d+").unwrap());

/// Outcome of validating one raw row.
#[derive(Debug, Clone)]
pub struct RowValidation {
    pub is_valid: bool,
    pub cleaned_row: CleanedRow,
    pub errors: Vec<String>,
}

/// Validate and clean a single quiz row.
///
/// A question block is copied into the cleaned row only when all six of
/// its fields are present after trimming; partially complete blocks
/// contribute errors but leak nothing through. The row is valid when no
/// errors were collected AND at least one question index was discovered
/// at all — a row with clean base fields but zero question columns is
/// invalid with an empty error list.
pub fn validate_row(row: &RawRow) -> RowValidation {
    let mut errors: Vec<String> = Vec::new();
    let mut cleaned_row = CleanedRow::new();

    for field in REQUIRED_FIELDS {
        let value = row.get(field).map(clean_value).unwrap_or("");
        if value.is_empty() {
            errors.push(format!("Missing required field: {}", field));
        } else {
            cleaned_row.insert(field, value);
        }
    }

    let question_numbers = discover_question_numbers(row);

    for &q_num in &question_numbers {
        let q_key = question_key(q_num);
        let question = row.get_tolerant(&q_key).map(clean_value).unwrap_or("");
        if question.is_empty() {
            errors.push(format!("Missing required field: {}", q_key));
            continue;
        }

        let mut has_all_options = true;
        for opt in 1..=4 {
            let key = option_key(q_num, opt);
            let value = row.get_tolerant(&key).map(clean_value).unwrap_or("");
            if value.is_empty() {
                errors.push(format!(
                    "Missing required field: {} for question {}",
                    key, q_num
                ));
                has_all_options = false;
            }
        }

        let a_key = answer_key(q_num);
        let answer = row.get_tolerant(&a_key).map(clean_value).unwrap_or("");
        if answer.is_empty() {
            errors.push(format!(
                "Missing required field: {} for question {}",
                a_key, q_num
            ));
        }

        // All six fields present: copy the whole block, trimmed
        if has_all_options && !answer.is_empty() {
            cleaned_row.insert(&q_key, question);
            for opt in 1..=4 {
                let key = option_key(q_num, opt);
                let value = row.get_tolerant(&key).map(clean_value).unwrap_or("");
                cleaned_row.insert(&key, value);
            }
            cleaned_row.insert(&a_key, answer);
        }
    }

    // Pass through everything that is not part of a question block; keys
    // of overflow blocks (beyond the chosen three) are dropped silently
    for (key, value) in &row.fields {
        if QUESTION_PREFIX.is_match(key) {
            continue;
        }
        if !cleaned_row.has_value(key) {
            cleaned_row.insert(key, clean_value(value));
        }
    }

    let is_valid = errors.is_empty() && !question_numbers.is_empty();

    RowValidation {
        is_valid,
        cleaned_row,
        errors,
    }
}

/// Scan the row's headers once for `question N` columns and return the
/// sorted, deduplicated indices, capped at [`MAX_QUESTIONS`].
fn discover_question_numbers(row: &RawRow) -> Vec<u32> {
    let mut numbers: Vec<u32> = row
        .keys()
        .filter_map(|key| {
            QUESTION_HEADER
                .captures(key)
                .and_then(|caps| caps[1].parse().ok())
        })
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers.truncate(MAX_QUESTIONS);
    numbers
}
