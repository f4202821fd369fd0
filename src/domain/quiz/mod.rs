// ============================================================
// QUIZ DOMAIN LAYER
// ============================================================
// Core types and logic for the daily-quiz import pipeline
// No I/O, no async

mod answer_check;
mod difficulty;
mod payload;
mod row;
mod schedule;
mod validation;

pub use answer_check::answer_mismatch_warnings;
pub use difficulty::Difficulty;
pub use payload::{transform_row, BulkUploadRequest, Question, QuizPayload, DEFAULT_VARIABLE_SCORE};
pub use row::{
    answer_key, clean_value, is_empty_row, option_key, question_key, CleanedRow, FieldMap, RawRow,
};
pub use schedule::{distribute, end_date, DateBucket, GroupedRows};
pub use validation::{validate_row, RowValidation, MAX_QUESTIONS};
