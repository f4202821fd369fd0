// ============================================================
// API PAYLOAD TRANSFORMER
// ============================================================
// Convert a cleaned row into the exact shape the bulk-upload
// endpoint expects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::row::{answer_key, option_key, question_key, CleanedRow};
use super::validation::MAX_QUESTIONS;

/// Score assigned when `variable_score` does not parse as a number.
pub const DEFAULT_VARIABLE_SCORE: f64 = 100.0;

/// One multiple-choice question as POSTed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub answer: String,
}

/// One quiz record of the bulk-upload payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPayload {
    pub title: String,
    pub description: String,
    pub variable_score: f64,
    pub publish_date: NaiveDate,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
}

/// Request body of `POST /api/daily-quiz/bulk-upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUploadRequest {
    pub quizzes: Vec<QuizPayload>,
}

/// Transform a per-day, per-difficulty cleaned row into an upload record.
///
/// Question completeness is re-checked here: a block is included only if
/// its text, all four options, and the answer are all non-empty. A result
/// with zero questions signals the orchestrator to exclude the quiz from
/// the payload.
pub fn transform_row(
    row: &CleanedRow,
    publish_date: NaiveDate,
    difficulty: Difficulty,
) -> QuizPayload {
    let mut questions = Vec::new();

    for q_num in 1..=MAX_QUESTIONS as u32 {
        let name = field(row, &question_key(q_num));
        let options: Vec<&str> = (1..=4).map(|i| field(row, &option_key(q_num, i))).collect();
        let answer = field(row, &answer_key(q_num));

        if !name.is_empty() && options.iter().all(|o| !o.is_empty()) && !answer.is_empty() {
            questions.push(Question {
                name: name.to_string(),
                option1: options[0].to_string(),
                option2: options[1].to_string(),
                option3: options[2].to_string(),
                option4: options[3].to_string(),
                answer: answer.to_string(),
            });
        }
    }

    let description = row
        .get("desc")
        .filter(|v| !v.is_empty())
        .or_else(|| row.get("description"))
        .unwrap_or("")
        .trim()
        .to_string();

    QuizPayload {
        title: field(row, "title").to_string(),
        description,
        variable_score: row
            .get("variable_score")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_VARIABLE_SCORE),
        publish_date,
        difficulty,
        questions,
    }
}

fn field<'a>(row: &'a CleanedRow, key: &str) -> &'a str {
    row.get(key).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn cleaned_quiz_row() -> CleanedRow {
        let mut row = CleanedRow::new();
        row.insert("title", "Capitals");
        row.insert("desc", "Geography quiz");
        row.insert("variable_score", "25");
        row.insert("question 1", "Capital of France?");
        for (i, opt) in ["Paris", "Rome", "Berlin", "Madrid"].iter().enumerate() {
            row.insert(&option_key(1, i as u32 + 1), opt);
        }
        row.insert("question 1 answer", "Paris");
        row
    }

    #[test]
    fn test_transform_basic() {
        let quiz = transform_row(&cleaned_quiz_row(), march(15), Difficulty::Easy);

        assert_eq!(quiz.title, "Capitals");
        assert_eq!(quiz.description, "Geography quiz");
        assert_eq!(quiz.variable_score, 25.0);
        assert_eq!(quiz.publish_date, march(15));
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].name, "Capital of France?");
        assert_eq!(quiz.questions[0].answer, "Paris");
    }

    #[test]
    fn test_score_defaults_when_unparseable() {
        let mut row = cleaned_quiz_row();
        row.insert("variable_score", "lots");
        let quiz = transform_row(&row, march(15), Difficulty::Easy);
        assert_eq!(quiz.variable_score, DEFAULT_VARIABLE_SCORE);

        let mut row = cleaned_quiz_row();
        row.fields.remove("variable_score");
        let quiz = transform_row(&row, march(15), Difficulty::Easy);
        assert_eq!(quiz.variable_score, DEFAULT_VARIABLE_SCORE);
    }

    #[test]
    fn test_description_falls_back() {
        let mut row = cleaned_quiz_row();
        row.fields.remove("desc");
        row.insert("description", "fallback text");
        let quiz = transform_row(&row, march(15), Difficulty::Medium);
        assert_eq!(quiz.description, "fallback text");
    }

    #[test]
    fn test_incomplete_block_excluded() {
        let mut row = cleaned_quiz_row();
        row.insert("question 2", "Orphan question");
        row.insert("question 2 option 1", "a");
        let quiz = transform_row(&row, march(15), Difficulty::Easy);
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn test_zero_questions_signal() {
        let mut row = CleanedRow::new();
        row.insert("title", "Empty");
        row.insert("desc", "No questions survived");
        let quiz = transform_row(&row, march(15), Difficulty::Difficult);
        assert!(quiz.questions.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let quiz = transform_row(&cleaned_quiz_row(), march(15), Difficulty::Difficult);
        let json = serde_json::to_value(&quiz).unwrap();

        assert_eq!(json["publish_date"], "2025-03-15");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["questions"][0]["option1"], "Paris");
    }
}
