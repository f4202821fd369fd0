use super::row::{answer_key, option_key, question_key, CleanedRow};
use super::validation::MAX_QUESTIONS;

/// Verify that each complete question block's answer matches one of its
/// four options. Mismatches are reported as warnings; they never affect
/// row validity or the upload payload.
pub fn answer_mismatch_warnings(row: &CleanedRow) -> Vec<String> {
    let mut warnings = Vec::new();

    for q_num in 1..=MAX_QUESTIONS as u32 {
        if row.get(&question_key(q_num)).is_none() {
            continue;
        }
        let Some(answer) = row.get(&answer_key(q_num)) else {
            continue;
        };

        let matches_an_option =
            (1..=4).any(|i| row.get(&option_key(q_num, i)) == Some(answer));
        if !matches_an_option {
            warnings.push(format!(
                "question {} answer must match one of its options",
                q_num
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_answer(answer: &str) -> CleanedRow {
        let mut row = CleanedRow::new();
        row.insert("question 1", "Pick one");
        for (i, opt) in ["a", "b", "c", "d"].iter().enumerate() {
            row.insert(&option_key(1, i as u32 + 1), opt);
        }
        row.insert("question 1 answer", answer);
        row
    }

    #[test]
    fn test_matching_answer_no_warning() {
        assert!(answer_mismatch_warnings(&row_with_answer("c")).is_empty());
    }

    #[test]
    fn test_mismatched_answer_warns() {
        assert_eq!(
            answer_mismatch_warnings(&row_with_answer("z")),
            vec!["question 1 answer must match one of its options"]
        );
    }

    #[test]
    fn test_absent_blocks_ignored() {
        assert!(answer_mismatch_warnings(&CleanedRow::new()).is_empty());
    }
}
