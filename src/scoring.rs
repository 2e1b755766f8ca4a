// src/scoring.rs

use std::fmt;

use crate::error::AppError;
use crate::models::{attempt::TestResult, question::Question};

/// Contract violations detected before any grading happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// Answer vector length does not match the question set length.
    /// Never silently truncated or padded.
    LengthMismatch { expected: usize, got: usize },
    /// A non-null answer points outside the question's option list.
    OptionOutOfRange { question: usize },
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::LengthMismatch { expected, got } => write!(
                f,
                "Answer vector length {} does not match question count {}",
                got, expected
            ),
            GradeError::OptionOutOfRange { question } => {
                write!(f, "Answer for question {} is not a valid option index", question)
            }
        }
    }
}

impl std::error::Error for GradeError {}

impl From<GradeError> for AppError {
    fn from(err: GradeError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Rounds half-up to the nearest integer (0.5 rounds towards positive
/// infinity, matching the behavior the result contract was built on).
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Grades a submitted answer vector against the authoritative question set.
///
/// Per question: correct answers add `marks`, incorrect non-null answers
/// subtract `negative_marks`, unattempted (null) answers contribute
/// nothing. The score is never clamped, so it may end up negative. A paper
/// with zero total marks grades to percentage 0 rather than dividing by
/// zero.
pub fn grade(questions: &[Question], answers: &[Option<i32>]) -> Result<TestResult, GradeError> {
    if answers.len() != questions.len() {
        return Err(GradeError::LengthMismatch {
            expected: questions.len(),
            got: answers.len(),
        });
    }

    for (index, (question, answer)) in questions.iter().zip(answers).enumerate() {
        if let Some(selected) = answer {
            if *selected < 0 || *selected as usize >= question.options.len() {
                return Err(GradeError::OptionOutOfRange { question: index });
            }
        }
    }

    let total_marks: f64 = questions.iter().map(|q| q.marks).sum();

    let mut score = 0.0;
    for (question, answer) in questions.iter().zip(answers) {
        match answer {
            Some(selected) if *selected == question.correct_option_index => {
                score += question.marks;
            }
            Some(_) => {
                score -= question.negative_marks;
            }
            None => {}
        }
    }

    let percentage = if total_marks > 0.0 {
        round_half_up(score / total_marks * 100.0)
    } else {
        0
    };

    Ok(TestResult {
        score,
        total_marks,
        percentage,
        correct_answers: questions.iter().map(|q| q.correct_option_index).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn question(position: i32, marks: f64, negative_marks: f64, correct: i32) -> Question {
        Question {
            id: position as i64 + 1,
            test_id: 1,
            position,
            question_text: format!("Question {}", position + 1),
            options: Json(vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ]),
            correct_option_index: correct,
            explanation: None,
            marks,
            negative_marks,
            created_at: None,
        }
    }

    #[test]
    fn test_grade_with_negative_marking() {
        // 1 correct, 1 incorrect, 1 unattempted.
        let questions = vec![
            question(0, 2.0, 0.5, 1),
            question(1, 2.0, 0.5, 1),
            question(2, 2.0, 0.5, 2),
        ];
        let answers = vec![Some(1), Some(0), None];

        let result = grade(&questions, &answers).unwrap();
        assert_eq!(result.score, 1.5);
        assert_eq!(result.total_marks, 6.0);
        assert_eq!(result.percentage, 25);
        assert_eq!(result.correct_answers, vec![1, 1, 2]);
    }

    #[test]
    fn test_grade_all_unattempted() {
        let questions = vec![question(0, 2.0, 1.0, 0), question(1, 2.0, 1.0, 3)];
        let answers = vec![None, None];

        let result = grade(&questions, &answers).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_grade_score_can_go_negative() {
        let questions = vec![question(0, 1.0, 2.0, 0), question(1, 1.0, 2.0, 0)];
        let answers = vec![Some(1), Some(1)];

        let result = grade(&questions, &answers).unwrap();
        assert_eq!(result.score, -4.0);
        // -4 / 2 * 100 = -200, no floor at zero.
        assert_eq!(result.percentage, -200);
    }

    #[test]
    fn test_grade_length_mismatch_rejected() {
        let questions = vec![question(0, 1.0, 0.0, 0), question(1, 1.0, 0.0, 0)];
        let answers = vec![Some(0)];

        let err = grade(&questions, &answers).unwrap_err();
        assert_eq!(err, GradeError::LengthMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_grade_option_out_of_range_rejected() {
        let questions = vec![question(0, 1.0, 0.0, 0)];

        let err = grade(&questions, &[Some(4)]).unwrap_err();
        assert_eq!(err, GradeError::OptionOutOfRange { question: 0 });

        let err = grade(&questions, &[Some(-1)]).unwrap_err();
        assert_eq!(err, GradeError::OptionOutOfRange { question: 0 });
    }

    #[test]
    fn test_grade_empty_paper() {
        let result = grade(&[], &[]).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total_marks, 0.0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(24.5), 25);
        assert_eq!(round_half_up(24.4), 24);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-2.5), -2);
    }
}
