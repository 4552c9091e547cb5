//! Quiz evaluation.

use std::collections::HashMap;

use myark_entity::quiz::{QuizQuestion, QuizResponse, QuizSettings};

/// The evaluated responses and their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub responses: Vec<QuizResponse>,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub total_questions: u32,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub passed: bool,
}

/// Score a submission against the quiz questions.
///
/// A response is correct when its selected option set equals the correct
/// option set. Responses to unknown questions are kept unevaluated.
pub fn evaluate(
    questions: &[QuizQuestion],
    settings: &QuizSettings,
    responses: Vec<QuizResponse>,
) -> ScoreResult {
    let by_id: HashMap<&str, &QuizQuestion> =
        questions.iter().map(|q| (q.id.as_str(), q)).collect();

    let mut correct = 0u32;
    let mut incorrect = 0u32;
    let mut score = 0.0;

    let responses = responses
        .into_iter()
        .map(|mut response| {
            let Some(question) = by_id.get(response.question_id.as_str()) else {
                return response;
            };

            let mut selected: Vec<&str> =
                response.selected_options.iter().map(String::as_str).collect();
            selected.sort_unstable();
            let is_correct = selected == question.correct_option_ids();

            let marks = if is_correct {
                correct += 1;
                question.marks
            } else if !selected.is_empty() {
                incorrect += 1;
                if settings.enable_negative_marking {
                    -question.negative_marks
                } else {
                    0.0
                }
            } else {
                0.0
            };

            score += marks;
            response.is_correct = Some(is_correct);
            response.marks_awarded = Some(marks);
            response
        })
        .collect();

    let total_questions = u32::try_from(questions.len()).unwrap_or(u32::MAX);
    let max_score: f64 = questions.iter().map(|q| q.marks).sum();
    let percentage = if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    };
    let passed = percentage >= settings.passing_percentage.unwrap_or(0.0);

    ScoreResult {
        responses,
        correct,
        incorrect,
        unanswered: total_questions.saturating_sub(correct + incorrect),
        total_questions,
        score,
        max_score,
        percentage,
        passed,
    }
}
