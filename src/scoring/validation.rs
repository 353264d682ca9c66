use std::collections::HashSet;

use crate::model::{Question, QuestionKind};

/// Validate the question set before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_questions(questions: &[Question]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, question) in questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            errors.push(format!("questions[{}].text: must not be empty", i));
        }
        if !(question.weight.is_finite() && question.weight > 0.0) {
            errors.push(format!(
                "questions[{}].weight: must be a positive number, got {}",
                i, question.weight
            ));
        }
        if question.kind == QuestionKind::MultipleChoice && question.options.is_empty() {
            errors.push(format!(
                "questions[{}].options: multiple choice requires at least one option",
                i
            ));
        }
        if !seen_ids.insert(question.id.as_str()) {
            errors.push(format!(
                "questions[{}].id: duplicate id '{}'",
                i, question.id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
