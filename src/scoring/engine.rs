use std::collections::HashMap;

use super::tier::Tier;
use crate::model::{Account, AccountAnswer, AnswerValue, Question, QuestionKind};

/// Derived score for one account.
///
/// Recomputed from accounts/questions/answers on every change; never stored
/// independently of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountScore {
    pub account_id: String,
    pub total_score: f64,
    pub max_score: f64,
    /// Rounded to the nearest integer, 0 when `max_score <= 0`
    pub percentage: u8,
    pub tier: Tier,
    /// 1-based position after sorting by percentage descending
    pub rank: usize,
}

/// Per-account output bundle: identity, derived score, and the answers
/// belonging to that account.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub account: Account,
    pub score: AccountScore,
    pub answers: Vec<AccountAnswer>,
}

/// Points one question contributed to an account's score (for detail views).
#[derive(Debug, Clone)]
pub struct QuestionContribution {
    pub question_id: String,
    pub text: String,
    pub weight: f64,
    pub earned: f64,
    pub answered: bool,
}

/// Score, tier, and rank every account against the question set.
///
/// Pure function of its inputs. Answers referencing unknown account or
/// question ids are ignored. Ties in percentage keep the relative order of
/// the input `accounts` sequence and still receive distinct consecutive
/// ranks.
pub fn evaluate(
    accounts: &[Account],
    questions: &[Question],
    answers: &[AccountAnswer],
) -> Vec<EvaluationResult> {
    // O(1) lookup per (account, question) pair; a later duplicate wins,
    // matching the at-most-one-answer-per-pair contract
    let by_pair: HashMap<(&str, &str), &AccountAnswer> = answers
        .iter()
        .map(|a| ((a.account_id.as_str(), a.question_id.as_str()), a))
        .collect();

    let mut results: Vec<EvaluationResult> = accounts
        .iter()
        .map(|account| {
            let mut total_score = 0.0;
            let mut max_score = 0.0;
            for question in questions {
                max_score += question.weight;
                if let Some(answer) = by_pair.get(&(account.id.as_str(), question.id.as_str())) {
                    total_score += answer_points(question, &answer.value);
                }
            }

            // max_score <= 0 (empty question set or unvalidated weights) is
            // clamped to 0% rather than dividing
            let percentage = if max_score > 0.0 {
                (total_score / max_score * 100.0).round() as u8
            } else {
                0
            };

            let matched: Vec<AccountAnswer> = answers
                .iter()
                .filter(|a| a.account_id == account.id)
                .cloned()
                .collect();

            EvaluationResult {
                account: account.clone(),
                score: AccountScore {
                    account_id: account.id.clone(),
                    total_score,
                    max_score,
                    percentage,
                    tier: Tier::from_percentage(percentage),
                    rank: 0,
                },
                answers: matched,
            }
        })
        .collect();

    // sort_by is stable: equal percentages keep input order
    results.sort_by(|a, b| b.score.percentage.cmp(&a.score.percentage));
    for (index, result) in results.iter_mut().enumerate() {
        result.score.rank = index + 1;
    }

    results
}

/// Per-question contributions for one account, same point rules as `evaluate`.
pub fn score_breakdown(
    account: &Account,
    questions: &[Question],
    answers: &[AccountAnswer],
) -> Vec<QuestionContribution> {
    let by_pair: HashMap<(&str, &str), &AccountAnswer> = answers
        .iter()
        .map(|a| ((a.account_id.as_str(), a.question_id.as_str()), a))
        .collect();

    questions
        .iter()
        .map(|question| {
            let answer = by_pair.get(&(account.id.as_str(), question.id.as_str()));
            let earned = answer
                .map(|a| answer_points(question, &a.value))
                .unwrap_or(0.0);
            QuestionContribution {
                question_id: question.id.clone(),
                text: question.text.clone(),
                weight: question.weight,
                earned,
                answered: answer.is_some(),
            }
        })
        .collect()
}

/// All-or-nothing points for a single answer.
///
/// Boolean earns only on a true boolean; number earns on strictly positive;
/// multiple choice earns on any non-empty selection (option set membership is
/// deliberately not checked). A value whose variant does not match the
/// question kind earns nothing.
fn answer_points(question: &Question, value: &AnswerValue) -> f64 {
    match (question.kind, value) {
        (QuestionKind::Boolean, AnswerValue::Bool(true)) => question.weight,
        (QuestionKind::Number, AnswerValue::Number(n)) if *n > 0.0 => question.weight,
        (QuestionKind::MultipleChoice, AnswerValue::Choice(s)) if !s.is_empty() => question.weight,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn question(id: &str, kind: QuestionKind, weight: f64) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            kind,
            weight,
            options: if kind == QuestionKind::MultipleChoice {
                vec!["North America".to_string(), "Europe".to_string()]
            } else {
                Vec::new()
            },
            company_id: None,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            industry: "Software".to_string(),
            company_size: "50-200".to_string(),
            revenue: "$10M".to_string(),
            location: "Berlin".to_string(),
            website: None,
            notes: None,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn answer(account_id: &str, question_id: &str, value: AnswerValue) -> AccountAnswer {
        AccountAnswer {
            id: format!("ans-{}-{}", account_id, question_id),
            account_id: account_id.to_string(),
            question_id: question_id.to_string(),
            value,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_boolean_true_earns_full_weight() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        let answers = vec![answer("a1", "q1", AnswerValue::Bool(true))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score.total_score, 10.0);
        assert_eq!(results[0].score.max_score, 10.0);
        assert_eq!(results[0].score.percentage, 100);
        assert_eq!(results[0].score.tier, Tier::A);
        assert_eq!(results[0].score.rank, 1);
    }

    #[test]
    fn test_boolean_false_earns_nothing() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        let answers = vec![answer("a1", "q1", AnswerValue::Bool(false))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 0.0);
        assert_eq!(results[0].score.percentage, 0);
        assert_eq!(results[0].score.tier, Tier::D);
    }

    #[test]
    fn test_mixed_question_kinds() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 6.0),
            question("q2", QuestionKind::Number, 4.0),
        ];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(true)),
            answer("a1", "q2", AnswerValue::Number(5.0)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 10.0);
        assert_eq!(results[0].score.max_score, 10.0);
        assert_eq!(results[0].score.percentage, 100);
        assert_eq!(results[0].score.tier, Tier::A);
    }

    #[test]
    fn test_unanswered_account_scores_zero() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 5.0),
            question("q2", QuestionKind::Boolean, 5.0),
        ];

        let results = evaluate(&accounts, &questions, &[]);
        assert_eq!(results[0].score.total_score, 0.0);
        assert_eq!(results[0].score.max_score, 10.0);
        assert_eq!(results[0].score.percentage, 0);
        assert_eq!(results[0].score.tier, Tier::D);
    }

    #[test]
    fn test_tied_percentages_keep_input_order() {
        let accounts = vec![account("a1", "First"), account("a2", "Second")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 3.0),
            question("q2", QuestionKind::Boolean, 1.0),
        ];
        // Both answer q1 only: 75% each
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(true)),
            answer("a2", "q1", AnswerValue::Bool(true)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.percentage, 75);
        assert_eq!(results[1].score.percentage, 75);
        assert_eq!(results[0].account.name, "First");
        assert_eq!(results[0].score.rank, 1);
        assert_eq!(results[1].account.name, "Second");
        assert_eq!(results[1].score.rank, 2);
    }

    #[test]
    fn test_zero_questions_all_tier_d() {
        let accounts = vec![account("a1", "Acme"), account("a2", "Globex")];

        let results = evaluate(&accounts, &[], &[]);
        assert_eq!(results.len(), 2);
        for (index, result) in results.iter().enumerate() {
            assert_eq!(result.score.max_score, 0.0);
            assert_eq!(result.score.percentage, 0);
            assert_eq!(result.score.tier, Tier::D);
            assert_eq!(result.score.rank, index + 1);
        }
        assert_eq!(results[0].account.id, "a1");
    }

    #[test]
    fn test_sorted_by_percentage_descending() {
        let accounts = vec![
            account("low", "Low"),
            account("high", "High"),
            account("mid", "Mid"),
        ];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 5.0),
            question("q2", QuestionKind::Boolean, 5.0),
        ];
        let answers = vec![
            answer("high", "q1", AnswerValue::Bool(true)),
            answer("high", "q2", AnswerValue::Bool(true)),
            answer("mid", "q1", AnswerValue::Bool(true)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        let names: Vec<&str> = results.iter().map(|r| r.account.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        let ranks: Vec<usize> = results.iter().map(|r| r.score.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_max_score_independent_of_answers() {
        let accounts = vec![account("a1", "Answered"), account("a2", "Silent")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 7.0),
            question("q2", QuestionKind::Number, 3.0),
        ];
        let answers = vec![answer("a1", "q1", AnswerValue::Bool(true))];

        let results = evaluate(&accounts, &questions, &answers);
        for result in &results {
            assert_eq!(result.score.max_score, 10.0);
        }
    }

    #[test]
    fn test_number_zero_and_negative_earn_nothing() {
        let accounts = vec![account("a1", "Zero"), account("a2", "Negative")];
        let questions = vec![question("q1", QuestionKind::Number, 10.0)];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Number(0.0)),
            answer("a2", "q1", AnswerValue::Number(-4.0)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        for result in &results {
            assert_eq!(result.score.total_score, 0.0);
        }
    }

    #[test]
    fn test_choice_empty_string_earns_nothing() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::MultipleChoice, 10.0)];
        let answers = vec![answer("a1", "q1", AnswerValue::Choice(String::new()))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 0.0);
    }

    #[test]
    fn test_choice_outside_option_set_still_earns() {
        // Option membership is deliberately not checked
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::MultipleChoice, 10.0)];
        let answers = vec![answer("a1", "q1", AnswerValue::Choice("Antarctica".to_string()))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 10.0);
    }

    #[test]
    fn test_mismatched_answer_variant_earns_nothing() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        // A choice answer stored against a boolean question scores as falsy
        let answers = vec![answer("a1", "q1", AnswerValue::Choice("true".to_string()))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 0.0);
    }

    #[test]
    fn test_orphaned_answers_ignored() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        let answers = vec![
            answer("ghost", "q1", AnswerValue::Bool(true)),
            answer("a1", "no-such-question", AnswerValue::Bool(true)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score.total_score, 0.0);
        // The orphaned question answer still belongs to the account bundle
        assert_eq!(results[0].answers.len(), 1);
        assert_eq!(results[0].answers[0].question_id, "no-such-question");
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 1.0),
            question("q2", QuestionKind::Boolean, 1.0),
            question("q3", QuestionKind::Boolean, 1.0),
        ];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(true)),
            answer("a1", "q2", AnswerValue::Bool(true)),
        ];

        // 2/3 = 66.67 rounds to 67
        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.percentage, 67);
        assert_eq!(results[0].score.tier, Tier::B);
    }

    #[test]
    fn test_non_positive_max_score_clamps_to_zero_percent() {
        // Unvalidated input: a negative weight summing max_score below zero
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, -5.0)];
        let answers = vec![answer("a1", "q1", AnswerValue::Bool(true))];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.percentage, 0);
        assert_eq!(results[0].score.tier, Tier::D);
    }

    #[test]
    fn test_duplicate_pair_last_answer_wins() {
        let accounts = vec![account("a1", "Acme")];
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(false)),
            answer("a1", "q1", AnswerValue::Bool(true)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        assert_eq!(results[0].score.total_score, 10.0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let accounts = vec![account("a1", "Acme"), account("a2", "Globex")];
        let questions = vec![
            question("q1", QuestionKind::Boolean, 6.0),
            question("q2", QuestionKind::Number, 4.0),
        ];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(true)),
            answer("a2", "q2", AnswerValue::Number(12.0)),
        ];

        let first = evaluate(&accounts, &questions, &answers);
        let second = evaluate(&accounts, &questions, &answers);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.account.id, b.account.id);
        }
    }

    #[test]
    fn test_ranks_are_dense_and_unique() {
        let accounts: Vec<Account> = (0..5)
            .map(|i| account(&format!("a{}", i), &format!("Account {}", i)))
            .collect();
        let questions = vec![question("q1", QuestionKind::Number, 10.0)];
        let answers = vec![
            answer("a0", "q1", AnswerValue::Number(1.0)),
            answer("a3", "q1", AnswerValue::Number(2.0)),
        ];

        let results = evaluate(&accounts, &questions, &answers);
        let mut ranks: Vec<usize> = results.iter().map(|r| r.score.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_breakdown_matches_evaluate_totals() {
        let acc = account("a1", "Acme");
        let questions = vec![
            question("q1", QuestionKind::Boolean, 6.0),
            question("q2", QuestionKind::Number, 4.0),
            question("q3", QuestionKind::MultipleChoice, 2.0),
        ];
        let answers = vec![
            answer("a1", "q1", AnswerValue::Bool(true)),
            answer("a1", "q2", AnswerValue::Number(-1.0)),
        ];

        let breakdown = score_breakdown(&acc, &questions, &answers);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].earned, 6.0);
        assert!(breakdown[0].answered);
        assert_eq!(breakdown[1].earned, 0.0);
        assert!(breakdown[1].answered);
        assert_eq!(breakdown[2].earned, 0.0);
        assert!(!breakdown[2].answered);

        let results = evaluate(&[acc], &questions, &answers);
        let breakdown_total: f64 = breakdown.iter().map(|c| c.earned).sum();
        assert_eq!(results[0].score.total_score, breakdown_total);
        let breakdown_max: f64 = breakdown.iter().map(|c| c.weight).sum();
        assert_eq!(results[0].score.max_score, breakdown_max);
    }

    #[test]
    fn test_empty_accounts_yield_empty_results() {
        let questions = vec![question("q1", QuestionKind::Boolean, 10.0)];
        let results = evaluate(&[], &questions, &[]);
        assert!(results.is_empty());
    }
}
