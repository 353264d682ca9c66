use chrono::Duration;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::model::Question;
use crate::scoring::{score_breakdown, EvaluationResult, Tier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a point value the way prior exports did: `10`, not `10.0`
pub fn format_points(value: f64) -> String {
    format!("{}", value)
}

/// Format earned over maximum points, e.g. "7/10"
pub fn format_score(total_score: f64, max_score: f64) -> String {
    format!("{}/{}", format_points(total_score), format_points(max_score))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn colorize_tier(tier: Tier) -> String {
    match tier {
        Tier::A => tier.letter().green().bold().to_string(),
        Tier::B => tier.letter().cyan().to_string(),
        Tier::C => tier.letter().yellow().to_string(),
        Tier::D => tier.letter().red().to_string(),
    }
}

/// Format per-tier counts as a single summary line,
/// e.g. "6 accounts  A: 2  B: 1  C: 0  D: 3"
pub fn format_tier_summary(results: &[EvaluationResult], use_colors: bool) -> String {
    let mut parts = vec![format!(
        "{} account{}",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    )];
    for tier in Tier::all() {
        let count = results.iter().filter(|r| r.score.tier == tier).count();
        let letter = if use_colors {
            colorize_tier(tier)
        } else {
            tier.letter().to_string()
        };
        parts.push(format!("{}: {}", letter, count));
    }
    parts.join("  ")
}

/// Format results as a ranked table, best first.
/// Columns: rank, tier, percentage, score, account name, industry.
pub fn format_ranked_table(results: &[EvaluationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No accounts to rank.".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = results
        .iter()
        .map(|r| format_score(r.score.total_score, r.score.max_score).len())
        .max()
        .unwrap_or(5);
    let separator = "  ";

    results
        .iter()
        .map(|result| {
            // Rank column fits "99.", right-aligned
            let rank_str = format!("{:>2}.", result.score.rank);
            let percent_str = format!("{:>4}", format!("{}%", result.score.percentage));
            let score_str = format!(
                "{:>width$}",
                format_score(result.score.total_score, result.score.max_score),
                width = score_width
            );

            let industry = &result.account.industry;
            let fixed_width =
                3 + 1 + 1 + percent_str.len() + score_width + separator.len() * 4 + industry.len();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&result.account.name, width - fixed_width)
                } else {
                    truncate_name(&result.account.name, 20)
                }
            } else {
                result.account.name.clone()
            };

            if use_colors {
                let tier_str = colorize_tier(result.score.tier);
                // Top three ranks stand out
                let rank_fmt = if result.score.rank <= 3 {
                    rank_str.bold().to_string()
                } else {
                    rank_str.dimmed().to_string()
                };
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_fmt,
                    tier_str,
                    separator,
                    percent_str.bold(),
                    separator,
                    score_str,
                    separator,
                    name,
                    separator,
                    industry.dimmed(),
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_str,
                    result.score.tier,
                    separator,
                    percent_str,
                    separator,
                    score_str,
                    separator,
                    name,
                    separator,
                    industry,
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one result with detailed multi-line output (for verbose mode),
/// including the per-question breakdown
pub fn format_account_detail(
    result: &EvaluationResult,
    questions: &[Question],
    use_colors: bool,
) -> String {
    let score = &result.score;
    let account = &result.account;
    let tier_str = if use_colors {
        colorize_tier(score.tier)
    } else {
        score.tier.to_string()
    };
    let name = if use_colors {
        account.name.bold().to_string()
    } else {
        account.name.clone()
    };

    let mut lines = vec![
        name,
        format!("  Industry: {}", account.industry),
        format!("  Size: {}", account.company_size),
        format!("  Revenue: {}", account.revenue),
        format!("  Location: {}", account.location),
    ];
    if let Some(website) = &account.website {
        lines.push(format!("  Website: {}", website));
    }
    if let Some(notes) = &account.notes {
        lines.push(format!("  Notes: {}", notes));
    }
    lines.push(format!("  Added: {} ago", format_age(account.age())));
    lines.push(format!(
        "  Score: {} ({}%)  Tier: {}  Rank: {}",
        format_score(score.total_score, score.max_score),
        score.percentage,
        tier_str,
        score.rank
    ));

    let breakdown = score_breakdown(account, questions, &result.answers);
    if !breakdown.is_empty() {
        lines.push("  Questions:".to_string());
        for contribution in &breakdown {
            let marker = if !contribution.answered {
                " "
            } else if contribution.earned > 0.0 {
                "+"
            } else {
                "-"
            };
            lines.push(format!(
                "    [{}] {:>5}  {}",
                marker,
                format_score(contribution.earned, contribution.weight),
                contribution.text
            ));
        }
    }

    lines.join("\n")
}

/// Format results as CSV in ascending rank order.
///
/// Header and row layout are a compatibility surface with prior exports and
/// must stay byte-for-byte stable.
pub fn format_csv(results: &[EvaluationResult]) -> String {
    let mut lines = vec!["Rank,Company,Industry,Score,Percentage,Tier".to_string()];
    for result in results {
        lines.push(format!(
            "{},{},{},\"{}/{}\",\"{}%\",{}",
            result.score.rank,
            result.account.name,
            result.account.industry,
            format_points(result.score.total_score),
            format_points(result.score.max_score),
            result.score.percentage,
            result.score.tier,
        ));
    }
    lines.join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, AccountAnswer, AnswerValue, QuestionKind};
    use crate::scoring::evaluate;
    use chrono::Utc;

    fn sample_account(id: &str, name: &str, industry: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            industry: industry.to_string(),
            company_size: "200-500".to_string(),
            revenue: "$50M".to_string(),
            location: "Berlin".to_string(),
            website: Some("https://example.com".to_string()),
            notes: None,
            owner_id: None,
            created_at: Utc::now() - Duration::hours(5),
        }
    }

    fn sample_question(id: &str, weight: f64) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            kind: QuestionKind::Boolean,
            weight,
            options: Vec::new(),
            company_id: None,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn yes(account_id: &str, question_id: &str) -> AccountAnswer {
        AccountAnswer {
            id: format!("ans-{}-{}", account_id, question_id),
            account_id: account_id.to_string(),
            question_id: question_id.to_string(),
            value: AnswerValue::Bool(true),
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn sample_results() -> (Vec<EvaluationResult>, Vec<Question>) {
        let accounts = vec![
            sample_account("a1", "Acme Corp", "Fintech"),
            sample_account("a2", "Globex", "Logistics"),
        ];
        let questions = vec![sample_question("q1", 6.0), sample_question("q2", 4.0)];
        let answers = vec![yes("a1", "q1"), yes("a1", "q2"), yes("a2", "q1")];
        (evaluate(&accounts, &questions, &answers), questions)
    }

    #[test]
    fn test_format_points_trims_integers() {
        assert_eq!(format_points(10.0), "10");
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(7.5), "7.5");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.0, 10.0), "7/10");
        assert_eq!(format_score(2.5, 10.0), "2.5/10");
    }

    #[test]
    fn test_format_csv_exact() {
        let (results, _) = sample_results();
        let csv = format_csv(&results);
        assert_eq!(
            csv,
            "Rank,Company,Industry,Score,Percentage,Tier\n\
             1,Acme Corp,Fintech,\"10/10\",\"100%\",A\n\
             2,Globex,Logistics,\"6/10\",\"60%\",B"
        );
    }

    #[test]
    fn test_format_csv_header_only_when_empty() {
        let csv = format_csv(&[]);
        assert_eq!(csv, "Rank,Company,Industry,Score,Percentage,Tier");
    }

    #[test]
    fn test_format_ranked_table_empty() {
        let result = format_ranked_table(&[], false);
        assert_eq!(result, "No accounts to rank.");
    }

    #[test]
    fn test_format_ranked_table_rows() {
        let (results, _) = sample_results();
        let table = format_ranked_table(&results, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" 1."));
        assert!(lines[0].contains("100%"));
        assert!(lines[0].contains("Acme Corp"));
        assert!(lines[0].contains("Fintech"));
        assert!(lines[1].contains(" 2."));
        assert!(lines[1].contains("60%"));
        assert!(lines[1].contains("Globex"));
    }

    #[test]
    fn test_format_tier_summary() {
        let (results, _) = sample_results();
        let summary = format_tier_summary(&results, false);
        assert_eq!(summary, "2 accounts  A: 1  B: 1  C: 0  D: 0");
    }

    #[test]
    fn test_format_tier_summary_singular() {
        let accounts = vec![sample_account("a1", "Acme", "Fintech")];
        let results = evaluate(&accounts, &[], &[]);
        let summary = format_tier_summary(&results, false);
        assert_eq!(summary, "1 account  A: 0  B: 0  C: 0  D: 1");
    }

    #[test]
    fn test_format_account_detail() {
        let (results, questions) = sample_results();
        let detail = format_account_detail(&results[0], &questions, false);
        assert!(detail.contains("Acme Corp"));
        assert!(detail.contains("Industry: Fintech"));
        assert!(detail.contains("Website: https://example.com"));
        assert!(detail.contains("Score: 10/10 (100%)"));
        assert!(detail.contains("Tier: A"));
        assert!(detail.contains("Questions:"));
        assert!(detail.contains("[+]"));
    }

    #[test]
    fn test_format_account_detail_unanswered_marker() {
        let accounts = vec![sample_account("a1", "Acme", "Fintech")];
        let questions = vec![sample_question("q1", 10.0)];
        let results = evaluate(&accounts, &questions, &[]);
        let detail = format_account_detail(&results[0], &questions, false);
        assert!(detail.contains("[ ]"));
        assert!(detail.contains("0/10"));
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Acme", 20), "Acme");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(
            truncate_name("A very long account name", 15),
            "A very long ..."
        );
    }

    #[test]
    fn test_truncate_name_unicode() {
        // Truncation counts chars, not bytes
        assert_eq!(truncate_name("Müller Gruppe AG", 10), "Müller ...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Acme Corp", 3), "Acm");
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(2)), "2d");
    }

    #[test]
    fn test_format_age_weeks() {
        assert_eq!(format_age(Duration::weeks(2)), "2w");
    }

    #[test]
    fn test_format_age_now() {
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }
}
