//! The guided four-step evaluation flow: company profile, weighted
//! questions, accounts with answers, ranked results.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::model::{AnswerValue, Question, QuestionKind};
use crate::output;
use crate::scoring::validate_questions;
use crate::session::{save_session, Session};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt until the user enters a non-empty value.
fn prompt_required(message: &str) -> Result<String> {
    loop {
        let input = prompt(&format!("{}: ", message))?;
        if !input.is_empty() {
            return Ok(input);
        }
        println!("  Required. Try again.");
    }
}

/// Prompt for an optional value. Empty input returns None.
fn prompt_optional(message: &str) -> Result<Option<String>> {
    let input = prompt(&format!("{} (optional): ", message))?;
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input))
    }
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt for a positive weight, re-prompting until valid.
fn prompt_weight() -> Result<f64> {
    loop {
        let input = prompt_with_default("Weight", "10")?;
        match input.parse::<f64>() {
            Ok(w) if w.is_finite() && w > 0.0 => return Ok(w),
            Ok(_) => println!("  Invalid: weight must be a positive number. Try again."),
            Err(_) => println!("  Invalid: weight must be a number. Try again."),
        }
    }
}

/// Prompt to pick one item from a numbered list. Empty input returns None.
fn prompt_pick(message: &str, items: &[String]) -> Result<Option<usize>> {
    for (i, item) in items.iter().enumerate() {
        println!("    {}. {}", i + 1, item);
    }
    loop {
        let input = prompt(&format!("{} (1-{}, empty to skip): ", message, items.len()))?;
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= items.len() => return Ok(Some(n - 1)),
            _ => println!("  Invalid: pick a number between 1 and {}.", items.len()),
        }
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

fn step_header(step: u32, title: &str) {
    println!();
    let heading = format!("Step {} of 4 — {}", step, title);
    typewriter(&heading);
    println!("{}", "-".repeat(heading.chars().count()));
}

/// Run the guided four-step evaluation wizard.
///
/// Builds a fresh session, saves it to `session_path`, and prints the ranked
/// report at the end.
pub fn run_wizard(session_path: &Path, config: &Config) -> Result<()> {
    println!();
    typewriter("fitscore — account fit evaluation");

    let mut session = Session::new();

    collect_company(&mut session)?;
    collect_questions(&mut session, config)?;
    collect_accounts(&mut session)?;
    show_results(&session)?;

    save_session(session_path, &session)?;
    println!();
    println!("Session saved to {}", session_path.display());
    println!("Run `fitscore` to browse the results, or `fitscore export` for CSV.");

    Ok(())
}

fn collect_company(session: &mut Session) -> Result<()> {
    step_header(1, "Company profile");
    typewriter("Describe your own company first. This frames the evaluation and appears in the report header.");
    println!();

    let name = prompt_required("Company name")?;
    let description = prompt_with_default("Description", "")?;
    let industry = prompt_required("Industry")?;
    let target_market = prompt_required("Target market")?;

    session.set_company(name, description, industry, target_market);
    Ok(())
}

fn collect_questions(session: &mut Session, config: &Config) -> Result<()> {
    step_header(2, "Evaluation questions");
    typewriter("Build the weighted questions each account will be evaluated against.");
    typewriter("Weights express relative importance; an account earns a question's full weight or nothing.");
    println!();

    if !config.templates.is_empty() {
        let use_templates = prompt_yes_no(
            &format!(
                "Start from the {} question template(s) in your config?",
                config.templates.len()
            ),
            true,
        )?;
        if use_templates {
            for template in &config.templates {
                session.add_question(
                    template.text.clone(),
                    template.kind,
                    template.weight,
                    template.options.clone(),
                );
                println!("  Added: {}", template.text);
            }
        }
    }

    loop {
        println!();
        if !session.questions.is_empty() {
            let add_more = prompt_yes_no("Add another question?", false)?;
            if !add_more {
                break;
            }
        }

        let text = prompt_required("Question text")?;
        let kind = loop {
            let input = prompt_with_default("Type: 1=yes/no 2=number 3=multiple choice", "1")?;
            match input.as_str() {
                "1" => break QuestionKind::Boolean,
                "2" => break QuestionKind::Number,
                "3" => break QuestionKind::MultipleChoice,
                _ => println!("  Invalid: enter 1, 2, or 3."),
            }
        };
        let weight = prompt_weight()?;
        let options = if kind == QuestionKind::MultipleChoice {
            loop {
                let raw = prompt_required("Options (comma-separated)")?;
                let options: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if options.is_empty() {
                    println!("  Invalid: at least one option is required.");
                } else {
                    break options;
                }
            }
        } else {
            Vec::new()
        };

        session.add_question(text, kind, weight, options);
    }

    if let Err(errors) = validate_questions(&session.questions) {
        // Loop-validated prompts should make this unreachable; report anyway
        println!("Question errors:");
        for error in errors {
            println!("  - {}", error);
        }
        anyhow::bail!("Question set is invalid");
    }

    println!();
    println!(
        "{} question(s), maximum score {}",
        session.questions.len(),
        output::format_points(session.questions.iter().map(|q| q.weight).sum::<f64>())
    );
    Ok(())
}

fn collect_accounts(session: &mut Session) -> Result<()> {
    step_header(3, "Accounts");
    typewriter("Add the target accounts and answer the questions for each.");
    typewriter("Leave an answer empty to skip it; unanswered questions earn nothing.");

    loop {
        println!();
        if !session.accounts.is_empty() {
            let add_more = prompt_yes_no("Add another account?", true)?;
            if !add_more {
                break;
            }
        }

        let name = prompt_required("Account name")?;
        let industry = prompt_required("Industry")?;
        let company_size = prompt_with_default("Company size", "unknown")?;
        let revenue = prompt_with_default("Revenue", "unknown")?;
        let location = prompt_with_default("Location", "unknown")?;
        let website = prompt_optional("Website")?;
        let notes = prompt_optional("Notes")?;

        let account_id =
            session.add_account(name, industry, company_size, revenue, location, website, notes);

        let questions: Vec<Question> = session.questions.clone();
        for question in &questions {
            answer_question(session, &account_id, question)?;
        }
    }

    Ok(())
}

fn answer_question(session: &mut Session, account_id: &str, question: &Question) -> Result<()> {
    println!("  {}", question.text);
    let value = match question.kind {
        QuestionKind::Boolean => loop {
            let input = prompt("    yes/no (empty to skip): ")?;
            match input.to_lowercase().as_str() {
                "" => return Ok(()),
                "y" | "yes" => break AnswerValue::Bool(true),
                "n" | "no" => break AnswerValue::Bool(false),
                _ => println!("    Invalid: enter yes or no."),
            }
        },
        QuestionKind::Number => loop {
            let input = prompt("    number (empty to skip): ")?;
            if input.is_empty() {
                return Ok(());
            }
            match input.parse::<f64>() {
                Ok(n) if n.is_finite() => break AnswerValue::Number(n),
                _ => println!("    Invalid: enter a number."),
            }
        },
        QuestionKind::MultipleChoice => match prompt_pick("    Pick", &question.options)? {
            Some(index) => AnswerValue::Choice(question.options[index].clone()),
            None => return Ok(()),
        },
    };

    session.record_answer(account_id, &question.id, value)
}

fn show_results(session: &Session) -> Result<()> {
    step_header(4, "Results");

    let results = session.evaluate();
    let use_colors = output::should_use_colors();

    println!("{}", output::format_tier_summary(&results, use_colors));
    println!();
    println!("{}", output::format_ranked_table(&results, use_colors));

    if !results.is_empty() {
        println!();
        let export = prompt_yes_no("Export the report as CSV?", false)?;
        if export {
            let path = prompt_with_default("CSV path", "fitscore-report.csv")?;
            let mut csv = output::format_csv(&results);
            csv.push('\n');
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write CSV to {}", path))?;
            println!("Wrote {}", path);
        }
    }

    Ok(())
}
