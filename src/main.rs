use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_VALIDATION: i32 = 2;
const EXIT_IO: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the guided four-step evaluation wizard
    Wizard,
    /// Browse ranked results in an interactive TUI (default when a session exists)
    Tui,
    /// Print the ranked report to stdout
    Report,
    /// Export the ranked report as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Open an account's website by its rank number
    Open {
        /// Rank of the account to open (1-based, as shown in the report)
        rank: usize,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fitscore")]
#[command(about = "Score and tier target accounts with weighted fit questions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (per-account breakdowns in reports)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to session file (defaults to ~/.config/fitscore/session.json)
    #[arg(short, long, global = true)]
    session: Option<String>,

    /// Path to config file (defaults to ~/.config/fitscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let session_path = cli
        .session
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(fitscore::session::get_session_path);

    // No subcommand: browse an existing session, or start the wizard when
    // there is nothing to browse yet
    let command = cli.command.unwrap_or_else(|| {
        if session_path.exists() {
            Commands::Tui
        } else {
            eprintln!("No session found at {}; starting wizard.", session_path.display());
            Commands::Wizard
        }
    });

    match command {
        Commands::Wizard => {
            let config = match fitscore::config::load_config(cli.config.map(PathBuf::from)) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if cli.verbose && !config.templates.is_empty() {
                eprintln!("Loaded {} question template(s) from config", config.templates.len());
            }
            if let Err(e) = fitscore::wizard::run_wizard(&session_path, &config) {
                eprintln!("Wizard error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Tui => {
            let session = load_session_or_exit(&session_path);
            validate_or_exit(&session);
            let colors = fitscore::tui::ThemeColors::for_theme(fitscore::tui::resolve_theme());
            let app = fitscore::tui::App::new(session, session_path, colors);
            if let Err(e) = fitscore::tui::run_tui(app) {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Report => {
            let session = load_session_or_exit(&session_path);
            validate_or_exit(&session);
            let results = session.evaluate();
            let use_colors = fitscore::output::should_use_colors();

            println!("{}", fitscore::output::format_tier_summary(&results, use_colors));
            println!();
            if cli.verbose {
                for result in &results {
                    println!(
                        "{}",
                        fitscore::output::format_account_detail(
                            result,
                            &session.questions,
                            use_colors
                        )
                    );
                    println!();
                }
            } else {
                println!("{}", fitscore::output::format_ranked_table(&results, use_colors));
            }
        }
        Commands::Export { output } => {
            let session = load_session_or_exit(&session_path);
            validate_or_exit(&session);
            let results = session.evaluate();
            let csv = fitscore::output::format_csv(&results);

            match output {
                Some(path) => {
                    let mut contents = csv;
                    contents.push('\n');
                    if let Err(e) = std::fs::write(&path, contents) {
                        eprintln!("Failed to write CSV to {}: {}", path.display(), e);
                        std::process::exit(EXIT_IO);
                    }
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", csv),
            }
        }
        Commands::Open { rank } => {
            let session = load_session_or_exit(&session_path);
            validate_or_exit(&session);
            let results = session.evaluate();

            if rank < 1 || rank > results.len() {
                eprintln!("Invalid rank {}. Must be between 1 and {}.", rank, results.len());
                std::process::exit(EXIT_VALIDATION);
            }

            let result = &results[rank - 1];
            let Some(website) = &result.account.website else {
                eprintln!("{} has no website on record.", result.account.name);
                std::process::exit(EXIT_VALIDATION);
            };
            if let Err(e) = fitscore::browser::open_url(website) {
                eprintln!("Failed to open browser: {}", e);
                std::process::exit(EXIT_IO);
            }
            println!("Opening {} in browser: {}", result.account.name, website);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_session_or_exit(session_path: &std::path::Path) -> fitscore::session::Session {
    match fitscore::session::load_session(session_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Session error: {}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

/// Report all question validation errors and exit before scoring
fn validate_or_exit(session: &fitscore::session::Session) {
    if let Err(errors) = fitscore::scoring::validate_questions(&session.questions) {
        eprintln!("Question errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_VALIDATION);
    }
}
