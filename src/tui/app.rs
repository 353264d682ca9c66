use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::output;
use crate::scoring::{EvaluationResult, Tier};
use crate::session::{load_session, Session};
use crate::tui::theme::ThemeColors;

const FLASH_DURATION: Duration = Duration::from_secs(3);

pub const TAB_TITLES: [&str; 5] = ["All", "A", "B", "C", "D"];

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

pub struct App {
    pub session: Session,
    pub session_path: PathBuf,
    pub results: Vec<EvaluationResult>,
    pub table_state: ratatui::widgets::TableState,
    /// 0 = all tiers, 1..=4 = tier A..D
    pub current_tab: usize,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub colors: ThemeColors,
}

impl App {
    pub fn new(session: Session, session_path: PathBuf, colors: ThemeColors) -> Self {
        let mut app = Self {
            session,
            session_path,
            results: Vec::new(),
            table_state: ratatui::widgets::TableState::default(),
            current_tab: 0,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            colors,
        };
        app.recompute();
        app
    }

    /// Re-run the scoring engine over the session.
    /// Must follow every session mutation; stale results are never patched.
    pub fn recompute(&mut self) {
        self.results = self.session.evaluate();
        self.clamp_selection();
    }

    /// Reload the session from disk and recompute
    pub fn reload(&mut self) -> Result<()> {
        self.session = load_session(&self.session_path)?;
        self.recompute();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(len - 1)));
        }
    }

    /// Tier filter for the current tab, None when showing all
    pub fn tab_tier(&self) -> Option<Tier> {
        match self.current_tab {
            1 => Some(Tier::A),
            2 => Some(Tier::B),
            3 => Some(Tier::C),
            4 => Some(Tier::D),
            _ => None,
        }
    }

    /// Results visible under the current tab, rank order preserved
    pub fn visible_results(&self) -> Vec<&EvaluationResult> {
        match self.tab_tier() {
            None => self.results.iter().collect(),
            Some(tier) => self
                .results
                .iter()
                .filter(|r| r.score.tier == tier)
                .collect(),
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % TAB_TITLES.len();
        self.clamp_selection();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = (self.current_tab + TAB_TITLES.len() - 1) % TAB_TITLES.len();
        self.clamp_selection();
    }

    pub fn next_row(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn previous_row(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        let previous = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(previous));
    }

    pub fn selected_result(&self) -> Option<&EvaluationResult> {
        let index = self.table_state.selected()?;
        self.visible_results().get(index).copied()
    }

    /// Open the selected account's website in the default browser
    pub fn open_selected(&self) -> Result<()> {
        let Some(result) = self.selected_result() else {
            bail!("No account selected");
        };
        let Some(website) = &result.account.website else {
            bail!("{} has no website on record", result.account.name);
        };
        crate::browser::open_url(website)
    }

    /// Write the full ranked report (all tiers) as CSV next to the
    /// working directory. Returns the path written.
    pub fn export_csv(&self) -> Result<String> {
        let path = "fitscore-report.csv".to_string();
        let mut csv = output::format_csv(&self.results);
        csv.push('\n');
        std::fs::write(&path, csv)
            .map_err(|e| anyhow::anyhow!("Failed to write CSV to {}: {}", path, e))?;
        Ok(path)
    }

    pub fn show_flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    /// Clear the flash message once it has been on screen long enough
    pub fn update_flash(&mut self) {
        if let Some((_, shown_at)) = &self.flash_message {
            if shown_at.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_breakdown(&mut self) {
        if self.selected_result().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
