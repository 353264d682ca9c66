//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::scoring::Tier;

/// Terminal background flavor, detected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Detect the terminal background. Defaults to dark when detection fails
/// (e.g. no TTY or an unresponsive terminal).
pub fn resolve_theme() -> Theme {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tier colors (best to worst)
    pub tier_a: Color,
    pub tier_b: Color,
    pub tier_c: Color,
    pub tier_d: Color,

    // Score bar colors
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub rank_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            tier_a: Color::Green,
            tier_b: Color::Cyan,
            tier_c: Color::Yellow,
            tier_d: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            rank_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            tier_a: Color::Indexed(28),
            tier_b: Color::Indexed(25),
            tier_c: Color::Indexed(130),
            tier_d: Color::Indexed(124),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            rank_color: Color::Indexed(245),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            tab_active_style: Style::new().fg(Color::Indexed(25)).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            muted: Color::Indexed(242),
            title_color: Color::Indexed(25),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Indexed(25),
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(124),
            popup_border: Color::Indexed(25),
            popup_title: Style::new().fg(Color::Indexed(25)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Color for a tier letter or bar
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::A => self.tier_a,
            Tier::B => self.tier_b,
            Tier::C => self.tier_c,
            Tier::D => self.tier_d,
        }
    }
}
