use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::output::format_score;
use crate::scoring::score_breakdown;
use crate::tui::app::{App, InputMode, TAB_TITLES};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let mut spans = vec![Span::styled(
        "fitscore",
        Style::default().fg(colors.title_color).bold(),
    )];

    let right_text = match &app.session.company {
        Some(company) => format!("{} · {} accounts", company.name, app.results.len()),
        None => format!("{} accounts", app.results.len()),
    };
    let left_len = "fitscore".len();
    let padding_len = (area.width as usize).saturating_sub(left_len + right_text.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(right_text, Style::default().fg(colors.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let tabs = Tabs::new(TAB_TITLES.to_vec())
        .select(app.current_tab)
        .style(colors.tab_inactive_style)
        .highlight_style(colors.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors.clone();
    let results = app.visible_results();

    if results.is_empty() {
        let message = if app.results.is_empty() {
            "No accounts evaluated yet. Run `fitscore wizard` first."
        } else {
            "No accounts in this tier"
        };
        let empty_msg = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let header = Row::new(vec!["Rank", "Tier", "Fit", "", "Score", "Account", "Industry"])
        .style(colors.header_style);

    let rows: Vec<Row> = results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let score = &result.score;
            let tier_color = colors.tier_color(score.tier);

            let rank_cell = Cell::from(Span::styled(
                format!("{:>3}.", score.rank),
                Style::default().fg(colors.rank_color),
            ));
            let tier_cell = Cell::from(Span::styled(
                score.tier.letter(),
                Style::default().fg(tier_color).bold(),
            ));
            let percent_cell = Cell::from(Span::styled(
                format!("{:>4}", format!("{}%", score.percentage)),
                Style::default().fg(tier_color),
            ));
            let bar_cell = Cell::from(percentage_bar(score.percentage, 8, tier_color, &colors));
            let score_cell = Cell::from(format_score(score.total_score, score.max_score));
            let name_cell = Cell::from(result.account.name.clone());
            let industry_cell = Cell::from(Span::styled(
                result.account.industry.clone(),
                Style::default().fg(colors.muted),
            ));

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                rank_cell,
                tier_cell,
                percent_cell,
                bar_cell,
                score_cell,
                name_cell,
                industry_cell,
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Fixed-width bar visualizing a percentage
fn percentage_bar(percentage: u8, width: usize, color: Color, colors: &super::theme::ThemeColors) -> Line<'static> {
    let filled = (percentage as usize * width + 50) / 100;
    let filled = filled.min(width);
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width - filled),
            Style::default().fg(colors.bar_empty),
        ),
    ])
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;

    let line = if let Some((message, _)) = &app.flash_message {
        let color = if message.starts_with("Failed") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(format!(" {}", message), Style::default().fg(color)))
    } else {
        let key_style = Style::default().fg(colors.status_key_color);
        let text_style = Style::default().fg(colors.muted);
        Line::from(vec![
            Span::styled(" j/k", key_style),
            Span::styled(" move  ", text_style),
            Span::styled("tab", key_style),
            Span::styled(" tiers  ", text_style),
            Span::styled("b", key_style),
            Span::styled(" breakdown  ", text_style),
            Span::styled("o", key_style),
            Span::styled(" open  ", text_style),
            Span::styled("e", key_style),
            Span::styled(" export  ", text_style),
            Span::styled("r", key_style),
            Span::styled(" reload  ", text_style),
            Span::styled("?", key_style),
            Span::styled(" help  ", text_style),
            Span::styled("q", key_style),
            Span::styled(" quit", text_style),
        ])
    };

    let status = Paragraph::new(line).style(Style::default().bg(colors.status_bar_bg));
    frame.render_widget(status, area);
}

fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(result) = app.selected_result() else {
        return;
    };
    let colors = &app.colors;
    let breakdown = score_breakdown(&result.account, &app.session.questions, &result.answers);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                result.account.name.clone(),
                Style::default().bold(),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} ({}%)  Tier {}  Rank {}",
                    format_score(result.score.total_score, result.score.max_score),
                    result.score.percentage,
                    result.score.tier,
                    result.score.rank
                ),
                Style::default().fg(colors.tier_color(result.score.tier)),
            ),
        ]),
        Line::raw(""),
    ];

    if breakdown.is_empty() {
        lines.push(Line::styled(
            "No questions defined",
            Style::default().fg(colors.muted),
        ));
    }
    for contribution in &breakdown {
        let (marker, marker_color) = if !contribution.answered {
            ("·", colors.muted)
        } else if contribution.earned > 0.0 {
            ("+", colors.flash_success)
        } else {
            ("-", colors.flash_error)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(marker_color)),
            Span::styled(
                format!(
                    "{:>6}  ",
                    format_score(contribution.earned, contribution.weight)
                ),
                Style::default().bold(),
            ),
            Span::raw(contribution.text.clone()),
        ]));
    }

    let area = centered_rect(70, 60, frame.area());
    let popup = Paragraph::new(lines)
        .block(
            Block::bordered()
                .title(Span::styled(" Score breakdown ", colors.popup_title))
                .border_style(Style::default().fg(colors.popup_border)),
        )
        .style(Style::default().bg(colors.popup_bg));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let colors = &app.colors;
    let key_style = Style::default().fg(colors.status_key_color);

    let entries: [(&str, &str); 9] = [
        ("j / ↓", "next account"),
        ("k / ↑", "previous account"),
        ("tab / shift-tab", "cycle tier tabs"),
        ("b", "score breakdown for selected account"),
        ("o / enter", "open account website"),
        ("e", "export ranked report as CSV"),
        ("r", "reload session from disk and re-evaluate"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!(" {:<16}", key), key_style),
                Span::raw(*description),
            ])
        })
        .collect();

    let area = centered_rect(55, 50, frame.area());
    let popup = Paragraph::new(lines)
        .block(
            Block::bordered()
                .title(Span::styled(" Keys ", colors.popup_title))
                .border_style(Style::default().fg(colors.popup_border)),
        )
        .style(Style::default().bg(colors.popup_bg));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Centered rectangle taking the given percentage of the area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
