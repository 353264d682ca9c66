pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next() {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Tier tabs
                KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => app.next_tab(),
                KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => app.previous_tab(),

                // Open account website in browser
                KeyCode::Enter | KeyCode::Char('o') => {
                    if let Some(result) = app.selected_result() {
                        let name = result.account.name.clone();
                        match app.open_selected() {
                            Ok(()) => app.show_flash(format!("Opened: {}", name)),
                            Err(e) => app.show_flash(format!("Failed to open: {}", e)),
                        }
                    }
                }

                // Export CSV
                KeyCode::Char('e') => match app.export_csv() {
                    Ok(path) => app.show_flash(format!("Exported {}", path)),
                    Err(e) => app.show_flash(format!("Failed to export: {}", e)),
                },

                // Reload session from disk and re-evaluate
                KeyCode::Char('r') => match app.reload() {
                    Ok(()) => app.show_flash("Re-evaluated from session file".to_string()),
                    Err(e) => app.show_flash(format!("Failed to reload: {}", e)),
                },

                // Help
                KeyCode::Char('?') => app.show_help(),

                // Score breakdown
                KeyCode::Char('b') => app.show_breakdown(),

                _ => {}
            }
        }
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.dismiss_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
