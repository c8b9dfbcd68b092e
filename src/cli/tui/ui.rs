//! Terminal setup and preview layout

use std::io::{self, stdout, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::App;
use super::canvas::{self, Scene};

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

const HELP: &str =
    "a anchor  o overlap  v variant  c color  +/- count  z showZero  i invisible  q quit";

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = ratatui::Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Draw the preview, the resolved state and the key help
pub fn draw(frame: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Preview
            Constraint::Length(6), // Details
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let preview_block = Block::default().title("Preview").borders(Borders::ALL);
    let preview_area = preview_block.inner(chunks[0]);
    frame.render_widget(preview_block, chunks[0]);

    let details = match app.resolved() {
        Ok(badge) => {
            let (child_width, child_height) = app.child_size();
            let scene = Scene {
                badge: &badge,
                overlap: app.props().overlap,
                child: app.child(),
                child_width,
                child_height,
            };
            canvas::draw(frame.buffer_mut(), preview_area, &scene);
            detail_lines(app, &badge)
        }
        Err(e) => vec![Line::styled(e.to_string(), Style::default().fg(Color::Red))],
    };

    frame.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Resolved").borders(Borders::ALL)),
        chunks[1],
    );

    let status = app.status_message().unwrap_or(HELP);
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn detail_lines(app: &App<'_>, badge: &crate::domain::ResolvedBadge) -> Vec<Line<'static>> {
    let props = app.props();
    let content = badge.content.display.clone().unwrap_or_else(|| "(empty)".to_string());
    let visibility = if badge.content.invisible { "invisible" } else { "visible" };

    vec![
        Line::from(format!(
            "anchor: {}  overlap: {}  variant: {}  color: {}",
            props.anchor_origin, props.overlap, props.variant, props.color
        )),
        Line::from(format!("content: {} ({})", content, visibility)),
        Line::from(format!(
            "classes: {}",
            badge.slots.badge.props.class_name().unwrap_or_default()
        )),
    ]
}
