//! UI module - Ratatui-based terminal interface

mod scene;
mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use coinburst::motion::Region;

use crate::app::{App, RunStatus};

pub use scene::draw_scene;
pub use widgets::*;

/// Screen areas the app needs to know about outside of drawing
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub title: Rect,
    pub scene: Rect,
    pub button: Rect,
    pub wallet: Rect,
    pub footer: Rect,
    pub status: Rect,
}

impl Screen {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Scene
                Constraint::Length(4), // Progress + activity
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let scene = chunks[1];
        let inner = scene.inner(ratatui::layout::Margin::new(1, 1));

        let button_width = 14.min(inner.width);
        let button = Rect::new(
            inner.x + 1.min(inner.width),
            inner.bottom().saturating_sub(3),
            button_width,
            3.min(inner.height),
        );

        let wallet_width = 22.min(inner.width);
        let wallet = Rect::new(
            inner.right().saturating_sub(wallet_width + 1),
            inner.y,
            wallet_width,
            3.min(inner.height),
        );

        Self {
            title: chunks[0],
            scene,
            button,
            wallet,
            footer: chunks[2],
            status: chunks[3],
        }
    }

    /// Anchor regions for the button and the wallet, in cell coordinates
    pub fn anchors(&self) -> (Region, Region) {
        (region_of(self.button), region_of(self.wallet))
    }
}

fn region_of(rect: Rect) -> Region {
    Region::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

/// Draw the main UI
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = Screen::new(frame.area());

    draw_title(frame, screen.title);
    draw_scene(frame, app, &screen);
    draw_footer(frame, app, screen.footer);
    draw_status_bar(frame, app, screen.status);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = vec![Line::from(vec![
        Span::styled(
            "  Coinburst  ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - Collect your coins"),
    ])];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(title).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(
            " Landed {}/{} ",
            app.wallet.landed, app.wallet.expected
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let progress_area = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(LandingProgress::new(app.progress()).tick(app.tick), progress_area);

    if inner.height > 1 {
        let spark_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let skip = app.history.len().saturating_sub(inner.width as usize);
        let data = app.history.iter().skip(skip).copied().collect();
        frame.render_widget(ActivitySparkline::new(data), spark_area);
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_color) = match app.wallet.status {
        RunStatus::Idle => ("Ready - press Space to collect", Color::Gray),
        RunStatus::Flying => ("Coins in flight...", Color::Yellow),
        RunStatus::Complete => ("Collected!", Color::Green),
        RunStatus::Cancelled => ("Cancelled", Color::Red),
    };

    let status = Line::from(vec![
        Span::raw(" Status: "),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw(" | "),
        Span::raw("[Space] Collect | [s] Stop | [c] Cancel | [q] Quit"),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
