//! The playfield: Collect button, wallet and the coins flying between them

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RunStatus};

use super::widgets::centered;
use super::Screen;

/// Draw the scene with its button, wallet, log and coins
pub fn draw_scene(frame: &mut Frame, app: &App, screen: &Screen) {
    let block = Block::default()
        .title(" Scene ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(screen.scene);
    frame.render_widget(block, screen.scene);

    draw_log(frame, app, inner);
    draw_button(frame, app, screen.button);
    draw_wallet(frame, app, screen.wallet);
    draw_coins(frame, app, inner);
}

fn draw_button(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.wallet.status == RunStatus::Flying {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let width = block.inner(area).width as usize;
    let label = Paragraph::new(centered("Collect", width))
        .style(style)
        .block(block);
    frame.render_widget(label, area);
}

fn draw_wallet(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.wallet.pulse > 0 {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let block = Block::default()
        .title(format!(" {} ", app.config.wallet.label))
        .borders(Borders::ALL)
        .border_style(style);
    let width = block.inner(area).width as usize;
    let balance = Paragraph::new(centered(&app.wallet.balance.to_string(), width))
        .style(style)
        .block(block);
    frame.render_widget(balance, area);
}

fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .wallet
        .log()
        .map(|message| Line::styled(message.as_str(), Style::default().fg(Color::DarkGray)))
        .collect();

    let height = (lines.len() as u16).min(area.height);
    let width = (area.width / 2).max(1);
    let log_area = Rect::new(area.x + 1.min(area.width), area.y, width, height);
    frame.render_widget(Paragraph::new(lines), log_area);
}

fn draw_coins(frame: &mut Frame, app: &App, area: Rect) {
    let glyph = app.config.ui.coin_glyph.to_string();
    let style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let buf = frame.buffer_mut();

    for position in app.coins_in_flight() {
        let (x, y) = (position.x.round(), position.y.round());
        if x < area.left() as f64
            || y < area.top() as f64
            || x >= area.right() as f64
            || y >= area.bottom() as f64
        {
            continue;
        }
        buf.set_string(x as u16, y as u16, &glyph, style);
    }
}
