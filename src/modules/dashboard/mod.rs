//! Dashboard module
//!
//! The home view: speedometer fed by the GPS watcher, clock, weather tile,
//! music placeholder, device bar and the Start Driving deep link.

pub mod gps;

use crate::config::Language;
use crate::i18n;
use crate::types::{FlashMessage, GpsStatus};
use crate::ui::theme::Theme;
use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::mpsc;

const MAPS_DRIVING_URL: &str =
    "https://www.google.com/maps/dir/?api=1&destination=&travelmode=driving";

pub struct DashboardState {
    pub speed_kmh: u32,
    pub gps_status: GpsStatus,
    pub time: String,
    pub date: String,

    pub lang: Language,
    pub flash_message: Option<FlashMessage>,
    gps_rx: mpsc::Receiver<u32>,
}

impl DashboardState {
    pub fn new() -> Self {
        let mut state = Self {
            speed_kmh: 0,
            gps_status: GpsStatus::Searching,
            time: String::new(),
            date: String::new(),
            lang: Language::default(),
            flash_message: None,
            gps_rx: gps::watch(),
        };
        state.update_clock();
        state
    }

    /// Refresh the displayed time and date. Called every loop pass.
    pub fn update_clock(&mut self) {
        let now = Local::now();
        self.time = now.format("%H:%M").to_string();
        self.date = match self.lang {
            Language::English => now.format("%a, %b %-d").to_string(),
            Language::Chinese => {
                let weekday = ["一", "二", "三", "四", "五", "六", "日"]
                    [now.weekday().num_days_from_monday() as usize];
                format!("{}月{}日 週{}", now.month(), now.day(), weekday)
            }
        };
    }

    /// Drain pending speed updates (non-blocking); the latest wins.
    pub fn poll_gps(&mut self) {
        while let Ok(kmh) = self.gps_rx.try_recv() {
            self.speed_kmh = kmh;
            self.gps_status = GpsStatus::Active;
        }
    }

    pub fn show_flash(&mut self, msg: &str, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(msg.to_string(), is_error));
    }

    /// Handle key events. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, lang: Language) -> Result<bool> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('m') => {
                self.open_driving_mode(lang);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Fire the Google Maps driving-mode deep link; no response is consumed.
    fn open_driving_mode(&mut self, lang: Language) {
        let s = i18n::get_strings(lang);
        if open::that(MAPS_DRIVING_URL).is_err() {
            self.show_flash(s.dash_maps_failed, true);
        }
    }
}

// ── Rendering ──

pub fn render(frame: &mut Frame, state: &DashboardState, theme: &Theme, lang: Language, area: Rect) {
    let s = i18n::get_strings(lang);

    let columns = Layout::horizontal([
        Constraint::Percentage(45), // speedometer
        Constraint::Percentage(55), // widget stack
    ])
    .split(area);

    render_speedometer(frame, state, theme, s, columns[0]);

    let rows = Layout::vertical([
        Constraint::Length(6), // clock + drive button
        Constraint::Length(5), // music
        Constraint::Min(4),    // weather + device bar
    ])
    .split(columns[1]);

    let top = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);
    render_clock(frame, state, theme, top[0]);
    render_drive_button(frame, theme, s, top[1]);

    render_music(frame, theme, s, rows[1]);

    let bottom = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[2]);
    render_weather(frame, theme, s, bottom[0]);
    render_device_bar(frame, theme, s, bottom[1]);
}

fn tile<'a>(theme: &Theme) -> Block<'a> {
    Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border())
}

fn render_speedometer(
    frame: &mut Frame,
    state: &DashboardState,
    theme: &Theme,
    s: &i18n::Strings,
    area: Rect,
) {
    let block = tile(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gps_line = match state.gps_status {
        GpsStatus::Active => Span::styled(format!("➤ {}", s.dash_gps_active), theme.success()),
        GpsStatus::Searching => {
            Span::styled(format!("➤ {}", s.dash_gps_searching), theme.text_dim())
        }
    };

    let pad = inner.height.saturating_sub(6) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::raw("")).collect();
    lines.push(Line::from(Span::styled(
        s.dash_current_speed.to_uppercase(),
        theme.text_dim().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}", state.speed_kmh),
            theme.speed_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" km/h", theme.accent_style()),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(gps_line));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_clock(frame: &mut Frame, state: &DashboardState, theme: &Theme, area: Rect) {
    let block = tile(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            state.time.clone(),
            theme.clock_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state.date.clone(), theme.text_dim())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_drive_button(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.accent_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("🧭 {}", s.dash_start_driving),
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · Enter", s.dash_google_maps),
            theme.text_dim(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_music(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let block = tile(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("♪ ", theme.chat_model()),
            Span::styled(
                s.dash_not_playing,
                theme.text().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(s.dash_connect_bluetooth, theme.text_dim())),
        Line::from(Span::styled(
            "▰▰▰▱▱▱▱▱▱▱▱▱",
            theme.text_dim(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_weather(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let block = tile(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pad = inner.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::raw("")).collect();
    lines.push(Line::from(Span::styled("🌧", theme.accent_style())));
    lines.push(Line::from(Span::styled(
        s.dash_temp,
        theme.text().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(s.dash_cloudy, theme.text_dim())));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_device_bar(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let block = tile(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entry = |label: &'static str, value: Span<'static>| -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                label.to_uppercase(),
                theme.text_dim(),
            )),
            Line::from(value),
        ]
    };

    let cols = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(inner);

    let cells = [
        entry(s.dash_device, Span::styled("carmate", theme.text())),
        entry(
            s.dash_status,
            Span::styled(s.dash_online, theme.success().add_modifier(Modifier::BOLD)),
        ),
        entry(s.dash_system, Span::styled("Linux", theme.text())),
    ];
    for (cell, col) in cells.into_iter().zip(cols.iter()) {
        frame.render_widget(Paragraph::new(cell).alignment(Alignment::Center), *col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_formats_per_language() {
        let mut state = DashboardState::new();
        state.lang = Language::English;
        state.update_clock();
        assert_eq!(state.time.len(), 5);
        assert!(state.date.contains(", "));

        state.lang = Language::Chinese;
        state.update_clock();
        assert!(state.date.contains('月'));
        assert!(state.date.contains('週'));
    }

    #[test]
    fn test_gps_starts_searching() {
        let state = DashboardState::new();
        assert_eq!(state.gps_status, GpsStatus::Searching);
        assert_eq!(state.speed_kmh, 0);
    }
}
