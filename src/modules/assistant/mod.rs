//! AI Co-Pilot module
//!
//! Chat panel backed by the Gemini client. The session owns the ordered
//! message list and a single `pending` flag – exactly one model request may
//! be outstanding, a second send while pending is a no-op. The user message
//! is appended before the call is dispatched, the model message only after
//! the call resolves, so the transcript order is always chronological.

pub mod ai;

use crate::config::Language;
use crate::i18n;
use crate::types::{ChatMessage, FlashMessage, Role};
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::mpsc;

/// How many prior messages ride along with each request
const HISTORY_WINDOW: usize = 5;

/// Everything the background thread needs for one turn
pub struct TurnRequest {
    pub message: String,
    pub history: Vec<String>,
}

pub struct AssistantState {
    pub messages: Vec<ChatMessage>,
    pub pending: bool,

    pub input_buffer: String,
    pub input_mode: bool,
    /// Lines scrolled up from the transcript bottom
    pub scroll_up: usize,

    pub lang: Language,
    pub flash_message: Option<FlashMessage>,
    reply_rx: Option<mpsc::Receiver<String>>,
}

impl AssistantState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            pending: false,
            input_buffer: String::new(),
            input_mode: false,
            scroll_up: 0,
            lang: Language::default(),
            flash_message: None,
            reply_rx: None,
        }
    }

    /// Seed the fixed model greeting while the transcript is still empty.
    /// Called when the view becomes active and after a language switch, so a
    /// fresh session greets in whatever language is current at that moment.
    pub fn ensure_greeting(&mut self, lang: Language) {
        if self.messages.is_empty() {
            let s = i18n::get_strings(lang);
            self.messages
                .push(ChatMessage::new(Role::Model, s.assistant_greeting.to_string()));
        }
    }

    /// Guard checks and bookkeeping for one send, without any I/O.
    /// Returns `None` (and leaves the session untouched) for blank input or
    /// while a turn is outstanding. Otherwise appends the user message, sets
    /// `pending` and returns the request the dispatcher should carry out.
    ///
    /// The history window is snapshotted before the new message is appended:
    /// a turn carries at most the five messages that preceded it.
    pub fn prepare_turn(&mut self, text: &str) -> Option<TurnRequest> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        let history = self.history_window();
        self.messages
            .push(ChatMessage::new(Role::User, text.to_string()));
        self.pending = true;
        self.scroll_up = 0;

        Some(TurnRequest {
            message: text.to_string(),
            history,
        })
    }

    /// Rolling history: the most recent messages, oldest first,
    /// formatted as `"<role>: <text>"` lines.
    fn history_window(&self) -> Vec<String> {
        let skip = self.messages.len().saturating_sub(HISTORY_WINDOW);
        self.messages[skip..]
            .iter()
            .map(|m| format!("{}: {}", m.role.display_name(), m.text))
            .collect()
    }

    /// Send the current input (or a suggestion chip) as one chat turn.
    pub fn send(&mut self, text: &str, credential: Option<&str>, lang: Language) {
        let Some(turn) = self.prepare_turn(text) else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.reply_rx = Some(rx);

        let api_key = credential.unwrap_or_default().to_string();
        std::thread::spawn(move || {
            // generate() maps every failure to fallback text itself
            let reply = ai::generate(&api_key, &turn.message, &turn.history, lang);
            let _ = tx.send(reply);
        });
    }

    /// Poll for the model reply. Called from update_timers (non-blocking).
    pub fn poll_reply(&mut self) {
        if let Some(ref rx) = self.reply_rx {
            match rx.try_recv() {
                Ok(text) => {
                    self.complete_turn(text);
                }
                Err(mpsc::TryRecvError::Empty) => {
                    // Still waiting — do nothing
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Worker died without sending; resolve the turn anyway
                    let s = i18n::get_strings(self.lang);
                    self.complete_turn(s.ai_error.to_string());
                }
            }
        }
    }

    /// Append the model message and clear the pending flag.
    fn complete_turn(&mut self, text: String) {
        self.messages.push(ChatMessage::new(Role::Model, text));
        self.pending = false;
        self.scroll_up = 0;
        self.reply_rx = None;
    }

    /// Handle key events. Returns true when the key was consumed.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        credential: Option<&str>,
        lang: Language,
    ) -> Result<bool> {
        // Suggestion chips fire on F1-F4 in either mode
        if let KeyCode::F(n @ 1..=4) = key.code {
            let s = i18n::get_strings(lang);
            let suggestion = s.assistant_suggestions[(n - 1) as usize];
            self.send(suggestion, credential, lang);
            return Ok(true);
        }

        if self.input_mode {
            match key.code {
                KeyCode::Esc => {
                    self.input_mode = false;
                }
                KeyCode::Enter => {
                    let text = std::mem::take(&mut self.input_buffer);
                    self.send(&text, credential, lang);
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => {
                    self.input_buffer.push(c);
                }
                _ => {}
            }
            return Ok(true);
        }

        match key.code {
            KeyCode::Char('i') | KeyCode::Enter => {
                self.input_mode = true;
                Ok(true)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_up = self.scroll_up.saturating_sub(1);
                Ok(true)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_up = self.scroll_up.saturating_add(1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ── Rendering ──

pub fn render(frame: &mut Frame, state: &AssistantState, theme: &Theme, lang: Language, area: Rect) {
    let s = i18n::get_strings(lang);

    let rows = Layout::vertical([
        Constraint::Length(3), // header
        Constraint::Min(4),    // transcript
        Constraint::Length(3), // input
        Constraint::Length(2), // suggestions
    ])
    .split(area);

    render_header(frame, theme, s, rows[0]);
    render_transcript(frame, state, theme, s, rows[1]);
    render_input(frame, state, theme, s, rows[2]);
    render_suggestions(frame, theme, s, rows[3]);
}

fn render_header(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("✦ {}", s.assistant_title),
            theme.title(),
        )),
        Line::from(Span::styled(s.assistant_subtitle, theme.text_dim())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_transcript(
    frame: &mut Frame,
    state: &AssistantState,
    theme: &Theme,
    s: &i18n::Strings,
    area: Rect,
) {
    let mut lines: Vec<Line> = Vec::new();
    let width = area.width.saturating_sub(2) as usize;

    for msg in &state.messages {
        let (name, name_style, text_style, align) = match msg.role {
            Role::User => (
                s.assistant_you,
                theme.chat_user(),
                theme.text(),
                Alignment::Right,
            ),
            Role::Model => (
                s.assistant_bot,
                theme.chat_model(),
                theme.text(),
                Alignment::Left,
            ),
        };

        lines.push(
            Line::from(vec![
                Span::styled(name, name_style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", msg.formatted_time()), theme.text_dim()),
            ])
            .alignment(align),
        );
        for part in msg.text.lines() {
            lines.push(Line::from(Span::styled(part.to_string(), text_style)).alignment(align));
        }
        lines.push(Line::raw(""));
    }

    if state.pending {
        lines.push(Line::from(vec![
            Span::styled(s.assistant_bot, theme.chat_model().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", s.assistant_thinking), theme.text_dim()),
        ]));
    }

    // Stick to the bottom unless the user scrolled up
    let visible = area.height.saturating_sub(2) as usize;
    let wrapped_estimate: usize = lines
        .iter()
        .map(|l| (l.width().max(1) + width.max(1) - 1) / width.max(1))
        .sum();
    let bottom = wrapped_estimate.saturating_sub(visible);
    let offset = bottom.saturating_sub(state.scroll_up) as u16;

    let transcript = Paragraph::new(lines)
        .style(theme.block_style())
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(
            Block::default()
                .style(theme.block_style())
                .borders(Borders::NONE),
        );
    frame.render_widget(transcript, area);
}

fn render_input(
    frame: &mut Frame,
    state: &AssistantState,
    theme: &Theme,
    s: &i18n::Strings,
    area: Rect,
) {
    let border = if state.input_mode {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = if state.input_buffer.is_empty() && !state.input_mode {
        Line::from(Span::styled(s.assistant_placeholder, theme.text_dim()))
    } else {
        let cursor = if state.input_mode { "▌" } else { "" };
        Line::from(vec![
            Span::styled(state.input_buffer.clone(), theme.text()),
            Span::styled(cursor, theme.accent_style()),
        ])
    };
    frame.render_widget(Paragraph::new(content), inner);
}

fn render_suggestions(frame: &mut Frame, theme: &Theme, s: &i18n::Strings, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, suggestion) in s.assistant_suggestions.iter().enumerate() {
        spans.push(Span::styled(
            format!("F{}", i + 1),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}   ", suggestion), theme.text_dim()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.block_style()),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(lang: Language) -> AssistantState {
        let mut state = AssistantState::new();
        state.ensure_greeting(lang);
        state
    }

    #[test]
    fn test_greeting_seeds_once() {
        let mut state = seeded(Language::English);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::Model);
        assert_eq!(
            state.messages[0].text,
            i18n::get_strings(Language::English).assistant_greeting
        );

        // Second call is a no-op
        state.ensure_greeting(Language::English);
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_language_switch_reseeds_only_while_empty() {
        // Empty session: switching language changes the greeting
        let mut state = AssistantState::new();
        state.ensure_greeting(Language::Chinese);
        assert_eq!(
            state.messages[0].text,
            i18n::get_strings(Language::Chinese).assistant_greeting
        );

        // Non-empty session: the greeting stays as-is
        let mut state = seeded(Language::English);
        state.ensure_greeting(Language::Chinese);
        assert_eq!(
            state.messages[0].text,
            i18n::get_strings(Language::English).assistant_greeting
        );
    }

    #[test]
    fn test_blank_send_appends_nothing() {
        let mut state = seeded(Language::English);
        assert!(state.prepare_turn("").is_none());
        assert!(state.prepare_turn("   ").is_none());
        assert_eq!(state.messages.len(), 1);
        assert!(!state.pending);
    }

    #[test]
    fn test_send_appends_user_message_and_sets_pending() {
        let mut state = seeded(Language::English);
        let turn = state.prepare_turn("  best maps app?  ").unwrap();
        assert_eq!(turn.message, "best maps app?");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].role, Role::User);
        assert_eq!(state.messages[1].text, "best maps app?");
        assert!(state.pending);
    }

    #[test]
    fn test_second_send_rejected_while_pending() {
        let mut state = seeded(Language::English);
        assert!(state.prepare_turn("first").is_some());
        assert!(state.prepare_turn("second").is_none());
        // Only greeting + first user message
        assert_eq!(state.messages.len(), 2);

        // After the turn resolves, sends work again
        state.complete_turn("reply".into());
        assert!(!state.pending);
        assert!(state.prepare_turn("second").is_some());
    }

    #[test]
    fn test_reply_appends_model_message_in_order() {
        let mut state = seeded(Language::English);
        state.prepare_turn("hello").unwrap();
        state.complete_turn("hi there".into());
        let roles: Vec<Role> = state.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
        assert_eq!(state.messages[2].text, "hi there");
    }

    #[test]
    fn test_history_window_excludes_new_message() {
        let mut state = seeded(Language::English);
        let turn = state.prepare_turn("question").unwrap();
        // Only the greeting preceded this turn
        assert_eq!(turn.history.len(), 1);
        assert!(turn.history[0].starts_with("Assistant: "));
    }

    #[test]
    fn test_history_window_caps_at_five_oldest_first() {
        let mut state = AssistantState::new();
        for i in 0..4 {
            state.prepare_turn(&format!("q{}", i)).unwrap();
            state.complete_turn(format!("a{}", i));
        }
        // 8 messages so far; the next turn sees the last 5
        let turn = state.prepare_turn("q4").unwrap();
        assert_eq!(turn.history.len(), 5);
        assert_eq!(turn.history[0], "Assistant: a1");
        assert_eq!(turn.history[4], "Assistant: a3");
    }
}
