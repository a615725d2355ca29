//! System Maintenance module
//!
//! A read-only catalog of maintenance procedures for the head unit:
//! manual steps plus the equivalent ADB command, with a copy-to-clipboard
//! shortcut. The shell never executes anything itself.

use crate::config::Language;
use crate::i18n;
use crate::types::{ActionIcon, DangerLevel, FlashMessage, MaintenanceAction};
use crate::ui::theme::Theme;
use crate::ui::widgets;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use once_cell::sync::Lazy;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// The static action catalog. Content matches the shipped maintenance
/// guides; the `High` danger tier and `Settings` icon stay reserved.
pub static ACTIONS: Lazy<Vec<MaintenanceAction>> = Lazy::new(|| {
    vec![
        MaintenanceAction {
            id: "gboard-clean",
            title: |s| s.maint_gboard_title,
            description: |s| s.maint_gboard_desc,
            steps: &[
                "Open Settings",
                "Go to Apps > All Apps",
                "Find \"Gboard\"",
                "Select \"Storage & Cache\"",
                "Tap \"Clear Storage\"",
            ],
            adb_command: "pm clear com.google.android.inputmethod.latin",
            icon: ActionIcon::Trash,
            danger: DangerLevel::Low,
        },
        MaintenanceAction {
            id: "play-services-clean",
            title: |s| s.maint_play_title,
            description: |s| s.maint_play_desc,
            steps: &[
                "Open Settings",
                "Go to Apps > All Apps",
                "Find \"Google Play Services\"",
                "Select \"Storage & Cache\"",
                "Tap \"Manage Space\"",
                "Tap \"Clear All Data\"",
            ],
            adb_command: "pm clear com.google.android.gms",
            icon: ActionIcon::Cpu,
            danger: DangerLevel::Medium,
        },
        MaintenanceAction {
            id: "maps-cache",
            title: |s| s.maint_maps_title,
            description: |s| s.maint_maps_desc,
            steps: &[
                "Open Settings",
                "Apps > Google Maps",
                "Storage & Cache",
                "Clear Storage",
            ],
            adb_command: "pm clear com.google.android.apps.maps",
            icon: ActionIcon::Map,
            danger: DangerLevel::Low,
        },
    ]
});

pub struct MaintenanceState {
    pub selected: usize,
    pub detail_open: bool,

    pub lang: Language,
    pub flash_message: Option<FlashMessage>,
    /// Kept alive across copies (Wayland drops the selection otherwise)
    clipboard: Option<arboard::Clipboard>,
}

impl MaintenanceState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            detail_open: false,
            lang: Language::default(),
            flash_message: None,
            clipboard: None,
        }
    }

    pub fn show_flash(&mut self, msg: &str, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(msg.to_string(), is_error));
    }

    /// Handle key events. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, lang: Language) -> Result<bool> {
        if self.detail_open {
            match key.code {
                KeyCode::Esc | KeyCode::Char('x') => {
                    self.detail_open = false;
                }
                KeyCode::Char('c') | KeyCode::Enter => {
                    self.copy_command(lang);
                }
                _ => {}
            }
            return Ok(true);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < ACTIONS.len() {
                    self.selected += 1;
                }
                Ok(true)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(true)
            }
            KeyCode::Enter => {
                self.detail_open = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// One-shot clipboard write of the selected ADB command.
    /// Fire-and-forget: failure only produces a flash message.
    fn copy_command(&mut self, lang: Language) {
        let s = i18n::get_strings(lang);
        let command = ACTIONS[self.selected].adb_command;

        if self.clipboard.is_none() {
            self.clipboard = arboard::Clipboard::new().ok();
        }
        let copied = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(command).is_ok(),
            None => false,
        };
        if copied {
            self.show_flash(s.maint_copied, false);
        } else {
            self.show_flash(s.maint_copy_failed, true);
        }
    }
}

// ── Rendering ──

pub fn render(
    frame: &mut Frame,
    state: &MaintenanceState,
    theme: &Theme,
    lang: Language,
    area: Rect,
) {
    let s = i18n::get_strings(lang);

    let rows = Layout::vertical([
        Constraint::Length(4), // header
        Constraint::Min(4),    // action cards
    ])
    .split(area);

    let header = vec![
        Line::from(Span::styled(s.maint_title, theme.title())),
        Line::from(Span::styled(s.maint_subtitle, theme.text_dim())),
        Line::from(Span::styled(s.maint_note, theme.warning())),
    ];
    frame.render_widget(
        Paragraph::new(header).style(theme.block_style()),
        rows[0],
    );

    let items: Vec<ListItem> = ACTIONS
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let selected = i == state.selected;
            let danger = danger_span(action.danger, theme, s);
            let marker = if selected { "▸ " } else { "  " };

            let mut lines = vec![Line::from(vec![
                Span::styled(marker, theme.accent_style()),
                Span::styled(format!("{} ", action.icon.glyph()), theme.text()),
                Span::styled(
                    (action.title)(s),
                    if selected {
                        theme.selected()
                    } else {
                        theme.text().add_modifier(Modifier::BOLD)
                    },
                ),
                Span::raw("  "),
                danger,
            ])];
            lines.push(Line::from(Span::styled(
                format!("    {}", (action.description)(s)),
                theme.text_dim(),
            )));
            if selected {
                lines.push(Line::from(Span::styled(
                    format!("    {} ⏎", s.maint_view_instructions),
                    theme.accent_style(),
                )));
            }
            lines.push(Line::raw(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .style(theme.block_style())
            .borders(Borders::NONE),
    );
    frame.render_widget(list, rows[1]);

    if state.detail_open {
        render_detail(frame, state, theme, s, area);
    }
}

fn danger_span<'a>(danger: DangerLevel, theme: &Theme, s: &i18n::Strings) -> Span<'a> {
    match danger {
        DangerLevel::Low => Span::styled(s.danger_low, theme.success()),
        DangerLevel::Medium => Span::styled(s.danger_medium, theme.warning()),
        DangerLevel::High => Span::styled(s.danger_high, theme.error()),
    }
}

fn render_detail(
    frame: &mut Frame,
    state: &MaintenanceState,
    theme: &Theme,
    s: &i18n::Strings,
    area: Rect,
) {
    let action = &ACTIONS[state.selected];

    let mut content: Vec<Line> = vec![
        Line::from(Span::styled((action.description)(s), theme.text_dim())),
        Line::raw(""),
        Line::from(Span::styled(
            s.maint_manual_steps,
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
    ];
    for (idx, step) in action.steps.iter().enumerate() {
        content.push(Line::from(vec![
            Span::styled(format!(" {}. ", idx + 1), theme.text_dim()),
            Span::styled(*step, theme.text()),
        ]));
    }
    content.push(Line::raw(""));
    content.push(Line::from(Span::styled(
        s.maint_adb_command,
        theme.success().add_modifier(Modifier::BOLD),
    )));
    content.push(Line::from(Span::styled(
        format!(" $ {}", action.adb_command),
        theme.text(),
    )));

    if action.danger == DangerLevel::Medium {
        content.push(Line::raw(""));
        content.push(Line::from(Span::styled(s.maint_warning, theme.warning())));
    }

    widgets::render_popup(
        frame,
        (action.title)(s),
        content,
        &[(s.maint_copy, 'c'), ("Esc", 'x')],
        theme,
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_three_actions_with_unique_ids() {
        assert_eq!(ACTIONS.len(), 3);
        let mut ids: Vec<&str> = ACTIONS.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_every_action_is_complete() {
        let s = i18n::get_strings(Language::English);
        for action in ACTIONS.iter() {
            assert!(!(action.title)(s).is_empty());
            assert!(!(action.description)(s).is_empty());
            assert!(!action.steps.is_empty());
            assert!(action.adb_command.starts_with("pm clear "));
        }
    }

    #[test]
    fn test_reserved_tiers_stay_unused() {
        assert!(ACTIONS.iter().all(|a| a.danger != DangerLevel::High));
        assert!(ACTIONS.iter().all(|a| a.icon != ActionIcon::Settings));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = MaintenanceState::new();
        let up = KeyEvent::from(KeyCode::Char('k'));
        let down = KeyEvent::from(KeyCode::Char('j'));
        state.handle_key(up, Language::English).unwrap();
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_key(down, Language::English).unwrap();
        }
        assert_eq!(state.selected, ACTIONS.len() - 1);
    }

    #[test]
    fn test_enter_opens_and_esc_closes_detail() {
        let mut state = MaintenanceState::new();
        state
            .handle_key(KeyEvent::from(KeyCode::Enter), Language::English)
            .unwrap();
        assert!(state.detail_open);
        state
            .handle_key(KeyEvent::from(KeyCode::Esc), Language::English)
            .unwrap();
        assert!(!state.detail_open);
    }
}
