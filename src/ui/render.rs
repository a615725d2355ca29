//! Main rendering module for carmate
//!
//! Renders the complete UI:
//! - Vertical sidebar: back arrow, the three views, utility items (left)
//! - Active view content (right)
//! - Global status bar (bottom)
//! - Overlays: settings, help, brightness menu, dimmer

use crate::app::{App, Overlay};
use crate::i18n;
use crate::modules;
use crate::modules::dimmer::PRESETS;
use crate::nav::View;
use crate::ui::widgets;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 16;

/// Main render function – entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Screen-off: the dimmer owns the whole frame
    if app.dimmer.is_blocking() {
        let s = i18n::get_strings(app.config.language);
        widgets::render_wake_screen(frame, s.dim_wake_hint, area);
        return;
    }

    // Partial dim is just a darker theme for this frame
    let theme = app.theme.dimmed(app.dimmer.brightness());

    // Fill entire background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let vertical = Layout::vertical([
        Constraint::Min(8),    // sidebar + content
        Constraint::Length(1), // status bar
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(30),
    ])
    .split(vertical[0]);

    render_sidebar(frame, app, &theme, horizontal[0]);
    render_content(frame, app, &theme, horizontal[1]);
    render_status_bar(frame, app, &theme, vertical[1]);

    match app.overlay {
        Overlay::None => {}
        Overlay::Settings => render_settings(frame, app, &theme, area),
        Overlay::Help => render_help(frame, app, &theme, area),
        Overlay::Brightness => render_brightness_menu(frame, app, &theme, area),
    }
}

/// Render the vertical sidebar
fn render_sidebar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = i18n::get_strings(app.config.language);

    let sidebar_block = Block::default()
        .style(theme.block_style())
        .borders(Borders::RIGHT)
        .border_style(theme.border());
    frame.render_widget(sidebar_block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Logo
    lines.push(Line::from(vec![
        Span::styled(
            " carmate",
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" v{}", env!("CARGO_PKG_VERSION")),
            theme.text_dim(),
        ),
    ]));
    lines.push(Line::raw(""));

    // Back arrow, greyed out without history
    let back_style = if app.nav.can_go_back() {
        theme.text()
    } else {
        theme.text_dim()
    };
    lines.push(Line::from(vec![
        Span::styled(" ⬅ ", back_style),
        Span::styled(s.sidebar_back, back_style),
        Span::styled(" ⌫", theme.text_dim()),
    ]));
    lines.push(Line::raw(""));

    // The three views
    for &view in View::all() {
        let is_active = app.nav.current() == view;
        if is_active {
            lines.push(Line::from(vec![
                Span::styled(" ▸ ", theme.accent_style()),
                Span::styled(view.key_hint(), theme.accent_style()),
                Span::styled(
                    format!(" {}", view.label(app.config.language)),
                    theme.accent_style().add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(view.key_hint(), theme.text_dim()),
                Span::styled(
                    format!(" {}", view.label(app.config.language)),
                    theme.text(),
                ),
            ]));
        }
    }

    // Separator
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(" {}", "─".repeat((SIDEBAR_WIDTH as usize).saturating_sub(3))),
        theme.border(),
    ));

    // Utility items
    if app.install_prompt.is_some() {
        lines.push(Line::from(vec![
            Span::styled("   I ", theme.success()),
            Span::styled(s.sidebar_install, theme.success()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("   g ", theme.text_dim()),
        Span::styled(app.config.language.tag(), theme.text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("   b ", theme.text_dim()),
        Span::styled(s.sidebar_dim, theme.text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("   q ", theme.text_dim()),
        Span::styled(s.sidebar_exit, theme.error()),
    ]));

    frame.render_widget(Paragraph::new(lines).style(theme.block_style()), area);
}

/// Render the active view's content
fn render_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let lang = app.config.language;
    match app.nav.current() {
        View::Dashboard => modules::dashboard::render(frame, &app.dashboard, theme, lang, area),
        View::Maintenance => {
            modules::maintenance::render(frame, &app.maintenance, theme, lang, area)
        }
        View::Assistant => modules::assistant::render(frame, &app.assistant, theme, lang, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = i18n::get_strings(app.config.language);
    let right = format!("{}  {}", app.dashboard.time, app.config.language.tag());
    widgets::render_status_bar(frame, s.hint_global, app.active_flash(), &right, theme, area);
}

// ── Overlays ──

fn render_settings(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = i18n::get_strings(app.config.language);

    let key_status = if std::env::var(crate::config::CREDENTIAL_ENV).is_ok() {
        s.settings_key_env
    } else if app.config.ai_api_key.is_some() {
        s.settings_key_set
    } else {
        s.settings_key_unset
    };

    let rows: [(&str, String); 3] = [
        (s.settings_theme, app.config.theme.as_str().to_string()),
        (s.settings_language, app.config.language.as_str().to_string()),
        (s.settings_api_key, key_status.to_string()),
    ];

    let mut content: Vec<Line> = vec![Line::raw("")];
    for (i, (label, value)) in rows.iter().enumerate() {
        let marker = if i == app.settings_selected { "▸ " } else { "  " };
        let value_span = if i == 2 && app.settings_editing {
            Span::styled(
                format!("{}▌", "•".repeat(app.settings_edit_buffer.len())),
                theme.accent_style(),
            )
        } else {
            Span::styled(value.clone(), theme.text())
        };
        content.push(Line::from(vec![
            Span::styled(marker, theme.accent_style()),
            Span::styled(format!("{:<16}", label), theme.text_dim()),
            value_span,
        ]));
    }
    content.push(Line::raw(""));
    let hint = if app.settings_editing {
        s.settings_edit_hint
    } else {
        s.settings_hint
    };
    content.push(Line::from(Span::styled(hint, theme.text_dim())));

    widgets::render_popup(frame, s.settings_title, content, &[], theme, area);
}

fn render_help(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = i18n::get_strings(app.config.language);

    let popup_width = 66.min(area.width.saturating_sub(4));
    let popup_height = 18.min(area.height.saturating_sub(2));
    let popup_area = widgets::centered_rect(popup_width, popup_height, area);

    frame.render_widget(ratatui::widgets::Clear, popup_area);
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", s.help_title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    frame.render_widget(
        Paragraph::new(s.help_body)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_brightness_menu(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let s = i18n::get_strings(app.config.language);

    let mut content: Vec<Line> = Vec::new();
    for (i, &(label, _)) in PRESETS.iter().enumerate() {
        let is_off = i == PRESETS.len() - 1;
        let glyph = if is_off { "☾" } else { "☀" };
        let name = if is_off { s.dim_off } else { label };
        let style = if i == app.dimmer.menu_selected {
            theme.selected()
        } else if is_off {
            theme.error()
        } else {
            theme.text()
        };
        let marker = if i == app.dimmer.menu_selected { "▸ " } else { "  " };
        content.push(Line::from(vec![
            Span::styled(marker, theme.accent_style()),
            Span::styled(format!("{} {}", glyph, name), style),
        ]));
    }

    widgets::render_popup(frame, s.dim_title, content, &[], theme, area);
}
