//! Reusable UI widgets for carmate
//!
//! Centered popups, the status bar with flash messages, and the
//! screen-off overlay used by the dimmer.

use crate::types::FlashMessage;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog with a key-hint row at the bottom
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)],
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 64.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let body = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(content)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        body,
    );

    if !buttons.is_empty() {
        let hint_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1,
            ..inner
        };
        let spans: Vec<Span> = buttons
            .iter()
            .flat_map(|(label, key)| {
                vec![
                    Span::styled(
                        format!("[{}]", key),
                        theme.accent_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" {}   ", label), theme.text_dim()),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            hint_area,
        );
    }
}

/// Render the one-line status bar: global key hints on the left, or the
/// active flash message while one is showing; extra info on the right.
pub fn render_status_bar(
    frame: &mut Frame,
    hints: &str,
    flash: Option<&FlashMessage>,
    right: &str,
    theme: &Theme,
    area: Rect,
) {
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let left = match flash {
        Some(msg) => {
            let style = if msg.is_error {
                theme.error()
            } else {
                theme.success()
            };
            let prefix = if msg.is_error { "✗ " } else { "✓ " };
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(msg.text.clone(), style),
            ])
        }
        None => Line::from(Span::styled(hints.to_string(), theme.text_dim())),
    };
    frame.render_widget(Paragraph::new(left), area);

    let right_len = right.chars().count() as u16;
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len + 1),
        width: right_len.min(area.width),
        ..area
    };
    frame.render_widget(
        Paragraph::new(Span::styled(right.to_string(), theme.text_dim())),
        right_area,
    );
}

/// Render the screen-off overlay: a black frame with a centered wake hint
pub fn render_wake_screen(frame: &mut Frame, hint: &str, area: Rect) {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0))),
        area,
    );

    let hint_area = centered_rect(area.width, 1, area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            hint,
            Style::default().fg(Color::Rgb(100, 116, 139)),
        ))
        .alignment(Alignment::Center),
        hint_area,
    );
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_centers_and_clamps() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        // Larger than the area: clamped, anchored at the origin
        let rect = centered_rect(200, 80, area);
        assert_eq!(rect, Rect::new(0, 0, 100, 40));
    }
}
