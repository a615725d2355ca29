//! Theme definitions for carmate
//!
//! Four built-in themes; Midnight matches the slate/blue look of the
//! original head-unit skin. One theme instance applies to every view.
//! The dimmer scales a theme's RGB channels down, so a dimmed frame is
//! just a darker theme.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Chat bubble accents (user = blue side, model = purple side)
    pub chat_user: Color,
    pub chat_model: Color,

    // Internal flag for transparent mode
    is_transparent: bool,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Midnight => Self::midnight(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Midnight theme (default) – slate background, blue/purple accents
    pub fn midnight() -> Self {
        Self {
            bg: Color::Rgb(2, 6, 23),
            fg: Color::Rgb(241, 245, 249),
            fg_dim: Color::Rgb(100, 116, 139),
            accent: Color::Rgb(96, 165, 250),
            accent_dim: Color::Rgb(37, 99, 235),
            success: Color::Rgb(52, 211, 153),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(248, 113, 113),
            border: Color::Rgb(51, 65, 85),
            border_focused: Color::Rgb(96, 165, 250),
            selection_bg: Color::Rgb(51, 65, 85),
            selection_fg: Color::Rgb(241, 245, 249),
            chat_user: Color::Rgb(96, 165, 250),
            chat_model: Color::Rgb(192, 132, 252),
            is_transparent: false,
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),
            fg: Color::Rgb(235, 219, 178),
            fg_dim: Color::Rgb(146, 131, 116),
            accent: Color::Rgb(254, 128, 25),
            accent_dim: Color::Rgb(214, 93, 14),
            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(168, 153, 132),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(235, 219, 178),
            chat_user: Color::Rgb(131, 165, 152),
            chat_model: Color::Rgb(211, 134, 155),
            is_transparent: false,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            fg_dim: Color::Rgb(76, 86, 106),
            accent: Color::Rgb(136, 192, 208),
            accent_dim: Color::Rgb(94, 129, 172),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            border: Color::Rgb(59, 66, 82),
            border_focused: Color::Rgb(136, 192, 208),
            selection_bg: Color::Rgb(76, 86, 106),
            selection_fg: Color::Rgb(236, 239, 244),
            chat_user: Color::Rgb(129, 161, 193),
            chat_model: Color::Rgb(180, 142, 173),
            is_transparent: false,
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::Cyan,
            accent_dim: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::Reset,
            selection_fg: Color::White,
            chat_user: Color::Blue,
            chat_model: Color::Magenta,
            is_transparent: true,
        }
    }

    /// A copy of this theme with every RGB channel scaled by `brightness`
    /// (0.0 = black, 1.0 = unchanged). Terminal-palette colors pass through.
    pub fn dimmed(&self, brightness: f32) -> Self {
        let factor = brightness.clamp(0.0, 1.0);
        if factor >= 1.0 {
            return self.clone();
        }
        let mut theme = self.clone();
        for color in [
            &mut theme.bg,
            &mut theme.fg,
            &mut theme.fg_dim,
            &mut theme.accent,
            &mut theme.accent_dim,
            &mut theme.success,
            &mut theme.warning,
            &mut theme.error,
            &mut theme.border,
            &mut theme.border_focused,
            &mut theme.selection_bg,
            &mut theme.selection_fg,
            &mut theme.chat_user,
            &mut theme.chat_model,
        ] {
            *color = scale_color(*color, factor);
        }
        theme
    }

    // === STYLE HELPERS ===

    pub fn text(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg)
        } else {
            Style::default().fg(self.fg).bg(self.bg)
        }
    }

    pub fn text_dim(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg_dim)
        } else {
            Style::default().fg(self.fg_dim).bg(self.bg)
        }
    }

    pub fn title(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.accent).bg(self.bg)
        }
    }

    pub fn selected(&self) -> Style {
        if self.is_transparent {
            Style::default()
                .fg(self.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.selection_fg)
                .bg(self.selection_bg)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn border(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.border)
        } else {
            Style::default().fg(self.border).bg(self.bg)
        }
    }

    pub fn border_focused(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_focused).bg(self.bg)
        }
    }

    pub fn accent_border(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.accent_dim)
        } else {
            Style::default().fg(self.accent_dim).bg(self.bg)
        }
    }

    pub fn success(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.success)
        } else {
            Style::default().fg(self.success).bg(self.bg)
        }
    }

    pub fn warning(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.warning).bg(self.bg)
        }
    }

    pub fn error(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.error)
        } else {
            Style::default().fg(self.error).bg(self.bg)
        }
    }

    pub fn chat_user(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.chat_user)
        } else {
            Style::default().fg(self.chat_user).bg(self.bg)
        }
    }

    pub fn chat_model(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.chat_model)
        } else {
            Style::default().fg(self.chat_model).bg(self.bg)
        }
    }

    /// Big speedometer digits
    pub fn speed_style(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    /// Clock digits
    pub fn clock_style(&self) -> Style {
        self.text()
    }

    pub fn block_style(&self) -> Style {
        if self.is_transparent {
            Style::default()
        } else {
            Style::default().bg(self.bg)
        }
    }
}

fn scale_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let midnight = Theme::from_name(ThemeName::Midnight);
        assert_eq!(midnight.bg, Color::Rgb(2, 6, 23));
        assert!(!midnight.is_transparent);

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert!(transparent.is_transparent);
    }

    #[test]
    fn test_dimming_scales_rgb() {
        let theme = Theme::midnight().dimmed(0.5);
        assert_eq!(theme.fg, Color::Rgb(120, 122, 124));

        // Full brightness leaves colors untouched
        let full = Theme::midnight().dimmed(1.0);
        assert_eq!(full.fg, Theme::midnight().fg);

        // Zero brightness is black
        let dark = Theme::midnight().dimmed(0.0);
        assert_eq!(dark.fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_dimming_passes_terminal_colors_through() {
        let theme = Theme::transparent().dimmed(0.3);
        assert_eq!(theme.bg, Color::Reset);
        assert_eq!(theme.fg, Color::White);
    }
}
