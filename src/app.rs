//! Application state and event handling for carmate

use crate::config::Config;
use crate::i18n;
use crate::modules::assistant::AssistantState;
use crate::modules::dashboard::DashboardState;
use crate::modules::dimmer::{DimmerState, PRESETS};
use crate::modules::install::InstallPrompt;
use crate::modules::maintenance::MaintenanceState;
use crate::nav::{NavState, View};
use crate::types::FlashMessage;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Modal layers above the shell. Overlays capture all keys and never enter
/// the navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Settings,
    Help,
    Brightness,
}

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub nav: NavState,
    pub config: Config,
    pub theme: Theme,
    /// Resolved once at startup; settings edits update it, the env still wins
    pub credential: Option<String>,

    pub dimmer: DimmerState,
    pub overlay: Overlay,
    pub install_prompt: Option<InstallPrompt>,
    pub flash_message: Option<FlashMessage>,

    pub settings_selected: usize,
    pub settings_editing: bool,
    pub settings_edit_buffer: String,

    // View states
    pub dashboard: DashboardState,
    pub maintenance: MaintenanceState,
    pub assistant: AssistantState,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let theme = Theme::from_name(config.theme);
        let credential = config.resolve_credential();
        let lang = config.language;

        let mut dashboard = DashboardState::new();
        dashboard.lang = lang;
        dashboard.update_clock();
        let mut maintenance = MaintenanceState::new();
        maintenance.lang = lang;
        let mut assistant = AssistantState::new();
        assistant.lang = lang;

        Ok(Self {
            should_quit: false,
            nav: NavState::new(),
            config,
            theme,
            credential,
            dimmer: DimmerState::new(),
            overlay: Overlay::None,
            install_prompt: InstallPrompt::detect(),
            flash_message: None,
            settings_selected: 0,
            settings_editing: false,
            settings_edit_buffer: String::new(),
            dashboard,
            maintenance,
            assistant,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Screen-off: the dimmer swallows everything and the press wakes
        if self.dimmer.is_blocking() {
            self.dimmer.wake();
            return Ok(());
        }

        // Clear expired flash
        if let Some(msg) = &self.flash_message {
            if msg.is_expired(3) {
                self.flash_message = None;
            }
        }

        // Overlays capture all keys
        match self.overlay {
            Overlay::Settings => return self.handle_settings_key(key),
            Overlay::Help => {
                self.overlay = Overlay::None;
                return Ok(());
            }
            Overlay::Brightness => return self.handle_brightness_key(key),
            Overlay::None => {}
        }

        // Try to let the active view consume the key
        if self.try_view_key(key)? {
            return Ok(());
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.navigate(View::Dashboard),
            KeyCode::Char('2') => self.navigate(View::Maintenance),
            KeyCode::Char('3') => self.navigate(View::Assistant),
            KeyCode::Backspace => {
                self.nav.back();
            }
            KeyCode::Char('g') => self.toggle_language(),
            KeyCode::Char('b') => {
                self.dimmer.menu_selected = 0;
                self.overlay = Overlay::Brightness;
            }
            KeyCode::Char('I') => self.handle_install(),
            KeyCode::Char(',') => {
                self.settings_selected = 0;
                self.overlay = Overlay::Settings;
            }
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            _ => {}
        }

        Ok(())
    }

    fn try_view_key(&mut self, key: KeyEvent) -> Result<bool> {
        let lang = self.config.language;
        match self.nav.current() {
            View::Assistant => {
                // Chat input captures ALL keys while focused
                if self.assistant.input_mode {
                    return self
                        .assistant
                        .handle_key(key, self.credential.as_deref(), lang);
                }
                match key.code {
                    KeyCode::Char('1'..='3')
                    | KeyCode::Char(',')
                    | KeyCode::Char('?')
                    | KeyCode::Char('b')
                    | KeyCode::Char('g')
                    | KeyCode::Char('I')
                    | KeyCode::Char('q')
                    | KeyCode::Backspace => Ok(false),
                    _ => self
                        .assistant
                        .handle_key(key, self.credential.as_deref(), lang),
                }
            }
            View::Maintenance => {
                // Detail popup captures ALL keys
                if self.maintenance.detail_open {
                    return self.maintenance.handle_key(key, lang);
                }
                match key.code {
                    KeyCode::Char('1'..='3')
                    | KeyCode::Char(',')
                    | KeyCode::Char('?')
                    | KeyCode::Char('b')
                    | KeyCode::Char('g')
                    | KeyCode::Char('I')
                    | KeyCode::Char('q')
                    | KeyCode::Backspace => Ok(false),
                    _ => self.maintenance.handle_key(key, lang),
                }
            }
            View::Dashboard => match key.code {
                KeyCode::Char('1'..='3')
                | KeyCode::Char(',')
                | KeyCode::Char('?')
                | KeyCode::Char('b')
                | KeyCode::Char('g')
                | KeyCode::Char('I')
                | KeyCode::Char('q')
                | KeyCode::Backspace => Ok(false),
                _ => self.dashboard.handle_key(key, lang),
            },
        }
    }

    fn navigate(&mut self, target: View) {
        self.nav.navigate(target);
        if target == View::Assistant {
            // Seed the greeting the first time the chat becomes visible
            self.assistant.ensure_greeting(self.config.language);
        }
    }

    /// Toggle between the two languages and sync every view.
    /// The chat greeting is re-seeded only while the transcript is empty.
    fn toggle_language(&mut self) {
        self.config.language = self.config.language.next();
        self.sync_lang_to_views();
        self.assistant.ensure_greeting(self.config.language);
        let _ = self.config.save();
    }

    fn sync_lang_to_views(&mut self) {
        let lang = self.config.language;
        self.dashboard.lang = lang;
        self.dashboard.update_clock();
        self.maintenance.lang = lang;
        self.assistant.lang = lang;
    }

    /// Consume the one-shot install capability, if still present.
    fn handle_install(&mut self) {
        let s = i18n::get_strings(self.config.language);
        if let Some(prompt) = self.install_prompt.take() {
            let flash = match prompt.install() {
                Ok(()) => FlashMessage::new(s.install_done.to_string(), false),
                Err(_) => FlashMessage::new(s.install_failed.to_string(), true),
            };
            self.flash_message = Some(flash);
        }
    }

    fn handle_brightness_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.overlay = Overlay::None;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.dimmer.menu_selected + 1 < PRESETS.len() {
                    self.dimmer.menu_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.dimmer.menu_selected = self.dimmer.menu_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.dimmer.set_preset(self.dimmer.menu_selected);
                self.overlay = Overlay::None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.settings_editing {
            return self.handle_settings_edit_key(key);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char(',') => {
                self.overlay = Overlay::None;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < 2 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                match self.settings_selected {
                    0 => {
                        self.config.theme = self.config.theme.next();
                        self.theme = Theme::from_name(self.config.theme);
                        self.save_config();
                    }
                    1 => self.toggle_language(),
                    2 => {
                        // Start fresh, never reveal the stored key
                        self.settings_editing = true;
                        self.settings_edit_buffer = String::new();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle key events while editing the API key field.
    fn handle_settings_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.settings_editing = false;
                self.settings_edit_buffer.clear();
            }
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.settings_edit_buffer);
                self.config.ai_api_key = if value.is_empty() { None } else { Some(value) };
                self.credential = self.config.resolve_credential();
                self.settings_editing = false;
                self.save_config();
            }
            KeyCode::Backspace => {
                self.settings_edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.settings_edit_buffer.push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn save_config(&mut self) {
        let s = i18n::get_strings(self.config.language);
        let flash = match self.config.save() {
            Ok(()) => FlashMessage::new(s.settings_saved.to_string(), false),
            Err(_) => FlashMessage::new(s.save_failed.to_string(), true),
        };
        self.flash_message = Some(flash);
    }

    /// Advance clocks and drain background channels. Called every loop pass.
    pub fn update_timers(&mut self) {
        self.dashboard.update_clock();
        self.dashboard.poll_gps();
        self.assistant.poll_reply();

        expire_flash(&mut self.flash_message);
        expire_flash(&mut self.dashboard.flash_message);
        expire_flash(&mut self.maintenance.flash_message);
        expire_flash(&mut self.assistant.flash_message);
    }

    /// The flash message the status bar should show, if any
    pub fn active_flash(&self) -> Option<&FlashMessage> {
        self.flash_message.as_ref().or(match self.nav.current() {
            View::Dashboard => self.dashboard.flash_message.as_ref(),
            View::Maintenance => self.maintenance.flash_message.as_ref(),
            View::Assistant => self.assistant.flash_message.as_ref(),
        })
    }
}

/// Expire a flash message after 3 seconds
fn expire_flash(msg: &mut Option<FlashMessage>) {
    if let Some(m) = msg {
        if m.is_expired(3) {
            *msg = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code)).unwrap();
    }

    #[test]
    fn test_number_keys_navigate_and_backspace_goes_back() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.nav.current(), View::Assistant);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.nav.current(), View::Maintenance);
        assert!(app.nav.can_go_back());
    }

    #[test]
    fn test_entering_assistant_seeds_greeting() {
        let mut app = app();
        assert!(app.assistant.messages.is_empty());
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.assistant.messages.len(), 1);
    }

    #[test]
    fn test_blocking_dimmer_swallows_and_wakes() {
        let mut app = app();
        app.dimmer.set_preset(PRESETS.len() - 1);
        assert!(app.dimmer.is_blocking());

        // The press neither navigates nor quits — it only wakes
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert!(!app.dimmer.is_blocking());

        // The next press works normally again
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_brightness_menu_applies_preset() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.overlay, Overlay::Brightness);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        assert!((app.dimmer.opacity() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_language_toggle_reseeds_empty_transcript_only() {
        let mut app = app();
        assert_eq!(app.config.language, Language::Chinese);

        // Transcript still empty: nothing seeded yet, toggle seeds English
        app.config.language = Language::Chinese;
        app.toggle_language();
        assert_eq!(app.config.language, Language::English);
        assert_eq!(
            app.assistant.messages[0].text,
            i18n::get_strings(Language::English).assistant_greeting
        );

        // Toggling again does not replace the existing greeting
        app.toggle_language();
        assert_eq!(
            app.assistant.messages[0].text,
            i18n::get_strings(Language::English).assistant_greeting
        );
    }

    #[test]
    fn test_chat_input_captures_global_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('i'));
        assert!(app.assistant.input_mode);

        // 'q' goes into the input buffer instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.assistant.input_buffer, "q");

        press(&mut app, KeyCode::Esc);
        assert!(!app.assistant.input_mode);
    }

    #[test]
    fn test_install_capability_consumed_once() {
        let mut app = app();
        // Force-absent capability: 'I' must do nothing
        app.install_prompt = None;
        press(&mut app, KeyCode::Char('I'));
        assert!(app.flash_message.is_none());
    }
}
