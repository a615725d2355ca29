//! Desktop launcher install prompt
//!
//! The one-shot "install me" capability: detected once at startup, offered
//! in the sidebar while present, consumed exactly once when the user accepts.
//! Absent when the session has no desktop environment or the launcher entry
//! already exists.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const DESKTOP_ENTRY: &str = "\
[Desktop Entry]
Type=Application
Name=carmate
Comment=In-car infotainment shell
Exec=carmate
Terminal=true
Categories=Utility;
";

/// A captured install opportunity. Holds the target path so consuming it
/// cannot race with a changed environment.
#[derive(Debug, Clone)]
pub struct InstallPrompt {
    target: PathBuf,
}

impl InstallPrompt {
    /// Probe the environment once at startup.
    pub fn detect() -> Option<Self> {
        if std::env::var("XDG_CURRENT_DESKTOP").is_err() {
            return None;
        }
        let target = launcher_path()?;
        if target.exists() {
            return None;
        }
        Some(Self { target })
    }

    /// Write the launcher entry. The prompt is consumed by value – it can
    /// only ever be used once.
    pub fn install(self) -> Result<()> {
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&self.target, DESKTOP_ENTRY)
            .with_context(|| format!("Failed to write {:?}", self.target))
    }
}

fn launcher_path() -> Option<PathBuf> {
    Some(
        dirs::data_dir()?
            .join("applications")
            .join("carmate.desktop"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consuming_install_moves_the_prompt() {
        // install(self) takes the prompt by value; a second use is a compile
        // error. Here we only verify the capability can be held in an Option
        // and taken out exactly once, the way the shell uses it.
        let mut slot = Some(InstallPrompt {
            target: PathBuf::from("/nonexistent/dir/carmate.desktop"),
        });
        let prompt = slot.take();
        assert!(prompt.is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_desktop_entry_is_well_formed() {
        assert!(DESKTOP_ENTRY.starts_with("[Desktop Entry]"));
        assert!(DESKTOP_ENTRY.contains("Exec=carmate"));
    }
}
