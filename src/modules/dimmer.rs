//! Screen dimmer
//!
//! A single opacity scalar set from discrete presets. Below the blocking
//! threshold the dim is purely visual (theme colors are scaled at render
//! time); at OFF the overlay swallows every key and the next press wakes
//! the screen.

/// Opacity presets, brightest first (label, overlay opacity)
pub const PRESETS: &[(&str, f32)] = &[
    ("100%", 0.0),
    ("80%", 0.2),
    ("60%", 0.4),
    ("40%", 0.6),
    ("OFF", 1.0),
];

/// Overlay opacity at which the screen counts as off
const BLOCKING_THRESHOLD: f32 = 0.9;

#[derive(Debug, Clone, Default)]
pub struct DimmerState {
    opacity: f32,
    /// Selected row while the brightness menu is open
    pub menu_selected: usize,
}

impl DimmerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Apply the preset at `index` (out-of-range indices are ignored)
    pub fn set_preset(&mut self, index: usize) {
        if let Some(&(_, opacity)) = PRESETS.get(index) {
            self.opacity = opacity;
        }
    }

    /// Screen-off state: the overlay is the sole input target
    pub fn is_blocking(&self) -> bool {
        self.opacity >= BLOCKING_THRESHOLD
    }

    /// Wake from screen-off; only meaningful while blocking
    pub fn wake(&mut self) {
        if self.is_blocking() {
            self.opacity = 0.0;
            self.menu_selected = 0;
        }
    }

    /// Brightness factor to scale theme colors with (1.0 = full)
    pub fn brightness(&self) -> f32 {
        1.0 - self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_fully_bright() {
        let dimmer = DimmerState::new();
        assert_eq!(dimmer.opacity(), 0.0);
        assert!(!dimmer.is_blocking());
    }

    #[test]
    fn test_presets_match_original_levels() {
        let levels: Vec<f32> = PRESETS.iter().map(|&(_, o)| o).collect();
        assert_eq!(levels, vec![0.0, 0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_only_off_preset_blocks() {
        let mut dimmer = DimmerState::new();
        for i in 0..PRESETS.len() - 1 {
            dimmer.set_preset(i);
            assert!(!dimmer.is_blocking(), "preset {} should not block", i);
        }
        dimmer.set_preset(PRESETS.len() - 1);
        assert!(dimmer.is_blocking());
    }

    #[test]
    fn test_wake_resets_only_from_blocking() {
        let mut dimmer = DimmerState::new();
        dimmer.set_preset(3); // 40%
        dimmer.wake();
        assert_eq!(dimmer.opacity(), 0.6);

        dimmer.set_preset(4); // OFF
        dimmer.wake();
        assert_eq!(dimmer.opacity(), 0.0);
        assert!(!dimmer.is_blocking());
    }

    #[test]
    fn test_out_of_range_preset_ignored() {
        let mut dimmer = DimmerState::new();
        dimmer.set_preset(2);
        dimmer.set_preset(99);
        assert_eq!(dimmer.opacity(), 0.4);
    }
}
