//! Startup fade and placeholder policy.
//!
//! The canvas is attached to the page after a delay that depends on the
//! surface width: narrow (mobile) surfaces wait so the placeholder image
//! stays up while the page settles, wide surfaces fade in immediately.

use crate::api::config::StartupConfig;

impl StartupConfig {
    /// Milliseconds to wait before attaching the canvas and fading it in.
    pub fn fade_delay_ms(&self, surface_width: u32) -> u32 {
        if surface_width < self.narrow_width {
            self.narrow_fade_delay_ms
        } else {
            0
        }
    }

    /// Whether the static placeholder image sits behind the canvas.
    pub fn shows_placeholder(&self, viewport_width: u32) -> bool {
        viewport_width <= self.placeholder_max_width
    }
}

/// Fade delay with the default thresholds.
pub fn fade_delay_ms(surface_width: u32) -> u32 {
    StartupConfig::default().fade_delay_ms(surface_width)
}

/// Placeholder policy with the default thresholds.
pub fn shows_placeholder(viewport_width: u32) -> bool {
    StartupConfig::default().shows_placeholder(viewport_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_delay_boundary_at_600() {
        assert_eq!(fade_delay_ms(599), 2000);
        assert_eq!(fade_delay_ms(600), 0);
        assert_eq!(fade_delay_ms(1920), 0);
        assert_eq!(fade_delay_ms(0), 2000);
    }

    #[test]
    fn placeholder_includes_600() {
        assert!(shows_placeholder(600));
        assert!(shows_placeholder(320));
        assert!(!shows_placeholder(601));
    }

    #[test]
    fn custom_thresholds() {
        let startup = StartupConfig {
            narrow_width: 1024,
            narrow_fade_delay_ms: 500,
            placeholder_max_width: 0,
        };
        assert_eq!(startup.fade_delay_ms(800), 500);
        assert!(!startup.shows_placeholder(320));
    }
}
