//! Game settings and preferences
//!
//! Held in memory for the session: the settings screen writes these,
//! the audio manager reads them. Nothing is persisted.

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Background music while a match runs
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            master_volume: 0.7,
        }
    }
}

impl Settings {
    /// Set the master volume, clamped to 0.0 - 1.0
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_is_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(1.7);
        assert!((settings.master_volume - 1.0).abs() < 0.001);
        settings.set_master_volume(-0.3);
        assert!(settings.master_volume.abs() < 0.001);
        settings.set_master_volume(0.4);
        assert!((settings.master_volume - 0.4).abs() < 0.001);
    }
}
