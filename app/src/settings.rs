use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono_tz::Tz;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use gui::{ClockStyle, Palette};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "clock.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Time
    pub timezone: Option<Tz>,
    pub refresh_interval_ms: u64,
    // Layout
    pub size: u32,
    pub padding: u32,
    pub scale: u32,
    pub show_analog: bool,
    // Look
    pub style: StyleSettings,
    pub palette: PaletteSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            timezone: None,
            refresh_interval_ms: 1000,
            size: 720,
            padding: 0,
            scale: 1,
            show_analog: true,
            style: StyleSettings::default(),
            palette: PaletteSettings::default(),
        }
    }
}

impl AppSettings {
    /// Loads `path`, or `clock.toml` if present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_SETTINGS_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub hour_needle_length: u32,
    pub minute_needle_length: u32,
    pub second_needle_length: u32,
    pub center_dot_radius: u32,
    pub hour_value_font_size: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        let style = ClockStyle::default();

        StyleSettings {
            hour_needle_length: style.hour_needle_length,
            minute_needle_length: style.minute_needle_length,
            second_needle_length: style.second_needle_length,
            center_dot_radius: style.center_dot_radius,
            hour_value_font_size: style.hour_value_font_size,
        }
    }
}

impl From<&StyleSettings> for ClockStyle {
    fn from(settings: &StyleSettings) -> Self {
        ClockStyle {
            hour_needle_length: settings.hour_needle_length,
            minute_needle_length: settings.minute_needle_length,
            second_needle_length: settings.second_needle_length,
            center_dot_radius: settings.center_dot_radius,
            hour_value_font_size: settings.hour_value_font_size,
            ..ClockStyle::default()
        }
    }
}

/// Colors as `[r, g, b]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub seconds_needle: [u8; 3],
    pub hours_needle: [u8; 3],
    pub minutes_needle: [u8; 3],
    pub degrees: [u8; 3],
    pub hour_values: [u8; 3],
    pub numbers: [u8; 3],
    pub background: [u8; 3],
}

fn rgb([r, g, b]: [u8; 3]) -> Rgb888 {
    Rgb888::new(r, g, b)
}

fn channels(color: Rgb888) -> [u8; 3] {
    [color.r(), color.g(), color.b()]
}

impl Default for PaletteSettings {
    fn default() -> Self {
        let palette = Palette::default();

        PaletteSettings {
            seconds_needle: channels(palette.seconds_needle),
            hours_needle: channels(palette.hours_needle),
            minutes_needle: channels(palette.minutes_needle),
            degrees: channels(palette.degrees),
            hour_values: channels(palette.hour_values),
            numbers: channels(palette.numbers),
            background: channels(palette.background),
        }
    }
}

impl From<&PaletteSettings> for Palette {
    fn from(settings: &PaletteSettings) -> Self {
        Palette {
            seconds_needle: rgb(settings.seconds_needle),
            hours_needle: rgb(settings.hours_needle),
            minutes_needle: rgb(settings.minutes_needle),
            degrees: rgb(settings.degrees),
            hour_values: rgb(settings.hour_values),
            numbers: rgb(settings.numbers),
            background: rgb(settings.background),
        }
    }
}
