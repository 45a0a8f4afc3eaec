//! Configuration file building and default config creation.
//!
//! Writes the default `gammacycle.toml` with every setting listed and a
//! comment aligned next to each one.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Create a default config file at `path`, including parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content()).context("Failed to write default config file")?;
    Ok(())
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Color targets")
        .add_setting(
            "day_temperature",
            &DEFAULT_DAY_TEMPERATURE.to_string(),
            &format!(
                "Color temperature during day ({MINIMUM_TEMPERATURE}-{MAXIMUM_TEMPERATURE}) Kelvin"
            ),
        )
        .add_setting(
            "day_brightness",
            &format!("{DEFAULT_DAY_BRIGHTNESS:.2}"),
            &format!("Brightness during day ({MINIMUM_BRIGHTNESS}-{MAXIMUM_BRIGHTNESS})"),
        )
        .add_setting(
            "night_temperature",
            &DEFAULT_NIGHT_TEMPERATURE.to_string(),
            &format!(
                "Color temperature during night ({MINIMUM_TEMPERATURE}-{MAXIMUM_TEMPERATURE}) Kelvin"
            ),
        )
        .add_setting(
            "night_brightness",
            &format!("{DEFAULT_NIGHT_BRIGHTNESS:.2}"),
            &format!("Brightness during night ({MINIMUM_BRIGHTNESS}-{MAXIMUM_BRIGHTNESS})"),
        )
        .add_section("Transitions")
        .add_setting(
            "transition_duration",
            &DEFAULT_TRANSITION_DURATION.to_string(),
            &format!(
                "Length of each transition window in minutes ({MINIMUM_TRANSITION_DURATION}-{MAXIMUM_TRANSITION_DURATION})"
            ),
        )
        .add_setting(
            "transition_offset",
            &DEFAULT_TRANSITION_OFFSET.to_string(),
            &format!(
                "Shift both windows by minutes (-{MAXIMUM_TRANSITION_OFFSET} to {MAXIMUM_TRANSITION_OFFSET})"
            ),
        )
        .add_setting(
            "smoothing",
            &DEFAULT_SMOOTHING.to_string(),
            "Ease toward the target instead of jumping",
        )
        .add_section("Solar times")
        .add_setting(
            "manual_sun_times",
            "false",
            "Use the manual times even when coordinates are set",
        )
        .add_setting(
            "sunrise",
            &format!("\"{DEFAULT_SUNRISE}\""),
            "Manual sunrise (HH:MM:SS)",
        )
        .add_setting(
            "sunset",
            &format!("\"{DEFAULT_SUNSET}\""),
            "Manual sunset (HH:MM:SS)",
        )
        .add_comment("latitude = 52.520008   # Uncomment both to calculate sunrise and sunset")
        .add_comment("longitude = 13.404954")
        .add_section("Activity")
        .add_setting(
            "default_to_day_when_inactive",
            &DEFAULT_TO_DAY_WHEN_INACTIVE.to_string(),
            "Show day colors instead of neutral while disabled or paused",
        )
        .add_setting(
            "pause_on_fullscreen",
            &DEFAULT_PAUSE_ON_FULLSCREEN.to_string(),
            "Pause while a full-screen application is focused",
        )
        .add_setting(
            "whitelist_enabled",
            &DEFAULT_WHITELIST_ENABLED.to_string(),
            "Pause while a whitelisted application is focused",
        )
        .add_comment("whitelist = [\"mpv\", \"blender\"]")
        .add_section("Hotkeys")
        .add_setting(
            "toggle_hotkey",
            &format!("\"{DEFAULT_TOGGLE_HOTKEY}\""),
            "Enable or disable the cycle",
        )
        .add_setting(
            "increase_temperature_hotkey",
            &format!("\"{DEFAULT_INCREASE_TEMPERATURE_HOTKEY}\""),
            &format!("Raise temperature by {TEMPERATURE_OFFSET_STEP}K"),
        )
        .add_setting(
            "decrease_temperature_hotkey",
            &format!("\"{DEFAULT_DECREASE_TEMPERATURE_HOTKEY}\""),
            &format!("Lower temperature by {TEMPERATURE_OFFSET_STEP}K"),
        )
        .add_setting(
            "increase_brightness_hotkey",
            &format!("\"{DEFAULT_INCREASE_BRIGHTNESS_HOTKEY}\""),
            &format!("Raise brightness by {BRIGHTNESS_OFFSET_STEP}"),
        )
        .add_setting(
            "decrease_brightness_hotkey",
            &format!("\"{DEFAULT_DECREASE_BRIGHTNESS_HOTKEY}\""),
            &format!("Lower brightness by {BRIGHTNESS_OFFSET_STEP}"),
        )
        .add_setting(
            "reset_offset_hotkey",
            &format!("\"{DEFAULT_RESET_OFFSET_HOTKEY}\""),
            "Clear temperature and brightness offsets",
        )
        .build()
}

/// Aligned, commented TOML assembled line by line.
struct ConfigBuilder {
    lines: Vec<TemplateLine>,
}

enum TemplateLine {
    Header(String),
    Note(String),
    Setting { assignment: String, note: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.lines.push(TemplateLine::Header(title.to_string()));
        self
    }

    /// A commented-out line, written as-is after `# `.
    fn add_comment(mut self, text: &str) -> Self {
        self.lines.push(TemplateLine::Note(text.to_string()));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(TemplateLine::Setting {
            assignment: format!("{key} = {value}"),
            note: comment.to_string(),
        });
        self
    }

    fn build(self) -> String {
        // Notes start one column past the longest assignment
        let column = self
            .lines
            .iter()
            .filter_map(|line| match line {
                TemplateLine::Setting { assignment, .. } => Some(assignment.len() + 1),
                _ => None,
            })
            .max()
            .unwrap_or(1);

        let mut text = String::new();
        for line in self.lines {
            match line {
                TemplateLine::Header(title) => {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&format!("#[{title}]\n"));
                }
                TemplateLine::Note(note) => text.push_str(&format!("# {note}\n")),
                TemplateLine::Setting { assignment, note } => {
                    text.push_str(&format!("{assignment:<column$}# {note}\n"));
                }
            }
        }
        text
    }
}
