//! Activity flags: whether the cycle is enabled, paused or previewing.

/// User and environment switches that gate the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityFlags {
    pub enabled: bool,
    pub paused: bool,
    pub preview: bool,
}

impl Default for ActivityFlags {
    fn default() -> Self {
        Self {
            enabled: true,
            paused: false,
            preview: false,
        }
    }
}

impl ActivityFlags {
    /// True when the cycle should drive the display.
    ///
    /// A running preview overrides both the enabled switch and pausing.
    pub fn is_active(&self) -> bool {
        (self.enabled && !self.paused) || self.preview
    }
}

/// What the foreground check needs to know about the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseRules<'a> {
    pub pause_on_fullscreen: bool,
    pub whitelist_enabled: bool,
    pub whitelist: Option<&'a [String]>,
}

/// Decide whether the foreground application should pause the cycle.
///
/// `application` is the foreground identity, if one could be determined. A
/// missing whitelist or identity never matches.
pub fn compute_paused(rules: &PauseRules<'_>, full_screen: bool, application: Option<&str>) -> bool {
    let full_screen_pause = rules.pause_on_fullscreen && full_screen;

    let whitelisted = rules.whitelist_enabled
        && match (rules.whitelist, application) {
            (Some(list), Some(app)) => list.iter().any(|entry| entry.eq_ignore_ascii_case(app)),
            _ => false,
        };

    full_screen_pause || whitelisted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_truth_table() {
        let base = ActivityFlags::default();
        assert!(base.is_active());

        let paused = ActivityFlags { paused: true, ..base };
        assert!(!paused.is_active());

        let disabled = ActivityFlags { enabled: false, ..base };
        assert!(!disabled.is_active());

        let previewing = ActivityFlags {
            enabled: false,
            paused: true,
            preview: true,
        };
        assert!(previewing.is_active());
    }

    #[test]
    fn test_fullscreen_pause_requires_setting() {
        let off = PauseRules {
            pause_on_fullscreen: false,
            whitelist_enabled: false,
            whitelist: None,
        };
        assert!(!compute_paused(&off, true, None));

        let on = PauseRules {
            pause_on_fullscreen: true,
            ..off
        };
        assert!(compute_paused(&on, true, None));
        assert!(!compute_paused(&on, false, None));
    }

    #[test]
    fn test_whitelist_matching() {
        let list = vec!["mpv".to_string(), "Blender".to_string()];
        let rules = PauseRules {
            pause_on_fullscreen: false,
            whitelist_enabled: true,
            whitelist: Some(&list),
        };
        assert!(compute_paused(&rules, false, Some("blender")));
        assert!(!compute_paused(&rules, false, Some("firefox")));
        assert!(!compute_paused(&rules, false, None));

        let absent = PauseRules {
            whitelist: None,
            ..rules
        };
        assert!(!compute_paused(&absent, false, Some("mpv")));
    }
}
