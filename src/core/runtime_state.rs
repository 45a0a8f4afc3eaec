//! Mutable engine state and the calculations derived from it.
//!
//! [`EngineState`] is everything the engine knows between ticks. It lives
//! behind the engine's single mutex; every method here assumes the caller
//! holds that lock. Solar times, boundaries, targets and the cycle state are
//! never stored: they are recomputed from the settings, the instant, the
//! activity flags and the offsets whenever they are asked for.

use chrono::{DateTime, Local};

use crate::backend::GammaSink;
use crate::config::{Settings, Subscription};
use crate::core::activity::{ActivityFlags, PauseRules, compute_paused};
use crate::core::color::ColorConfiguration;
use crate::core::offsets::OffsetManager;
use crate::core::period::{
    CycleBoundaries, CycleState, StateInputs, announce_state_change, classify_cycle_state,
    compute_boundaries, target_configuration,
};
use crate::core::scheduler::ScheduledTask;
use crate::core::smoothing::Smoothing;
use crate::geo::{SolarSource, SolarTimes, resolve_solar_times};
use crate::io::foreground::ForegroundQuery;
use crate::io::hotkeys::HotkeyRegistrar;
use crate::time::{PreviewClock, PreviewStep, TimeOfDay};

/// The engine's background tasks.
#[derive(Debug, Default)]
pub(crate) struct EngineTasks {
    pub fast: Option<ScheduledTask>,
    pub slow: Option<ScheduledTask>,
    pub deferred_enable: Option<ScheduledTask>,
}

impl EngineTasks {
    /// Remove every task, cancelling each one.
    ///
    /// The returned tasks still own their threads; join them once the engine
    /// lock is released.
    pub fn take_all(&mut self) -> Vec<ScheduledTask> {
        [
            self.fast.take(),
            self.slow.take(),
            self.deferred_enable.take(),
        ]
        .into_iter()
        .flatten()
        .map(|mut task| {
            task.cancel();
            task
        })
        .collect()
    }

    /// Replace the deferred enable timer, cancelling any previous one.
    pub fn replace_deferred_enable(&mut self, task: Option<ScheduledTask>) {
        if let Some(mut previous) = self.deferred_enable.take() {
            previous.cancel();
        }
        self.deferred_enable = task;
    }
}

/// Everything the engine mutates, guarded by one lock.
pub(crate) struct EngineState {
    pub settings: Settings,
    pub instant: DateTime<Local>,
    pub flags: ActivityFlags,
    pub offsets: OffsetManager,
    pub current: ColorConfiguration,
    pub preview: PreviewClock,
    pub smoothing: Smoothing,
    pub is_first_update: bool,
    pub disposed: bool,
    pub tasks: EngineTasks,
    pub subscription: Option<Subscription>,
    pub sink: Box<dyn GammaSink>,
    pub foreground: Box<dyn ForegroundQuery>,
    pub hotkeys: Box<dyn HotkeyRegistrar>,
    // Last values reported in the log
    announced_state: Option<CycleState>,
    announced_source: Option<SolarSource>,
}

impl EngineState {
    pub fn new(
        settings: Settings,
        instant: DateTime<Local>,
        sink: Box<dyn GammaSink>,
        foreground: Box<dyn ForegroundQuery>,
        hotkeys: Box<dyn HotkeyRegistrar>,
    ) -> Self {
        Self {
            settings,
            instant,
            flags: ActivityFlags::default(),
            offsets: OffsetManager::new(),
            current: ColorConfiguration::DEFAULT,
            preview: PreviewClock::default(),
            smoothing: Smoothing::default(),
            is_first_update: true,
            disposed: false,
            tasks: EngineTasks::default(),
            subscription: None,
            sink,
            foreground,
            hotkeys,
            announced_state: None,
            announced_source: None,
        }
    }

    /// Solar times for `instant`, and where they came from.
    pub fn solar_at(&self, instant: &DateTime<Local>) -> (SolarTimes, SolarSource) {
        resolve_solar_times(
            self.settings.location,
            self.settings.manual_sunrise,
            self.settings.manual_sunset,
            self.settings.manual_mode,
            instant,
        )
    }

    pub fn solar_times(&self) -> SolarTimes {
        self.solar_at(&self.instant).0
    }

    pub fn boundaries(&self) -> CycleBoundaries {
        compute_boundaries(
            &self.solar_times(),
            self.settings.transition_duration,
            self.settings.transition_offset,
        )
    }

    pub fn is_active(&self) -> bool {
        self.flags.is_active()
    }

    /// Target before offsets.
    pub fn base_target(&self) -> ColorConfiguration {
        target_configuration(
            &self.boundaries(),
            &self.settings.day,
            &self.settings.night,
            TimeOfDay::of(&self.instant),
            self.is_active(),
            self.settings.default_to_day_when_inactive,
        )
    }

    /// Target the current configuration is moving toward.
    ///
    /// Offsets only shift the cycle while it is active; the inactive
    /// fallback is shown as configured.
    pub fn target(&self) -> ColorConfiguration {
        let base = self.base_target();
        if self.is_active() {
            self.offsets.apply(&base)
        } else {
            base
        }
    }

    pub fn adjusted_day(&self) -> ColorConfiguration {
        self.offsets.apply(&self.settings.day)
    }

    pub fn adjusted_night(&self) -> ColorConfiguration {
        self.offsets.apply(&self.settings.night)
    }

    pub fn cycle_state(&self) -> CycleState {
        classify_cycle_state(&StateInputs {
            current: self.current,
            target: self.target(),
            adjusted_day: self.adjusted_day(),
            adjusted_night: self.adjusted_night(),
            enabled: self.flags.enabled,
            paused: self.flags.paused,
        })
    }

    /// One fast tick: move the instant, ease toward the target, publish.
    pub fn update(&mut self, real_now: DateTime<Local>, debug_enabled: bool) {
        let (instant, step) = self.preview.advance(self.instant, real_now);
        self.instant = instant;
        self.flags.preview = self.preview.is_active();

        if step == PreviewStep::Finished {
            log_block_start!("Cycle preview finished");
        }

        if debug_enabled {
            let (_, source) = self.solar_at(&self.instant);
            if self.announced_source != Some(source) {
                log_pipe!();
                log_debug!("Solar times source: {}", source.display_name());
                self.announced_source = Some(source);
            }
        }

        let target = self.target();
        let bypass_smoothing =
            !self.settings.smoothing || step != PreviewStep::Idle || self.is_first_update;

        self.current = if bypass_smoothing {
            target
        } else {
            self.smoothing.step(&self.current, &target)
        };
        self.is_first_update = false;

        self.sink.apply_configuration(self.current);
        self.announce_state();
    }

    /// One slow tick: ask the foreground query whether to pause.
    ///
    /// Returns whether the paused flag changed.
    pub fn refresh_paused(&mut self) -> bool {
        let rules = PauseRules {
            pause_on_fullscreen: self.settings.pause_on_fullscreen,
            whitelist_enabled: self.settings.whitelist_enabled,
            whitelist: self.settings.whitelist.as_deref(),
        };

        // Skip the queries entirely when no rule could match
        let paused = if rules.pause_on_fullscreen || rules.whitelist_enabled {
            let full_screen = self.foreground.is_foreground_full_screen();
            let application = self.foreground.foreground_application();
            compute_paused(&rules, full_screen, application.as_deref())
        } else {
            false
        };

        if paused == self.flags.paused {
            return false;
        }

        self.flags.paused = paused;
        true
    }

    fn announce_state(&mut self) {
        let state = self.cycle_state();
        if self.announced_state != Some(state) {
            announce_state_change(self.announced_state, state);
            self.announced_state = Some(state);
        }
    }
}
