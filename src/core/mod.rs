//! Core application logic and state management.
//!
//! This module encapsulates the cycle engine, which keeps the display
//! configuration following the sun. It handles:
//!
//! - The fast tick: instant update, target calculation, smoothing, publishing
//! - The slow tick: pausing for full-screen or whitelisted applications
//! - User actions: enable/disable, temporary disable, preview, offsets
//! - Settings changes and hotkey registration
//!
//! All mutable state sits in one `EngineState` behind a
//! mutex. Ticks, timers, hotkey callbacks and settings notifications each run
//! on their own thread and take that lock for the whole of their work.

pub mod activity;
pub mod color;
pub mod offsets;
pub mod period;
pub(crate) mod runtime_state;
pub mod scheduler;
pub mod smoothing;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crate::backend::GammaSink;
use crate::config::SettingsSource;
use crate::constants::{
    BRIGHTNESS_OFFSET_STEP, FAST_TICK_INTERVAL, SLOW_TICK_INTERVAL, TEMPERATURE_OFFSET_STEP,
};
use crate::core::{
    color::ColorConfiguration,
    offsets::OffsetManager,
    period::{CycleBoundaries, CycleState},
    runtime_state::EngineState,
    scheduler::{CancelToken, ScheduledTask, start_both},
};
use crate::geo::{SolarTimes, display::format_delay, log_solar_summary};
use crate::io::foreground::ForegroundQuery;
use crate::io::hotkeys::{HotkeyAction, HotkeyRegistrar};
use crate::time::TimeSource;

/// Parameters for creating a [`CycleEngine`].
///
/// Bundles the collaborators the engine drives, so construction stays a single
/// argument.
pub struct EngineParams {
    pub settings_source: Arc<dyn SettingsSource>,
    pub sink: Box<dyn GammaSink>,
    pub foreground: Box<dyn ForegroundQuery>,
    pub hotkeys: Box<dyn HotkeyRegistrar>,
    pub clock: Arc<dyn TimeSource>,
    pub debug_enabled: bool,
}

/// Every accessor value, read under one lock.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSnapshot {
    pub instant: DateTime<Local>,
    pub solar_times: SolarTimes,
    pub boundaries: CycleBoundaries,
    pub target: ColorConfiguration,
    pub current: ColorConfiguration,
    pub adjusted_day: ColorConfiguration,
    pub adjusted_night: ColorConfiguration,
    pub state: CycleState,
    pub is_active: bool,
    pub is_enabled: bool,
    pub is_paused: bool,
    pub is_cycle_preview_enabled: bool,
    pub offsets: OffsetManager,
}

/// The sunrise/sunset color cycle.
///
/// Nothing runs until [`CycleEngine::on_view_ready`] starts the periodic
/// ticks. [`CycleEngine::update`] and [`CycleEngine::refresh_pause`] run a
/// single tick synchronously. Dropping the engine disposes it.
pub struct CycleEngine {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<EngineState>,
    settings_source: Arc<dyn SettingsSource>,
    clock: Arc<dyn TimeSource>,
    debug_enabled: bool,
}

impl CycleEngine {
    /// Create an engine from parameters.
    ///
    /// The current settings snapshot is read once here; later snapshots
    /// arrive through [`CycleEngine::on_settings_changed`].
    pub fn new(params: EngineParams) -> Self {
        let settings = params.settings_source.current();
        let now = params.clock.now();

        if params.debug_enabled {
            settings.log_summary(params.sink.backend_name());
        }

        let state = EngineState::new(
            settings,
            now,
            params.sink,
            params.foreground,
            params.hotkeys,
        );

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                settings_source: params.settings_source,
                clock: params.clock,
                debug_enabled: params.debug_enabled,
            }),
        }
    }

    /// Start the periodic ticks, register hotkeys and subscribe to settings.
    ///
    /// Applies the current target immediately. Calling this again while
    /// running, or after [`CycleEngine::dispose`], does nothing.
    pub fn on_view_ready(&self) -> Result<()> {
        let shared = &self.shared;
        {
            let state = shared.lock();
            if state.disposed || state.tasks.fast.is_some() {
                return Ok(());
            }
        }

        // Tick bodies take the lock, so start them (and join a half-started
        // pair) without holding it
        let (fast_weak, slow_weak) = (Arc::downgrade(shared), Arc::downgrade(shared));
        let (fast, slow) = start_both(
            || {
                ScheduledTask::repeating("cycle-fast-tick", FAST_TICK_INTERVAL, move |token| {
                    if let Some(shared) = fast_weak.upgrade() {
                        shared.fast_tick(token);
                    }
                })
            },
            || {
                ScheduledTask::repeating("cycle-slow-tick", SLOW_TICK_INTERVAL, move |token| {
                    if let Some(shared) = slow_weak.upgrade() {
                        shared.slow_tick(token);
                    }
                })
            },
        )
        .context("Failed to start the cycle ticks")?;

        let mut state = shared.lock();
        if state.disposed || state.tasks.fast.is_some() {
            drop(state);
            fast.join();
            slow.join();
            return Ok(());
        }
        state.tasks.fast = Some(fast);
        state.tasks.slow = Some(slow);

        shared.update_locked(&mut state);
        {
            let solar = state.solar_at(&state.instant);
            log_solar_summary(&solar.0, solar.1, &state.boundaries());
        }

        log_block_start!("Registering hotkeys");
        register_hotkeys(shared, &mut state);

        let weak = Arc::downgrade(shared);
        state.subscription = Some(shared.settings_source.subscribe(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_settings_changed();
            }
        })));

        Ok(())
    }

    /// Reload the settings snapshot, recompute and re-bind hotkeys.
    pub fn on_settings_changed(&self) {
        self.shared.on_settings_changed();
    }

    /// Stop every task and release the subscription and hotkeys.
    ///
    /// Waits for running task bodies to finish. Idempotent.
    pub fn dispose(&self) {
        self.shared.dispose();
    }

    /// Run one fast tick now.
    pub fn update(&self) {
        let mut state = self.shared.lock();
        self.shared.update_locked(&mut state);
    }

    /// Run one slow tick now.
    pub fn refresh_pause(&self) {
        self.shared.refresh_pause();
    }

    pub fn enable(&self) {
        self.shared.enable();
    }

    pub fn disable(&self) {
        self.shared.disable();
    }

    pub fn toggle(&self) {
        self.shared.toggle();
    }

    /// Disable now and re-enable automatically after `duration`.
    ///
    /// Replaces any previous temporary disable. A manual [`CycleEngine::enable`]
    /// cancels the pending re-enable.
    pub fn disable_temporarily(&self, duration: Duration) {
        self.shared.disable_temporarily(duration);
    }

    /// Disable until the next sunrise on the wall clock.
    pub fn disable_temporarily_until_sunrise(&self) {
        self.shared.disable_temporarily_until_sunrise();
    }

    /// Fast-forward through one simulated day.
    pub fn enable_cycle_preview(&self) {
        self.shared.set_cycle_preview(true);
    }

    pub fn disable_cycle_preview(&self) {
        self.shared.set_cycle_preview(false);
    }

    pub fn increase_temperature_offset(&self) {
        self.shared.invoke(HotkeyAction::IncreaseTemperatureOffset);
    }

    pub fn decrease_temperature_offset(&self) {
        self.shared.invoke(HotkeyAction::DecreaseTemperatureOffset);
    }

    pub fn increase_brightness_offset(&self) {
        self.shared.invoke(HotkeyAction::IncreaseBrightnessOffset);
    }

    pub fn decrease_brightness_offset(&self) {
        self.shared.invoke(HotkeyAction::DecreaseBrightnessOffset);
    }

    pub fn reset_offsets(&self) {
        self.shared.invoke(HotkeyAction::ResetOffset);
    }

    pub fn can_reset_offsets(&self) -> bool {
        self.shared.lock().offsets.can_reset()
    }

    /// Run the action a hotkey is bound to.
    pub fn invoke(&self, action: HotkeyAction) {
        self.shared.invoke(action);
    }

    pub fn instant(&self) -> DateTime<Local> {
        self.shared.lock().instant
    }

    pub fn solar_times(&self) -> SolarTimes {
        self.shared.lock().solar_times()
    }

    pub fn boundaries(&self) -> CycleBoundaries {
        self.shared.lock().boundaries()
    }

    pub fn target_configuration(&self) -> ColorConfiguration {
        self.shared.lock().target()
    }

    pub fn current_configuration(&self) -> ColorConfiguration {
        self.shared.lock().current
    }

    pub fn adjusted_day_configuration(&self) -> ColorConfiguration {
        self.shared.lock().adjusted_day()
    }

    pub fn adjusted_night_configuration(&self) -> ColorConfiguration {
        self.shared.lock().adjusted_night()
    }

    pub fn cycle_state(&self) -> CycleState {
        self.shared.lock().cycle_state()
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock().is_active()
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.lock().flags.enabled
    }

    pub fn is_paused(&self) -> bool {
        self.shared.lock().flags.paused
    }

    pub fn is_cycle_preview_enabled(&self) -> bool {
        self.shared.lock().flags.preview
    }

    pub fn offsets(&self) -> OffsetManager {
        self.shared.lock().offsets
    }

    /// Whether a temporary disable is waiting to re-enable the cycle.
    pub fn has_deferred_enable(&self) -> bool {
        self.shared.lock().tasks.deferred_enable.is_some()
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        let state = self.shared.lock();
        CycleSnapshot {
            instant: state.instant,
            solar_times: state.solar_times(),
            boundaries: state.boundaries(),
            target: state.target(),
            current: state.current,
            adjusted_day: state.adjusted_day(),
            adjusted_night: state.adjusted_night(),
            state: state.cycle_state(),
            is_active: state.is_active(),
            is_enabled: state.flags.enabled,
            is_paused: state.flags.paused,
            is_cycle_preview_enabled: state.flags.preview,
            offsets: state.offsets,
        }
    }
}

impl Drop for CycleEngine {
    fn drop(&mut self) {
        self.shared.dispose();
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // The state is plain data, so a panic elsewhere leaves it usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_locked(&self, state: &mut EngineState) {
        state.update(self.clock.now(), self.debug_enabled);
    }

    fn fast_tick(&self, token: &CancelToken) {
        let mut state = self.lock();
        if token.is_cancelled() || state.disposed {
            return;
        }
        self.update_locked(&mut state);
    }

    fn slow_tick(&self, token: &CancelToken) {
        if token.is_cancelled() {
            return;
        }
        self.refresh_pause();
    }

    fn refresh_pause(&self) {
        let mut state = self.lock();
        if state.disposed || !state.refresh_paused() {
            return;
        }

        log_pipe!();
        if state.flags.paused {
            log_info!("Pausing for the foreground application");
        } else {
            log_info!("Foreground application released, resuming");
        }
    }

    fn enable(&self) {
        let mut state = self.lock();
        state.tasks.replace_deferred_enable(None);
        self.enable_locked(&mut state);
    }

    fn disable(&self) {
        let mut state = self.lock();
        state.tasks.replace_deferred_enable(None);
        self.disable_locked(&mut state);
    }

    fn toggle(&self) {
        let mut state = self.lock();
        state.tasks.replace_deferred_enable(None);
        if state.flags.enabled {
            self.disable_locked(&mut state);
        } else {
            self.enable_locked(&mut state);
        }
    }

    fn enable_locked(&self, state: &mut EngineState) {
        if state.flags.enabled {
            return;
        }
        state.flags.enabled = true;
        log_block_start!("Cycle enabled");
        self.update_locked(state);
    }

    fn disable_locked(&self, state: &mut EngineState) {
        if !state.flags.enabled {
            return;
        }
        state.flags.enabled = false;
        log_block_start!("Cycle disabled");
        self.update_locked(state);
    }

    fn disable_temporarily(self: &Arc<Self>, duration: Duration) {
        let mut state = self.lock();

        let weak = Arc::downgrade(self);
        let task = ScheduledTask::once("cycle-deferred-enable", duration, move |token| {
            if let Some(shared) = weak.upgrade() {
                shared.deferred_enable(token);
            }
        });

        match task {
            Ok(task) => {
                state.tasks.replace_deferred_enable(Some(task));
                self.disable_locked(&mut state);
                log_indented!("Re-enabling in {}", format_delay(duration));
            }
            Err(e) => {
                log_error!("Failed to schedule re-enable: {e}");
                log_indented!("Temporary disable not applied");
            }
        }
    }

    fn disable_temporarily_until_sunrise(self: &Arc<Self>) {
        let delay = {
            let state = self.lock();
            let now = self.clock.now();
            let (solar, _) = state.solar_at(&now);
            solar.sunrise.duration_until_next(&now)
        };
        self.disable_temporarily(delay.to_std().unwrap_or_default());
    }

    fn deferred_enable(&self, token: &CancelToken) {
        let mut state = self.lock();
        if token.is_cancelled() || state.disposed {
            return;
        }

        // This task is the one being taken; dropping it only cancels
        state.tasks.deferred_enable.take();
        state.flags.enabled = true;
        log_block_start!("Temporary disable elapsed, cycle enabled");
        self.update_locked(&mut state);
    }

    fn set_cycle_preview(&self, enabled: bool) {
        let mut state = self.lock();
        if state.preview.is_active() == enabled {
            return;
        }

        if enabled {
            state.preview.start();
            log_block_start!("Previewing one day of the cycle");
        } else {
            state.preview.stop();
            log_block_start!("Cycle preview stopped");
        }
        state.flags.preview = enabled;
        self.update_locked(&mut state);
    }

    fn invoke(&self, action: HotkeyAction) {
        if action == HotkeyAction::Toggle {
            self.toggle();
            return;
        }

        let mut state = self.lock();
        // Offsets are judged against the target they would shift
        let base = state.base_target();

        let changed = match action {
            HotkeyAction::Toggle => false,
            HotkeyAction::IncreaseTemperatureOffset => state
                .offsets
                .increase_temperature(&base, TEMPERATURE_OFFSET_STEP),
            HotkeyAction::DecreaseTemperatureOffset => state
                .offsets
                .decrease_temperature(&base, TEMPERATURE_OFFSET_STEP),
            HotkeyAction::IncreaseBrightnessOffset => state
                .offsets
                .increase_brightness(&base, BRIGHTNESS_OFFSET_STEP),
            HotkeyAction::DecreaseBrightnessOffset => state
                .offsets
                .decrease_brightness(&base, BRIGHTNESS_OFFSET_STEP),
            HotkeyAction::ResetOffset => {
                let changed = state.offsets.can_reset();
                state.offsets.reset();
                if changed {
                    log_block_start!("Offsets reset");
                }
                changed
            }
        };

        if !changed {
            return;
        }

        if self.debug_enabled && action != HotkeyAction::ResetOffset {
            log_pipe!();
            log_debug!(
                "{}: {:+.0}K, {:+.2} brightness",
                action,
                state.offsets.temperature_offset(),
                state.offsets.brightness_offset()
            );
        }
        self.update_locked(&mut state);
    }

    fn on_settings_changed(self: &Arc<Self>) {
        let settings = self.settings_source.current();
        let mut state = self.lock();
        if state.disposed || settings == state.settings {
            return;
        }

        log_block_start!("Settings changed, recalculating");
        if self.debug_enabled {
            settings.log_summary(state.sink.backend_name());
        }
        state.settings = settings;
        state.refresh_paused();
        self.update_locked(&mut state);

        if state.tasks.fast.is_some() {
            state.hotkeys.unregister_all();
            register_hotkeys(self, &mut state);
        }
    }

    fn dispose(&self) {
        let (tasks, subscription) = {
            let mut state = self.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.hotkeys.unregister_all();
            (state.tasks.take_all(), state.subscription.take())
        };

        drop(subscription);
        for task in tasks {
            task.join();
        }

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Cycle engine disposed");
        }
    }
}

/// Bind every configured hotkey to its action.
fn register_hotkeys(shared: &Arc<Shared>, state: &mut EngineState) {
    let bindings: Vec<(HotkeyAction, String)> = state
        .settings
        .hotkeys
        .iter()
        .map(|(action, binding)| (action, binding.to_string()))
        .collect();

    for (action, binding) in bindings {
        let weak: Weak<Shared> = Arc::downgrade(shared);
        state.hotkeys.register(
            &binding,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.invoke(action);
                }
            }),
        );
    }
}
