use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FIRE_RATE: f32 = 0.25;
pub const MIN_FIRE_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireCommand {
    Start,
    Stop,
}

/// Local fire intent, targeted at the character that should fire.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireIntent(pub FireCommand);

/// Fire command sent by a non-authoritative participant over the ordered client channel.
#[derive(Event, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest(pub FireCommand);

/// Fire command accepted by the authority for the targeted character.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireOrder(pub FireCommand);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePhase {
    Idle,
    Firing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireStart {
    AlreadyFiring,
    /// First shot is due right away.
    Immediate,
    /// First shot waits for the cooldown left over from the previous burst.
    Deferred(Duration),
}

/// Per-character fire controller state.
///
/// `last_fired` and `timer` are only maintained on the authority. The timer is owned by the
/// component, so it is released together with the character.
#[derive(Component, Debug, Clone)]
pub struct FireState {
    fire_rate: Duration,
    is_firing: bool,
    last_fired: Option<Duration>,
    timer: Option<Timer>,
}

impl FireState {
    pub fn new(fire_rate_secs: f32) -> Self {
        // overflow saturates, it never falls back to the floor
        let fire_rate = if fire_rate_secs.is_nan() || fire_rate_secs <= 0.0 {
            MIN_FIRE_INTERVAL
        } else {
            Duration::try_from_secs_f32(fire_rate_secs)
                .unwrap_or(Duration::MAX)
                .max(MIN_FIRE_INTERVAL)
        };

        FireState {
            fire_rate,
            is_firing: false,
            last_fired: None,
            timer: None,
        }
    }

    pub fn fire_rate(&self) -> Duration {
        self.fire_rate
    }

    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    pub fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    pub fn phase(&self) -> FirePhase {
        if self.timer.is_some() {
            FirePhase::Firing
        } else {
            FirePhase::Idle
        }
    }

    pub(crate) fn set_intent(&mut self, command: FireCommand) {
        self.is_firing = command == FireCommand::Start;
    }

    /// Moves to `Firing` unless already there. On [`FireStart::Immediate`] the caller spawns
    /// the first shot; it has already been recorded at `now`.
    pub(crate) fn begin(&mut self, now: Duration) -> FireStart {
        if self.timer.is_some() {
            return FireStart::AlreadyFiring;
        }

        self.is_firing = true;

        let cooldown = self
            .last_fired
            .map(|last| self.fire_rate.saturating_sub(now.saturating_sub(last)))
            .unwrap_or(Duration::ZERO);

        let mut timer = Timer::new(self.fire_rate, TimerMode::Repeating);

        if cooldown.is_zero() {
            self.last_fired = Some(now);
            self.timer = Some(timer);
            FireStart::Immediate
        } else {
            timer.set_elapsed(self.fire_rate - cooldown);
            self.timer = Some(timer);
            FireStart::Deferred(cooldown)
        }
    }

    /// Drops the pending timer. Returns whether one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        self.is_firing = false;
        self.timer.take().is_some()
    }

    /// Advances the pending timer and returns how many shots are due this frame.
    pub(crate) fn tick(&mut self, delta: Duration, now: Duration) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };

        let due = timer.tick(delta).times_finished_this_tick();
        if due == 0 {
            return 0;
        }

        if !self.is_firing {
            self.timer = None;
            return 0;
        }

        self.last_fired = Some(now);
        due
    }
}

impl Default for FireState {
    fn default() -> Self {
        FireState::new(DEFAULT_FIRE_RATE)
    }
}
