//! Deterministic periodic triggers on a virtual clock.
//!
//! The host feeds elapsed time in; the scheduler hands back every firing that
//! became due, in time order. Nothing here sleeps or reads the wall clock.

use std::time::Duration;

use crate::{animation::player::Track, config::ViewConfig};

/// Source of a periodic firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trigger {
    Track(Track),
    Colon,
}

impl Trigger {
    /// Delivery order for firings due at the same instant.
    pub const ALL: [Self; 3] = [
        Self::Track(Track::Base),
        Self::Track(Track::Overlay),
        Self::Colon,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Track(Track::Base) => 0,
            Self::Track(Track::Overlay) => 1,
            Self::Colon => 2,
        }
    }
}

/// One delivered firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Firing {
    pub trigger: Trigger,
    /// Virtual time the firing was due at.
    pub at: Duration,
}

/// What the handler wants done with the trigger that just fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerControl {
    Continue,
    Disable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicTrigger {
    pub period: Duration,
    pub next_due: Duration,
    pub enabled: bool,
}

impl PeriodicTrigger {
    /// First firing one period after start.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: period,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    now: Duration,
    triggers: [PeriodicTrigger; 3],
}

impl Scheduler {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            now: Duration::ZERO,
            triggers: [
                PeriodicTrigger::new(config.track_period(Track::Base)),
                PeriodicTrigger::new(config.track_period(Track::Overlay)),
                PeriodicTrigger::new(config.colon_period()),
            ],
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn trigger(&self, trigger: Trigger) -> &PeriodicTrigger {
        &self.triggers[trigger.slot()]
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        self.trigger(trigger).enabled
    }

    pub fn disable(&mut self, trigger: Trigger) {
        self.triggers[trigger.slot()].enabled = false;
    }

    /// Earliest pending firing of any enabled trigger.
    pub fn next_firing(&self) -> Option<Firing> {
        Trigger::ALL
            .into_iter()
            .filter(|&t| self.is_enabled(t))
            .map(|t| Firing {
                trigger: t,
                at: self.trigger(t).next_due,
            })
            .min_by_key(|f| (f.at, f.trigger.slot()))
    }

    /// Deliver every firing due at or before `until`, in order, then move the
    /// clock to `until`.
    ///
    /// A trigger the handler disables is never fired again. Moving backwards
    /// delivers nothing.
    pub fn advance_to(
        &mut self,
        until: Duration,
        mut on_fire: impl FnMut(Firing) -> TriggerControl,
    ) -> Vec<Firing> {
        let mut fired = Vec::new();
        if until < self.now {
            return fired;
        }

        while let Some(firing) = self.next_firing().filter(|f| f.at <= until) {
            let slot = firing.trigger.slot();
            let t = &mut self.triggers[slot];
            t.next_due += t.period;
            self.now = firing.at;

            if on_fire(firing) == TriggerControl::Disable {
                self.disable(firing.trigger);
            }
            fired.push(firing);
        }

        self.now = until;
        fired
    }
}

/// Coalescing redraw flag: any number of requests collapse into one repaint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepaintRequest {
    pending: bool,
}

impl RepaintRequest {
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether a repaint was pending; clears the flag.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
