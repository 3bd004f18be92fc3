// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing primitives for single-threaded, event-driven hosts.
//!
//! Neither type owns a clock or schedules anything. The host passes
//! millisecond timestamps in and drains pending work at its own tick, which
//! keeps every transition synchronous and unit-testable.

/// Suppresses hover-driven focus changes while keyboard or wheel navigation
/// is in flight.
///
/// Every qualifying input resets the quiet period; hover focus is allowed
/// again once a full quiet period has elapsed with no navigation.
///
/// ```
/// use rove_input::NavQuiet;
///
/// let mut quiet = NavQuiet::new();
/// assert!(quiet.allows_hover_focus(1_000));
///
/// quiet.note_navigation(1_000);
/// assert!(!quiet.allows_hover_focus(1_100));
/// assert!(quiet.allows_hover_focus(1_000 + NavQuiet::DEFAULT_QUIET_MS));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NavQuiet {
    quiet_ms: u64,
    last_navigation: Option<u64>,
}

impl NavQuiet {
    /// Default quiet period after the last navigation input.
    pub const DEFAULT_QUIET_MS: u64 = 250;

    /// Create with the default quiet period.
    pub fn new() -> Self {
        Self::with_quiet(Self::DEFAULT_QUIET_MS)
    }

    /// Create with a custom quiet period in milliseconds.
    pub fn with_quiet(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            last_navigation: None,
        }
    }

    /// Record a keyboard/wheel navigation input, restarting the quiet period.
    pub fn note_navigation(&mut self, now_ms: u64) {
        self.last_navigation = Some(now_ms);
    }

    /// Whether a hover-driven focus change may be applied at `now_ms`.
    pub fn allows_hover_focus(&self, now_ms: u64) -> bool {
        match self.last_navigation {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.quiet_ms,
        }
    }

    /// Forget any recorded navigation (teardown).
    pub fn reset(&mut self) {
        self.last_navigation = None;
    }
}

/// A one-shot deferred action.
///
/// Used to re-read final element state on the tick after a composition-input
/// or drag-completion event, once the host has finished its own update. The
/// payload is taken at most once, and teardown cancels it so a torn-down
/// container is never acted on.
///
/// ```
/// use rove_input::Deferred;
///
/// let mut deferred: Deferred<u32> = Deferred::new();
/// deferred.arm(7);
/// assert_eq!(deferred.take(), Some(7));
/// assert_eq!(deferred.take(), None, "one-shot");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Deferred<T> {
    pending: Option<T>,
}

impl<T> Deferred<T> {
    /// Create with nothing pending.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the action. A second arm before the tick replaces the payload;
    /// only the latest state matters when the tick fires.
    pub fn arm(&mut self, payload: T) {
        self.pending = Some(payload);
    }

    /// Whether an action is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending payload, if any. Called by the host's tick.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop any pending payload without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
