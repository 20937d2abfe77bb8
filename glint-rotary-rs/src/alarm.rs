//! Single-slot software alarm.
//!
//! [`AlarmService`] is a one-shot, millisecond-resolution countdown: arm
//! it with a timeout and a callback, feed it a tick every millisecond,
//! and the callback runs — synchronously, from the tick context — once
//! the countdown elapses. There is exactly one slot: arming again before
//! expiry silently cancels and replaces the pending alarm. This is
//! deliberately *not* a timer wheel; the rotary debounce only ever needs
//! the most recent deadline.

/// One-shot, single-slot millisecond timer.
///
/// The two entry points, [`arm`](Self::arm) and [`tick`](Self::tick),
/// both take `&mut self`; when they are called from different interrupt
/// contexts the caller must serialize them, e.g. behind a
/// critical-section mutex. The callback is stored by value, so an armed
/// alarm always has one.
///
/// # Example
///
/// ```
/// use glint_rotary::AlarmService;
///
/// fn beep() {}
///
/// let mut alarm: AlarmService<fn()> = AlarmService::new();
/// alarm.arm(3, beep);
/// alarm.tick(); // 1 ms
/// alarm.tick(); // 2 ms
/// alarm.tick(); // 3 ms — beep() runs here
/// ```
pub struct AlarmService<C> {
    /// Ticks elapsed since the last arm.
    ticks: u32,
    /// Countdown threshold; zero means no alarm is pending.
    timeout: u32,
    callback: Option<C>,
}

impl<C> AlarmService<C> {
    /// A service with no alarm pending.
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            timeout: 0,
            callback: None,
        }
    }
}

impl<C: FnMut()> AlarmService<C> {
    /// Schedule `callback` to run after `timeout_ms` ticks from now.
    ///
    /// Replaces any pending alarm. `timeout_ms == 0` means "no alarm":
    /// the pending one (if any) is cancelled and nothing will fire.
    ///
    /// Write order matters when [`tick`](Self::tick) can preempt between
    /// statements: the callback must be in place before the threshold
    /// that triggers it, and the threshold before the counter restarts.
    pub fn arm(&mut self, timeout_ms: u32, callback: C) {
        self.callback = Some(callback);
        self.timeout = timeout_ms;
        self.ticks = 0;
    }

    /// Advance the countdown by one millisecond.
    ///
    /// Invoke from a fixed-period 1 ms tick source. When the elapsed
    /// count reaches a non-zero timeout the alarm clears itself first
    /// (one-shot) and then runs the callback in the caller's context.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.timeout != 0 && self.ticks == self.timeout {
            self.timeout = 0;
            if let Some(callback) = self.callback.as_mut() {
                callback();
            }
        }
    }
}

impl<C> Default for AlarmService<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
