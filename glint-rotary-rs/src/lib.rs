//! Debounced quadrature decoder and RGB ring driver for an illuminated
//! rotary encoder.
//!
//! A mechanical encoder encodes rotation as a 2-bit gray code on two
//! lines, A and B:
//!
//! ```text
//!    +----+    +----+
//!    |    |    |    |       A
//!  --+    +----+    +----
//!       +----+    +----+
//!       |    |    |    |    B
//!   ----+    +----+    +--
//! ```
//!
//! One detent of the knob is four line transitions. Mechanical contacts
//! bounce, so a single detent can deliver a burst of spurious
//! transitions. [`RotaryDecoder`] accumulates every transition through a
//! gray-code lookup table into a fine quarter-step counter — bounce
//! transitions self-cancel — and commits a coarse position only once
//! [`AlarmService`] reports that the lines have been quiet for the
//! configured debounce window.
//!
//! # Architecture
//!
//! - [`AlarmService`] — one-shot, single-slot millisecond timer, driven
//!   by an external 1 ms tick source. Arming replaces any pending alarm,
//!   so only the last transition of a burst decides when the settle
//!   evaluation runs.
//! - [`RotaryDecoder`] — the transition table and the fine/coarse
//!   counters. Feed it raw 2-bit samples from a pin-change notification;
//!   rearm the alarm with the window it returns; call
//!   [`settle`](RotaryDecoder::settle) when the alarm fires.
//! - [`RgbRing`] — the encoder's built-in RGB illumination, three
//!   active-low lines behind [`embedded_hal::digital::OutputPin`].
//!
//! Nothing here blocks and nothing allocates; both decoder entry points
//! are a table lookup plus a few integer operations, cheap enough to run
//! inside interrupt handlers.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging formatting for the public types
//!   via [`defmt`].

#![no_std]

pub mod alarm;
pub mod config;
pub mod decoder;
pub mod error;
pub mod rgb;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use alarm::AlarmService;
pub use config::RotaryConfig;
pub use decoder::{QuadratureSource, RotaryDecoder, TRANSITION_TABLE};
pub use error::ConfigError;
pub use rgb::{Color, RgbRing};
