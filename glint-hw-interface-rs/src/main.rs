//! glint-hw-interface
//!
//! Firmware for the illuminated rotary encoder on the Raspberry Pi
//! Pico 2. Wires the glint-rotary library crate to real pins:
//!
//! 1. The knob is turned and either quadrature line changes level.
//! 2. The quadrature task samples both lines, feeds the decoder, and
//!    rearms the settle alarm — a bounce burst keeps pushing the
//!    deadline out, so only the last transition decides when settling
//!    happens.
//! 3. The 1 ms tick task drives the alarm service; once the lines have
//!    been quiet for the debounce window the settle evaluation runs in
//!    tick context and commits the new coarse position.
//! 4. Committed positions leave the tick context through a channel; the
//!    ring task logs them and recolors the RGB ring.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use glint_rotary::{AlarmService, Color, QuadratureSource, RgbRing, RotaryConfig, RotaryDecoder};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Distinct coarse positions per full revolution of the knob.
const POSITION_MODULO: u16 = 16384;

/// Quiet time on the quadrature lines before a position is committed.
const DEBOUNCE_TIMEOUT_MS: u32 = 4;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Decoder singleton — fed by the quadrature task, settled from the tick
/// context when the alarm fires.
static DECODER: Mutex<CriticalSectionRawMutex, RefCell<Option<RotaryDecoder<fn(u16)>>>> =
    Mutex::new(RefCell::new(None));

/// The single alarm slot — armed by the quadrature task, driven by the
/// tick task. This is the one piece of state touched from both contexts,
/// so every access goes through the critical-section mutex.
static ALARM: Mutex<CriticalSectionRawMutex, RefCell<AlarmService<fn()>>> =
    Mutex::new(RefCell::new(AlarmService::new()));

/// Committed coarse positions, settle context → ring task.
static POSITION_EVENTS: Channel<CriticalSectionRawMutex, u16, 8> = Channel::new();

// ---------------------------------------------------------------------------
// Quadrature lines
// ---------------------------------------------------------------------------

/// The two quadrature inputs, exposed to the decoder as a 2-bit sample
/// source.
struct QuadratureLines {
    a: Input<'static>,
    b: Input<'static>,
}

impl QuadratureSource for QuadratureLines {
    fn pin_a(&mut self) -> bool {
        self.a.is_high()
    }

    fn pin_b(&mut self) -> bool {
        self.b.is_high()
    }
}

impl QuadratureLines {
    /// Resolve when either line changes level.
    async fn edge(&mut self) {
        select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;
    }
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// Settle trampoline, invoked by the alarm from the tick context once
/// the debounce window has elapsed with the lines quiet.
fn settle_elapsed() {
    DECODER.lock(|slot| {
        if let Some(decoder) = slot.borrow_mut().as_mut() {
            decoder.settle();
        }
    });
}

/// Change callback registered with the decoder. Still runs in the tick
/// context, so it only hands the position to the ring task.
fn on_position_change(position: u16) {
    if POSITION_EVENTS.try_send(position).is_err() {
        warn!("position event dropped: {}", position);
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Fixed-period 1 ms tick source for the alarm service.
#[embassy_executor::task]
async fn alarm_tick_task() {
    let mut ticker = Ticker::every(Duration::from_millis(1));
    loop {
        ticker.next().await;
        ALARM.lock(|alarm| alarm.borrow_mut().tick());
    }
}

/// Edge-driven quadrature sampling.
///
/// Every level change on either line — including bounce — samples both
/// lines, accumulates the transition, and pushes the settle deadline
/// out. The push-button input is parked here so the line stays
/// configured; button presses are not handled.
#[embassy_executor::task]
async fn quadrature_task(mut lines: QuadratureLines, _push: Input<'static>) {
    info!("quadrature task started");

    loop {
        lines.edge().await;
        let sample = lines.sample();

        let timeout = DECODER.lock(|slot| {
            slot.borrow_mut()
                .as_mut()
                .map(|decoder| decoder.pin_change(sample))
        });

        if let Some(timeout_ms) = timeout {
            ALARM.lock(|alarm| alarm.borrow_mut().arm(timeout_ms, settle_elapsed));
        }
    }
}

/// Consumes committed positions and recolors the ring.
#[embassy_executor::task]
async fn ring_task(mut ring: RgbRing<Output<'static>, Output<'static>, Output<'static>>) {
    loop {
        let position = POSITION_EVENTS.receive().await;
        info!("position changed: {}", position);

        // Walk the seven visible colors; never back to dark.
        let color = Color::from_bits((position % 7) as u8 + 1);
        ring.set_color(color).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("glint-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // ROT_A    → GP14 (p.PIN_14)  quadrature line A, pull-up
    // ROT_B    → GP15 (p.PIN_15)  quadrature line B, pull-up
    // ROT_PUSH → GP13 (p.PIN_13)  push button, plain input
    // !RED     → GP16 (p.PIN_16)  LED line, active-low
    // !GREEN   → GP17 (p.PIN_17)  LED line, active-low
    // !BLUE    → GP18 (p.PIN_18)  LED line, active-low
    // ———————————————————————————————————————————————————————————————————————

    let mut lines = QuadratureLines {
        a: Input::new(p.PIN_14, Pull::Up),
        b: Input::new(p.PIN_15, Pull::Up),
    };

    let push = Input::new(p.PIN_13, Pull::None);

    // LED lines start high so the ring is dark from the first instant;
    // RgbRing::new drives them off again as part of taking ownership.
    let ring = RgbRing::new(
        Output::new(p.PIN_16, Level::High),
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_18, Level::High),
    )
    .unwrap();

    // Seed the transition history from the lines' resting state so the
    // first edge is decoded against what the hardware actually shows.
    let initial_sample = lines.sample();

    let config = RotaryConfig::new(POSITION_MODULO, DEBOUNCE_TIMEOUT_MS);
    let decoder =
        RotaryDecoder::new(config, initial_sample, on_position_change as fn(u16)).unwrap();
    DECODER.lock(|slot| {
        *slot.borrow_mut() = Some(decoder);
    });

    spawner.spawn(alarm_tick_task()).unwrap();
    spawner.spawn(quadrature_task(lines, push)).unwrap();
    spawner.spawn(ring_task(ring)).unwrap();

    info!("all tasks spawned");
}
