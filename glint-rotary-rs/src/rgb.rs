//! Driver for the encoder's built-in RGB illumination ring.
//!
//! The three LED lines are wired active-low: driving a line low turns
//! the corresponding color on. There is no state machine here — the
//! driver is a thin mapping from a 3-bit [`Color`] code to three pin
//! levels, included in this crate because it shares bring-up ordering
//! with the decoder.

use embedded_hal::digital::{OutputPin, PinState};

/// A 3-bit color code: bit 0 = red, bit 1 = green, bit 2 = blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u8);

impl Color {
    pub const BLACK: Color = Color(0b000);
    pub const RED: Color = Color(0b001);
    pub const GREEN: Color = Color(0b010);
    pub const YELLOW: Color = Color(0b011);
    pub const BLUE: Color = Color(0b100);
    pub const MAGENTA: Color = Color(0b101);
    pub const CYAN: Color = Color(0b110);
    pub const WHITE: Color = Color(0b111);

    /// Build a color from a raw code; bits above the low three are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Color(bits & 0b111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn red(self) -> bool {
        self.0 & 0b001 != 0
    }

    pub const fn green(self) -> bool {
        self.0 & 0b010 != 0
    }

    pub const fn blue(self) -> bool {
        self.0 & 0b100 != 0
    }
}

/// Active-low level for one color channel.
fn channel_level(on: bool) -> PinState {
    if on {
        PinState::Low
    } else {
        PinState::High
    }
}

/// The RGB ring: three active-low output lines.
///
/// Construction takes ownership of the lines and switches the ring off,
/// so the LEDs never flash with whatever level the pins held at reset.
///
/// # Example
///
/// ```ignore
/// // `red`, `green`, `blue` are any `embedded-hal` output pins.
/// let mut ring = RgbRing::new(red, green, blue)?;
/// ring.set_color(Color::CYAN)?;
/// ```
pub struct RgbRing<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B, E> RgbRing<R, G, B>
where
    R: OutputPin<Error = E>,
    G: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
{
    /// Take the three LED lines and start with the ring dark.
    ///
    /// # Errors
    ///
    /// Propagates the first pin error; on fallible pins the ring may be
    /// left partially driven.
    pub fn new(red: R, green: G, blue: B) -> Result<Self, E> {
        let mut ring = Self { red, green, blue };
        ring.set_color(Color::BLACK)?;
        Ok(ring)
    }

    /// Drive the three lines to show `color`.
    ///
    /// A set color bit drives its line low (LED on); a clear bit drives
    /// it high.
    pub fn set_color(&mut self, color: Color) -> Result<(), E> {
        self.red.set_state(channel_level(color.red()))?;
        self.green.set_state(channel_level(color.green()))?;
        self.blue.set_state(channel_level(color.blue()))?;
        Ok(())
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Output pin recording its level into a shared cell.
    struct RecordedPin<'a> {
        level: &'a Cell<PinState>,
    }

    impl ErrorType for RecordedPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for RecordedPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level.set(PinState::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level.set(PinState::High);
            Ok(())
        }
    }

    fn ring_with_levels<'a>(
        levels: &'a [Cell<PinState>; 3],
    ) -> RgbRing<RecordedPin<'a>, RecordedPin<'a>, RecordedPin<'a>> {
        RgbRing::new(
            RecordedPin { level: &levels[0] },
            RecordedPin { level: &levels[1] },
            RecordedPin { level: &levels[2] },
        )
        .unwrap()
    }

    fn levels() -> [Cell<PinState>; 3] {
        [
            Cell::new(PinState::Low),
            Cell::new(PinState::Low),
            Cell::new(PinState::Low),
        ]
    }

    // ── Color codes ──────────────────────────────────────────────────

    #[test]
    fn color_bits_match_the_channel_layout() {
        assert_eq!(Color::BLACK.bits(), 0b000);
        assert_eq!(Color::RED.bits(), 0b001);
        assert_eq!(Color::GREEN.bits(), 0b010);
        assert_eq!(Color::YELLOW.bits(), 0b011);
        assert_eq!(Color::BLUE.bits(), 0b100);
        assert_eq!(Color::MAGENTA.bits(), 0b101);
        assert_eq!(Color::CYAN.bits(), 0b110);
        assert_eq!(Color::WHITE.bits(), 0b111);
    }

    #[test]
    fn from_bits_masks_to_three_bits() {
        assert_eq!(Color::from_bits(0b1111_1010), Color::GREEN);
        assert_eq!(Color::from_bits(0b1000), Color::BLACK);
    }

    #[test]
    fn channel_accessors_decode_each_bit() {
        assert!(Color::MAGENTA.red());
        assert!(!Color::MAGENTA.green());
        assert!(Color::MAGENTA.blue());
    }

    // ── Ring output ──────────────────────────────────────────────────

    #[test]
    fn construction_switches_the_ring_off() {
        let levels = levels();
        let _ring = ring_with_levels(&levels);
        // All lines high: every LED off.
        for level in &levels {
            assert_eq!(level.get(), PinState::High);
        }
    }

    #[test]
    fn white_drives_all_three_lines_low() {
        let levels = levels();
        let mut ring = ring_with_levels(&levels);
        ring.set_color(Color::WHITE).unwrap();
        for level in &levels {
            assert_eq!(level.get(), PinState::Low);
        }
    }

    #[test]
    fn black_drives_all_three_lines_high() {
        let levels = levels();
        let mut ring = ring_with_levels(&levels);
        ring.set_color(Color::WHITE).unwrap();
        ring.set_color(Color::BLACK).unwrap();
        for level in &levels {
            assert_eq!(level.get(), PinState::High);
        }
    }

    #[test]
    fn single_channel_colors_drive_only_their_line_low() {
        let levels = levels();
        let mut ring = ring_with_levels(&levels);

        ring.set_color(Color::RED).unwrap();
        assert_eq!(levels[0].get(), PinState::Low);
        assert_eq!(levels[1].get(), PinState::High);
        assert_eq!(levels[2].get(), PinState::High);

        ring.set_color(Color::BLUE).unwrap();
        assert_eq!(levels[0].get(), PinState::High);
        assert_eq!(levels[1].get(), PinState::High);
        assert_eq!(levels[2].get(), PinState::Low);
    }
}
