//! Tick to GIF delay conversion
//!
//! GIF delays are stored in hundredths of a second. Delays are derived from
//! the running total of requested time, so rounding never accumulates: the
//! whole animation plays for the requested time rounded up to the next
//! centisecond.

use tracing::warn;

/// Shortest tick a GIF delay can express
pub const MIN_TICK_MILLIS: u32 = 10;

/// Length of one logical tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScale {
    millis_per_tick: u32,
}

impl Default for TickScale {
    fn default() -> Self {
        Self::from_millis(MIN_TICK_MILLIS)
    }
}

impl TickScale {
    /// Scale with `millis` per tick, raised to at least 10 ms
    pub fn from_millis(millis: u32) -> Self {
        if millis < MIN_TICK_MILLIS {
            warn!("Tick of {millis} ms is below the GIF delay resolution, using {MIN_TICK_MILLIS} ms");
        }
        Self {
            millis_per_tick: millis.max(MIN_TICK_MILLIS),
        }
    }

    pub fn millis_per_tick(&self) -> u32 {
        self.millis_per_tick
    }

    /// Wall-clock milliseconds for `ticks`
    pub fn to_millis(&self, ticks: u64) -> u64 {
        ticks * u64::from(self.millis_per_tick)
    }

    /// Delay clock starting at zero
    pub fn clock(&self) -> DelayClock {
        DelayClock {
            scale: *self,
            elapsed_millis: 0,
            emitted_centis: 0,
        }
    }
}

/// Turns successive holds into frame delays, carrying the sub-centisecond
/// remainder of each hold into the next one
#[derive(Debug, Clone, Copy)]
pub struct DelayClock {
    scale: TickScale,
    elapsed_millis: u64,
    emitted_centis: u64,
}

impl DelayClock {
    /// Delay in centiseconds for the next frame held `ticks`
    pub fn next_delay(&mut self, ticks: u32) -> u16 {
        self.elapsed_millis += self.scale.to_millis(u64::from(ticks));
        let due = self.elapsed_millis.div_ceil(10) - self.emitted_centis;
        self.emitted_centis += due;

        u16::try_from(due).unwrap_or_else(|_| {
            warn!("Hold of {ticks} ticks exceeds the GIF delay limit, clamping");
            u16::MAX
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10, &[5], &[5] ; "one tick per centisecond")]
    #[test_case(10, &[0, 3], &[0, 3] ; "zero")]
    #[test_case(15, &[1], &[2] ; "rounds up")]
    #[test_case(15, &[1, 1, 1, 1], &[2, 1, 2, 1] ; "remainder carried")]
    #[test_case(25, &[2, 2], &[5, 5] ; "exact")]
    #[test_case(10, &[1_000_000, 1], &[u16::MAX, 1] ; "clamped without catch-up")]
    fn test_delays(millis: u32, holds: &[u32], expected: &[u16]) {
        let mut clock = TickScale::from_millis(millis).clock();
        let delays: Vec<u16> = holds.iter().map(|&t| clock.next_delay(t)).collect();
        assert_eq!(delays, expected);
    }

    #[test]
    fn test_many_short_holds_do_not_drift() {
        let scale = TickScale::from_millis(15);
        let mut clock = scale.clock();
        let played: u64 = (0..10).map(|_| u64::from(clock.next_delay(1))).sum();

        assert_eq!(played * 10, 150);
    }

    #[test]
    fn test_sub_resolution_tick_is_raised() {
        assert_eq!(TickScale::from_millis(0).millis_per_tick(), MIN_TICK_MILLIS);
        assert_eq!(TickScale::from_millis(7).millis_per_tick(), MIN_TICK_MILLIS);
        assert_eq!(TickScale::from_millis(15).millis_per_tick(), 15);
    }
}
