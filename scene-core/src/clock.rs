//! Fixed-rate frame pacing on top of an external monotonic time source.

use crate::config::MotionConfig;
use std::time::Duration;

/// Converts wall-clock time into a whole number of simulation frames.
///
/// The simulation is defined per frame at a fixed rate, while the window
/// may repaint irregularly. Each call to [`FrameClock::advance`] reports how
/// many frames became due since the previous call; fractional leftovers
/// carry over. A stall longer than `max_catch_up` frames is dropped rather
/// than replayed in a burst.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: f64,
    max_catch_up: u32,
    last: Option<f64>,
    carry: f64,
}

impl FrameClock {
    pub fn new(motion: &MotionConfig) -> Self {
        Self {
            interval: 1.0 / motion.target_fps as f64,
            max_catch_up: motion.max_catch_up_steps,
            last: None,
            carry: 0.0,
        }
    }

    /// Target time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }

    /// Reports how many frames are due at time `now_secs`.
    ///
    /// The first call starts the clock and always yields one frame so the
    /// scene is animated from its first paint.
    pub fn advance(&mut self, now_secs: f64) -> u32 {
        let Some(last) = self.last.replace(now_secs) else {
            return 1;
        };

        self.carry += (now_secs - last).max(0.0);
        let due = (self.carry / self.interval).floor();
        self.carry -= due * self.interval;

        if due > self.max_catch_up as f64 {
            log::debug!(
                "frame clock fell behind by {due} frames; dropping {}",
                due - self.max_catch_up as f64
            );
            self.carry = 0.0;
            return self.max_catch_up;
        }
        due as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FrameClock {
        FrameClock::new(&MotionConfig::default())
    }

    #[test]
    fn first_call_yields_one_frame() {
        let mut c = clock();
        assert_eq!(c.advance(12.0), 1);
    }

    #[test]
    fn frames_accumulate_with_carry() {
        let mut c = clock();
        let dt = 1.0 / 60.0;
        c.advance(0.0);

        assert_eq!(c.advance(0.5 * dt), 0);
        assert_eq!(c.advance(1.2 * dt), 1);
        // 0.2 frame carried over, plus 1.9 more.
        assert_eq!(c.advance(3.1 * dt), 2);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut c = clock();
        c.advance(0.0);

        assert_eq!(c.advance(10.0), MotionConfig::default().max_catch_up_steps);
        // The backlog is dropped, not replayed.
        assert_eq!(c.advance(10.0 + 0.5 / 60.0), 0);
    }

    #[test]
    fn time_going_backwards_yields_nothing() {
        let mut c = clock();
        c.advance(5.0);
        assert_eq!(c.advance(4.0), 0);
    }

    #[test]
    fn frame_interval_matches_target_rate() {
        let c = clock();
        assert_eq!(c.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
