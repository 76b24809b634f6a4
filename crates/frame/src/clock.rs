use std::time::Instant;

/// Monotonic seconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Frame-to-frame delta bookkeeping plus a smoothed FPS readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_frame: f32,
    delta: f32,
    smoothed_fps: f32,
    /// Weight of the newest sample in the FPS moving average.
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: 0.0,
            delta: 0.0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance to `now` (seconds) and return the elapsed time since the previous tick.
    pub fn tick(&mut self, now: f32) -> f32 {
        self.delta = now - self.last_frame;
        self.last_frame = now;

        if self.delta > 0.0 {
            let instant_fps = 1.0 / self.delta;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
        }
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn last_frame(&self) -> f32 {
        self.last_frame
    }

    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_difference_between_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(0.5), 0.5);
        assert_eq!(clock.tick(0.75), 0.25);
        assert_eq!(clock.delta(), 0.25);
        assert_eq!(clock.last_frame(), 0.75);
    }

    #[test]
    fn fps_converges_towards_frame_rate() {
        let mut clock = FrameClock::new();
        let mut t = 0.0;
        for _ in 0..500 {
            t += 1.0 / 30.0;
            clock.tick(t);
        }
        assert!((clock.fps() - 30.0).abs() < 0.5, "fps {}", clock.fps());
    }

    #[test]
    fn zero_delta_keeps_fps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.fps(), 60.0);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
