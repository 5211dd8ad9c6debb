/// Frame clock driven by the host's frame timestamps.
/// Reports the milliseconds elapsed since the previous tick.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous tick, if any.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Record a frame timestamp. Returns the elapsed time since the previous
    /// tick (0.0 on the first tick, never negative).
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        elapsed
    }

    /// Forget the previous timestamp; the next tick reports 0.0.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Per-gear delta clock.
///
/// Elapsed time piles up between reads; a read returns everything unread
/// since the previous read. The first read starts the clock and returns 0,
/// discarding whatever was fed before it.
#[derive(Debug, Clone, Default)]
pub struct DeltaClock {
    started: bool,
    unread_ms: f64,
}

impl DeltaClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed frame time into the clock.
    pub fn accumulate(&mut self, elapsed_ms: f64) {
        if self.started {
            self.unread_ms += elapsed_ms;
        }
    }

    /// Read and consume the unread time.
    pub fn read(&mut self) -> f64 {
        if !self.started {
            self.started = true;
            self.unread_ms = 0.0;
            return 0.0;
        }
        std::mem::take(&mut self.unread_ms)
    }

    /// Whether the clock has been read at least once.
    pub fn is_started(&self) -> bool {
        self.started
    }
}
