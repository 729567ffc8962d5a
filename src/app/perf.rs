use std::time::{Duration, Instant};

/// Frame and input counters for checking how well wheel input is coalesced
#[derive(Default)]
pub struct PerfStats {
    /// When the current measurement window started
    window_start: Option<Instant>,
    /// Number of frames rendered in this window
    frame_count: u64,
    /// Raw wheel events fed to the coalescer
    wheel_events: u64,
    /// Merged deltas delivered by the coalescer
    merged_deltas: u64,
    /// Layout passes that produced rectangles
    layout_passes: u64,
    /// Layout passes rejected with an invalid parameter
    layout_errors: u64,
}

impl PerfStats {
    pub fn on_frame(&mut self) {
        self.frame_count += 1;
    }

    pub fn on_wheel_event(&mut self) {
        self.wheel_events += 1;
    }

    pub fn on_merged_delta(&mut self) {
        self.merged_deltas += 1;
    }

    pub fn on_layout(&mut self) {
        self.layout_passes += 1;
    }

    pub fn on_layout_error(&mut self) {
        self.layout_errors += 1;
    }

    /// Log performance stats if enabled and interval has elapsed
    pub fn maybe_log(&mut self, interval: f32) {
        if interval <= 0.0 {
            return;
        }

        let now = Instant::now();
        let window_start = self.window_start.get_or_insert(now);
        let elapsed = now.duration_since(*window_start);

        if elapsed >= Duration::from_secs_f32(interval) {
            let secs = elapsed.as_secs_f64();
            let fps = self.frame_count as f64 / secs;
            let s = &self;

            log::info!(
                "[perf] {:.1}s: frames={} ({:.1} fps) | wheel={} merged={} | layouts={} errors={}",
                secs,
                s.frame_count,
                fps,
                s.wheel_events,
                s.merged_deltas,
                s.layout_passes,
                s.layout_errors,
            );

            *self = PerfStats {
                window_start: Some(now),
                ..Default::default()
            };
        }
    }
}
