//! Wheel input coalescing.
//!
//! Raw wheel events can arrive many times per frame. [`InputCoalescer`] sums them
//! and hands the merged delta downstream once per display refresh.

/// Single-shot "run at the next display refresh" primitive.
///
/// The coalescer calls `request_refresh` at most once per pending merge and
/// expects the host to call [`InputCoalescer::on_refresh`] when that refresh runs.
pub trait RefreshScheduler {
    fn request_refresh(&mut self);

    /// Drop a previously requested refresh, if the platform supports it.
    fn cancel_refresh(&mut self) {}
}

/// Two-axis scroll delta in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    pub x: f32,
    pub y: f32,
}

impl WheelDelta {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Merges bursts of wheel deltas into one downstream call per refresh tick.
pub struct InputCoalescer<S, F>
where
    S: RefreshScheduler,
    F: FnMut(WheelDelta),
{
    scheduler: S,
    on_merged: F,
    /// Deltas accumulated since the last delivery
    sum: WheelDelta,
    /// Whether a refresh has been requested and not yet serviced
    scheduled: bool,
    disposed: bool,
}

impl<S, F> InputCoalescer<S, F>
where
    S: RefreshScheduler,
    F: FnMut(WheelDelta),
{
    pub fn new(scheduler: S, on_merged: F) -> Self {
        Self {
            scheduler,
            on_merged,
            sum: WheelDelta::default(),
            scheduled: false,
            disposed: false,
        }
    }

    /// Add one raw event. Schedules a refresh only if none is pending.
    pub fn ingest(&mut self, delta_x: f32, delta_y: f32) {
        if self.disposed {
            return;
        }

        self.sum.x += delta_x;
        self.sum.y += delta_y;

        if !self.scheduled {
            self.scheduled = true;
            log::trace!("wheel merge scheduled");
            self.scheduler.request_refresh();
        }
    }

    /// Refresh tick. Delivers the merged delta if a merge was scheduled.
    ///
    /// Ticks with nothing scheduled are ignored, so the host may call this every frame.
    pub fn on_refresh(&mut self) {
        if !self.scheduled || self.disposed {
            return;
        }

        let merged = std::mem::take(&mut self.sum);
        self.scheduled = false;
        (self.on_merged)(merged);
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Sum waiting for the next tick.
    pub fn pending(&self) -> WheelDelta {
        self.sum
    }

    /// Cancel any pending merge. Later ticks and ingests are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.scheduled {
            self.scheduler.cancel_refresh();
            self.scheduled = false;
        }
        self.sum = WheelDelta::default();
        self.disposed = true;
    }
}

impl<S, F> Drop for InputCoalescer<S, F>
where
    S: RefreshScheduler,
    F: FnMut(WheelDelta),
{
    fn drop(&mut self) {
        self.dispose();
    }
}
