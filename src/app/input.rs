use crate::util::coalesce::WheelDelta;
use eframe::egui;

use super::App;

/// Pixels per wheel "line" when the platform reports line units
pub const LINE_SCROLL_PIXELS: f32 = 40.0;

/// Convert an egui wheel event into a scroll delta in pixels.
///
/// egui reports how the content should move; the strip's offset moves the opposite way.
pub fn wheel_pixels(unit: egui::MouseWheelUnit, delta: egui::Vec2, page_width: f32) -> WheelDelta {
    let scale = match unit {
        egui::MouseWheelUnit::Point => 1.0,
        egui::MouseWheelUnit::Line => LINE_SCROLL_PIXELS,
        egui::MouseWheelUnit::Page => page_width,
    };
    WheelDelta::new(-delta.x * scale, -delta.y * scale)
}

impl App {
    /// Feed this frame's raw wheel events to the coalescer.
    pub(crate) fn ingest_wheel_events(&mut self, ctx: &egui::Context) {
        let page_width = self.strip.container_width();
        let deltas: Vec<WheelDelta> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::MouseWheel { unit, delta, .. } => {
                        Some(wheel_pixels(*unit, *delta, page_width))
                    }
                    _ => None,
                })
                .collect()
        });

        if deltas.is_empty() {
            return;
        }

        for delta in deltas {
            self.perf_stats.on_wheel_event();
            self.coalescer.ingest(delta.x, delta.y);
        }
        log::trace!(
            "wheel pending {:?} (scheduled: {})",
            self.coalescer.pending(),
            self.coalescer.is_scheduled()
        );
    }

    /// Apply merged deltas delivered by the coalescer.
    pub(crate) fn process_merged_deltas(&mut self) {
        while let Ok(delta) = self.merged_rx.try_recv() {
            self.perf_stats.on_merged_delta();
            self.strip.scroll_by(delta);
        }
    }

    pub(crate) fn select_tab(&mut self, index: usize) {
        if let Some(label) = self.strip.select(index) {
            log::info!("Selected tab {} ({})", index, label);
        }
    }
}
