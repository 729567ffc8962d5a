mod input;
mod perf;

use crate::config::Config;
use crate::strip::TabStrip;
use crate::ui::tab_strip;
use crate::util::coalesce::{InputCoalescer, RefreshScheduler, WheelDelta};
use eframe::egui;
use std::sync::mpsc::{self, Receiver};
use self::perf::PerfStats;

/// Outer padding around the tab strip
const PADDING: i8 = 12;

/// Coalescer ticks ride on egui's next repaint.
pub struct EguiRefresh {
    ctx: egui::Context,
}

impl RefreshScheduler for EguiRefresh {
    fn request_refresh(&mut self) {
        self.ctx.request_repaint();
    }
}

type MergedDeltaSink = Box<dyn FnMut(WheelDelta)>;

/// Demo host for the folding tab strip
pub struct App {
    /// Application configuration
    config: Config,
    /// Tabs plus the scroll state the layout is computed from
    strip: TabStrip,
    /// Merges wheel bursts into one delta per frame
    coalescer: InputCoalescer<EguiRefresh, MergedDeltaSink>,
    /// Merged deltas waiting to be applied to the strip
    merged_rx: Receiver<WheelDelta>,
    /// Performance tracking stats
    perf_stats: PerfStats,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, strip: TabStrip, config: Config) -> Self {
        let (merged_tx, merged_rx) = mpsc::channel();

        let sink: MergedDeltaSink = Box::new(move |delta| {
            if merged_tx.send(delta).is_err() {
                log::warn!("Dropping merged wheel delta, receiver is gone");
            }
        });
        let coalescer = InputCoalescer::new(
            EguiRefresh {
                ctx: cc.egui_ctx.clone(),
            },
            sink,
        );

        log::info!(
            "Tab strip ready: {} tabs, tab width {}px, fold width {}px",
            strip.labels().len(),
            strip.params().tab_width,
            strip.params().fold_width,
        );

        Self {
            config,
            strip,
            coalescer,
            merged_rx,
            perf_stats: PerfStats::default(),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.perf_stats.on_frame();

        // Refresh tick: hand over everything merged since the previous frame
        self.coalescer.on_refresh();
        self.process_merged_deltas();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK).inner_margin(egui::Margin::same(PADDING)))
            .show(ctx, |ui| {
                let strip_rect = tab_strip::allocate(ui, self.config.tabs.tab_height);

                if ui.rect_contains_pointer(strip_rect) {
                    self.ingest_wheel_events(ctx);
                }

                if let Err(e) = self.strip.set_container_width(strip_rect.width()) {
                    self.perf_stats.on_layout_error();
                    log::error!("Ignoring container resize: {}", e);
                    return;
                }

                let rects = match self.strip.layout() {
                    Ok(rects) => rects,
                    Err(e) => {
                        self.perf_stats.on_layout_error();
                        log::error!("Layout rejected: {}", e);
                        return;
                    }
                };
                self.perf_stats.on_layout();

                let state = tab_strip::TabStripState {
                    labels: self.strip.labels(),
                    rects: &rects,
                    current_index: self.strip.current_index(),
                };
                let clicked = tab_strip::render(ui, &self.config.tabs, &state, strip_rect);

                if let Some(idx) = clicked {
                    self.select_tab(idx);
                }

                ui.add_space(8.0);
                let current = self
                    .strip
                    .labels()
                    .get(self.strip.current_index())
                    .map(String::as_str)
                    .unwrap_or("-");
                ui.label(
                    egui::RichText::new(format!(
                        "{} tabs | current: {} | offset {:.0}/{:.0}",
                        self.strip.labels().len(),
                        current,
                        self.strip.scroll_offset(),
                        (self.strip.total_width() - self.strip.container_width()).max(0.0),
                    ))
                    .size(12.0)
                    .color(egui::Color32::GRAY),
                );
            });

        self.perf_stats.maybe_log(self.config.perf_log_interval);
    }
}
