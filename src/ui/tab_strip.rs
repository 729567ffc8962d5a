use crate::config::TabsConfig;
use crate::util::layout::TabRect;
use eframe::egui;

const STRIP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 28);
const TAB_FILL: egui::Color32 = egui::Color32::from_rgb(48, 48, 56);
const TAB_FILL_HOVERED: egui::Color32 = egui::Color32::from_rgb(64, 64, 74);
const TAB_FILL_CURRENT: egui::Color32 = egui::Color32::from_rgb(70, 110, 170);
const TAB_BORDER: egui::Color32 = egui::Color32::from_rgb(90, 90, 100);
const TAB_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 220, 225);
const TEXT_INSET: f32 = 8.0;

pub struct TabStripState<'a> {
    pub labels: &'a [String],
    pub rects: &'a [TabRect],
    pub current_index: usize,
}

/// Reserve the strip's container rect. Its width is the layout's container width.
pub fn allocate(ui: &mut egui::Ui, height: f32) -> egui::Rect {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    rect
}

/// Returns the index of the tab that was clicked, if any
pub fn render(
    ui: &mut egui::Ui,
    config: &TabsConfig,
    state: &TabStripState<'_>,
    strip_rect: egui::Rect,
) -> Option<usize> {
    let painter = ui.painter_at(strip_rect);
    painter.rect_filled(strip_rect, 0.0, STRIP_BACKGROUND);

    let container_width = strip_rect.width();
    let mut clicked_index = None;

    for (idx, (label, tab)) in state.labels.iter().zip(state.rects).enumerate() {
        // Fully folded tabs are parked just outside the container
        if tab.right() <= 0.0 || tab.left >= container_width {
            continue;
        }

        let rect = egui::Rect::from_min_size(
            egui::pos2(strip_rect.left() + tab.left, strip_rect.top()),
            egui::vec2(tab.width, strip_rect.height()),
        );
        let visible = rect.intersect(strip_rect);

        let response = ui.interact(visible, ui.id().with(("tab", idx)), egui::Sense::click());

        let fill = if idx == state.current_index {
            TAB_FILL_CURRENT
        } else if response.hovered() {
            TAB_FILL_HOVERED
        } else {
            TAB_FILL
        };

        painter.rect_filled(rect, 2.0, fill);
        painter.rect_stroke(
            rect,
            2.0,
            egui::Stroke::new(1.0, TAB_BORDER),
            egui::StrokeKind::Inside,
        );

        // Folded tabs clip their label to whatever sliver is left
        painter.with_clip_rect(visible).text(
            rect.left_center() + egui::vec2(TEXT_INSET, 0.0),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(config.font_size),
            TAB_TEXT,
        );

        if response.clicked() {
            clicked_index = Some(idx);
        }
        response.on_hover_text(label);
    }

    clicked_index
}
