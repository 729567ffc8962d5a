/// Pure layout and scroll math for the folding tab strip.
///
/// These functions have no dependencies on application state and are easily unit tested.
/// All values are pixels.

use serde::Serialize;
use thiserror::Error;

/// Fraction of the tab width a fully folded tab keeps
pub const DEFAULT_FOLD_FACTOR: f32 = 0.1;

/// Number of tabs past the visibility boundary that compress before hitting the floor
pub const DEFAULT_MAX_FOLD_STEPS: usize = 4;

/// Rejected layout input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

fn invalid(name: &'static str, value: f32, reason: &'static str) -> LayoutError {
    LayoutError::InvalidParameter {
        name,
        value,
        reason,
    }
}

/// Horizontal placement of a single tab, relative to the container's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TabRect {
    pub left: f32,
    pub width: f32,
}

impl TabRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Constructor-time folding constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldParams {
    /// Width of an unfolded tab
    pub tab_width: f32,
    /// Floor width of a folded tab
    pub fold_width: f32,
    /// Tabs eligible for partial compression on each side
    pub max_fold_steps: usize,
}

impl FoldParams {
    /// Build parameters with `fold_width = tab_width * fold_factor`.
    pub fn new(tab_width: f32, fold_factor: f32, max_fold_steps: usize) -> Result<Self, LayoutError> {
        check_tab_width(tab_width)?;
        if !fold_factor.is_finite() || fold_factor <= 0.0 || fold_factor >= 1.0 {
            return Err(invalid("fold_factor", fold_factor, "must be between 0 and 1 exclusive"));
        }
        Ok(Self {
            tab_width,
            fold_width: tab_width * fold_factor,
            max_fold_steps,
        })
    }

    pub fn total_width(&self, tab_count: usize) -> f32 {
        total_width(tab_count, self.tab_width)
    }

    /// Compute the folded layout for `tab_count` tabs.
    pub fn layout(
        &self,
        tab_count: usize,
        scroll_offset: f32,
        container_width: f32,
    ) -> Result<Vec<TabRect>, LayoutError> {
        compute_layout(
            tab_count,
            self.tab_width,
            self.fold_width,
            self.max_fold_steps,
            scroll_offset,
            container_width,
        )
    }
}

fn check_tab_width(tab_width: f32) -> Result<(), LayoutError> {
    if !tab_width.is_finite() || tab_width <= 0.0 {
        return Err(invalid("tab_width", tab_width, "must be a positive number"));
    }
    Ok(())
}

/// Validate a container width reported by the host.
pub fn check_container_width(container_width: f32) -> Result<(), LayoutError> {
    if !container_width.is_finite() || container_width < 0.0 {
        return Err(invalid(
            "container_width",
            container_width,
            "must be a non-negative number",
        ));
    }
    Ok(())
}

/// Total content width of an unfolded strip.
pub fn total_width(tab_count: usize, tab_width: f32) -> f32 {
    tab_count as f32 * tab_width
}

/// Clamp a requested scroll offset into `[0, total_width - container_width]`.
///
/// When the content fits inside the container the only valid offset is 0.
pub fn clamp_offset(requested: f32, total_width: f32, container_width: f32) -> f32 {
    requested.min(total_width - container_width).max(0.0)
}

/// Pick the scroll amount from a two-axis wheel delta.
///
/// Horizontal movement wins; vertical wheels still scroll the strip.
pub fn wheel_scroll_amount(delta_x: f32, delta_y: f32) -> f32 {
    if delta_x != 0.0 {
        delta_x
    } else {
        delta_y
    }
}

/// Calculate the scroll offset that brings the tab at `index` fully into view.
///
/// Both edges are tested against `current_offset`; if the tab is wider than the
/// container, aligning the right edge wins.
pub fn reveal_offset(
    index: usize,
    tab_width: f32,
    current_offset: f32,
    container_width: f32,
    total_width: f32,
) -> f32 {
    let tab_left = index as f32 * tab_width;
    let tab_right = tab_left + tab_width;

    let mut target = current_offset;

    // Left edge scrolled off to the left
    if tab_left < current_offset {
        target = tab_left;
    }
    // Right edge past the container
    if tab_right - current_offset > container_width {
        target = tab_right - container_width;
    }

    clamp_offset(target, total_width, container_width)
}

/// Compute one rectangle per tab for the given scroll position.
///
/// Tabs inside the visible band keep `tab_width` at `index * tab_width - scroll_offset`.
/// Tabs that scroll past an edge are packed into a stack against that edge: up to
/// `max_fold_steps` of them keep a partial width that closes the gap to their
/// unfolded position, the rest sit at `fold_width` just outside the container.
///
/// `scroll_offset` is clamped before any index math.
pub fn compute_layout(
    tab_count: usize,
    tab_width: f32,
    fold_width: f32,
    max_fold_steps: usize,
    scroll_offset: f32,
    container_width: f32,
) -> Result<Vec<TabRect>, LayoutError> {
    check_tab_width(tab_width)?;
    if !fold_width.is_finite() || fold_width <= 0.0 || fold_width > tab_width {
        return Err(invalid(
            "fold_width",
            fold_width,
            "must be positive and no larger than tab_width",
        ));
    }
    check_container_width(container_width)?;
    if !scroll_offset.is_finite() {
        return Err(invalid("scroll_offset", scroll_offset, "must be finite"));
    }

    if tab_count == 0 {
        return Ok(Vec::new());
    }

    let total = total_width(tab_count, tab_width);
    let offset = clamp_offset(scroll_offset, total, container_width);
    let last = tab_count as isize - 1;
    let steps = isize::try_from(max_fold_steps).unwrap_or(isize::MAX);

    let before_end = (offset / tab_width).floor() as isize;
    let before_start = before_end.saturating_sub(steps).max(0);

    let after_end = last.saturating_sub(((total - container_width - offset) / tab_width).floor() as isize);
    let after_start = after_end.saturating_add(steps).min(last);

    let mut rects: Vec<TabRect> = (0..tab_count)
        .map(|index| {
            let i = index as isize;
            if i < before_start {
                TabRect {
                    left: -fold_width,
                    width: fold_width,
                }
            } else if i > after_start {
                TabRect {
                    left: container_width,
                    width: fold_width,
                }
            } else {
                TabRect {
                    left: index as f32 * tab_width - offset,
                    width: tab_width,
                }
            }
        })
        .collect();

    // Left stack: pack from the container's left edge until a tab no longer needs folding.
    let mut cursor = 0.0;
    for i in before_start..=last {
        let index = i as usize;
        let width = if i < before_end {
            fold_width
        } else {
            fold_width.max(rects[index].left + tab_width - cursor)
        };

        if width >= tab_width {
            break;
        }

        rects[index] = TabRect {
            left: cursor,
            width,
        };
        cursor += width;
    }

    // Right stack: cursor is the distance already consumed from the right edge.
    let mut cursor = 0.0;
    for i in (0..=after_start).rev() {
        let index = i as usize;
        let width = if i > after_end {
            fold_width
        } else {
            fold_width.max(container_width - cursor - rects[index].left)
        };

        if width >= tab_width {
            break;
        }

        rects[index] = TabRect {
            left: container_width - cursor - width,
            width,
        };
        cursor += width;
    }

    Ok(rects)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.001;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn assert_rects(actual: &[TabRect], expected: &[(f32, f32)]) {
        assert_eq!(actual.len(), expected.len(), "rect count: {:?}", actual);
        for (i, (rect, &(left, width))) in actual.iter().zip(expected).enumerate() {
            assert!(
                approx(rect.left, left) && approx(rect.width, width),
                "tab {}: expected ({}, {}), got ({}, {})",
                i,
                left,
                width,
                rect.left,
                rect.width
            );
        }
    }

    fn ten_tabs(offset: f32) -> Vec<TabRect> {
        compute_layout(10, 100.0, 10.0, 4, offset, 500.0).unwrap()
    }

    fn is_hidden(rect: &TabRect, container_width: f32) -> bool {
        rect.left < 0.0 || rect.left >= container_width
    }

    #[test]
    fn compute_layout_empty() {
        let rects = compute_layout(0, 100.0, 10.0, 4, 0.0, 500.0).unwrap();
        assert!(rects.is_empty());
    }

    #[test]
    fn compute_layout_single_tab() {
        let rects = compute_layout(1, 100.0, 10.0, 4, 0.0, 500.0).unwrap();
        assert_rects(&rects, &[(0.0, 100.0)]);
    }

    #[test]
    fn content_fits_container_no_folding() {
        // 3 tabs, 300px of content in a 1000px container
        let rects = compute_layout(3, 100.0, 10.0, 4, 0.0, 1000.0).unwrap();
        assert_rects(&rects, &[(0.0, 100.0), (100.0, 100.0), (200.0, 100.0)]);
    }

    #[test]
    fn content_fits_container_forces_zero_offset() {
        let rects = compute_layout(3, 100.0, 10.0, 4, 250.0, 1000.0).unwrap();
        assert_rects(&rects, &[(0.0, 100.0), (100.0, 100.0), (200.0, 100.0)]);
    }

    #[test]
    fn content_exactly_fills_container() {
        let rects = compute_layout(5, 100.0, 10.0, 4, 0.0, 500.0).unwrap();
        for (i, rect) in rects.iter().enumerate() {
            assert!(approx(rect.left, i as f32 * 100.0));
            assert!(approx(rect.width, 100.0));
        }
    }

    #[test]
    fn full_visibility_for_wider_containers() {
        for count in 0..12 {
            for container in [count as f32 * 100.0, count as f32 * 100.0 + 1.0, 1250.0, 5000.0] {
                if container < count as f32 * 100.0 {
                    continue;
                }
                let rects = compute_layout(count, 100.0, 10.0, 4, 0.0, container).unwrap();
                assert_eq!(rects.len(), count);
                for (i, rect) in rects.iter().enumerate() {
                    assert_eq!(rect.width, 100.0, "count={} container={}", count, container);
                    assert_eq!(rect.left, i as f32 * 100.0, "count={} container={}", count, container);
                }
            }
        }
    }

    #[test]
    fn unscrolled_overflow_folds_right_side_only() {
        let rects = ten_tabs(0.0);
        assert_rects(
            &rects,
            &[
                (0.0, 100.0),
                (100.0, 100.0),
                (200.0, 100.0),
                (300.0, 100.0),
                (400.0, 60.0),
                (460.0, 10.0),
                (470.0, 10.0),
                (480.0, 10.0),
                (490.0, 10.0),
                (500.0, 10.0),
            ],
        );
    }

    #[test]
    fn mid_scroll_folds_both_sides() {
        // before_end = 2, before_start = 0; after_end = 7, after_start = 9
        let rects = ten_tabs(250.0);
        assert_rects(
            &rects,
            &[
                (0.0, 10.0),
                (10.0, 10.0),
                (20.0, 30.0),
                (50.0, 100.0),
                (150.0, 100.0),
                (250.0, 100.0),
                (350.0, 100.0),
                (450.0, 30.0),
                (480.0, 10.0),
                (490.0, 10.0),
            ],
        );
    }

    #[test]
    fn visible_band_keeps_scrolled_positions() {
        let rects = ten_tabs(250.0);
        for i in 3..=6 {
            assert!(approx(rects[i].left, i as f32 * 100.0 - 250.0));
            assert!(approx(rects[i].width, 100.0));
        }
    }

    #[test]
    fn partial_scroll_compresses_first_tab() {
        let rects = ten_tabs(30.0);
        assert!(approx(rects[0].left, 0.0));
        assert!(approx(rects[0].width, 70.0));
        assert!(approx(rects[1].left, 70.0));
        assert!(approx(rects[1].width, 100.0));
    }

    #[test]
    fn fully_scrolled_hides_tabs_beyond_fold_steps() {
        // before_end = 5, before_start = 1: tab 0 sits just off the left edge
        let rects = ten_tabs(500.0);
        assert_rects(
            &rects,
            &[
                (-10.0, 10.0),
                (0.0, 10.0),
                (10.0, 10.0),
                (20.0, 10.0),
                (30.0, 10.0),
                (40.0, 60.0),
                (100.0, 100.0),
                (200.0, 100.0),
                (300.0, 100.0),
                (400.0, 100.0),
            ],
        );
    }

    #[test]
    fn offset_past_end_is_clamped() {
        assert_eq!(ten_tabs(10_000.0), ten_tabs(500.0));
    }

    #[test]
    fn negative_offset_is_clamped() {
        assert_eq!(ten_tabs(-300.0), ten_tabs(0.0));
    }

    #[test]
    fn zero_fold_steps_only_floors() {
        let rects = compute_layout(10, 100.0, 10.0, 0, 250.0, 500.0).unwrap();
        // Tabs 0 and 1 sit off the left edge; tab 2 absorbs the gap
        assert!(approx(rects[0].left, -10.0));
        assert!(approx(rects[1].left, -10.0));
        assert!(approx(rects[2].left, 0.0));
        assert!(approx(rects[2].width, 50.0));
    }

    #[test]
    fn huge_container_does_not_overflow_index_math() {
        let rects = compute_layout(3, 100.0, 10.0, 4, 0.0, 1.0e30).unwrap();
        assert_rects(&rects, &[(0.0, 100.0), (100.0, 100.0), (200.0, 100.0)]);
    }

    #[test]
    fn zero_width_container_does_not_panic() {
        let rects = compute_layout(10, 100.0, 10.0, 4, 0.0, 0.0).unwrap();
        assert_eq!(rects.len(), 10);
        for rect in &rects {
            assert!(rect.width >= 10.0 - EPS);
        }
    }

    #[test]
    fn widths_never_below_fold_width() {
        for container in [0.0, 150.0, 500.0, 730.0] {
            for step in 0..=120 {
                let offset = step as f32 * 10.0;
                let rects = compute_layout(12, 100.0, 10.0, 4, offset, container).unwrap();
                for rect in &rects {
                    assert!(rect.width >= 10.0 - EPS, "offset={} rect={:?}", offset, rect);
                    assert!(rect.width <= 100.0 + EPS);
                }
            }
        }
    }

    #[test]
    fn visible_tabs_are_packed_without_gaps() {
        for step in 0..=50 {
            let offset = step as f32 * 10.0;
            let rects = ten_tabs(offset);
            let visible: Vec<&TabRect> = rects.iter().filter(|r| !is_hidden(r, 500.0)).collect();

            assert!(approx(visible[0].left, 0.0), "offset={}", offset);
            for pair in visible.windows(2) {
                assert!(
                    approx(pair[0].right(), pair[1].left),
                    "offset={} gap between {:?} and {:?}",
                    offset,
                    pair[0],
                    pair[1]
                );
            }
            assert!(approx(visible[visible.len() - 1].right(), 500.0), "offset={}", offset);
        }
    }

    #[test]
    fn folded_widths_shrink_away_from_visible_band() {
        let rects = ten_tabs(250.0);
        assert!(rects[0].width <= rects[1].width);
        assert!(rects[1].width <= rects[2].width);
        assert!(rects[9].width <= rects[8].width);
        assert!(rects[8].width <= rects[7].width);
    }

    #[test]
    fn rejects_non_positive_tab_width() {
        assert!(matches!(
            compute_layout(3, 0.0, 10.0, 4, 0.0, 500.0),
            Err(LayoutError::InvalidParameter { name: "tab_width", .. })
        ));
        assert!(compute_layout(3, -5.0, 10.0, 4, 0.0, 500.0).is_err());
        assert!(compute_layout(3, f32::NAN, 10.0, 4, 0.0, 500.0).is_err());
    }

    #[test]
    fn rejects_negative_container_width() {
        assert!(matches!(
            compute_layout(3, 100.0, 10.0, 4, 0.0, -1.0),
            Err(LayoutError::InvalidParameter { name: "container_width", .. })
        ));
    }

    #[test]
    fn rejects_bad_fold_width() {
        assert!(compute_layout(3, 100.0, 0.0, 4, 0.0, 500.0).is_err());
        assert!(compute_layout(3, 100.0, 150.0, 4, 0.0, 500.0).is_err());
    }

    #[test]
    fn rejects_non_finite_offset() {
        assert!(compute_layout(3, 100.0, 10.0, 4, f32::INFINITY, 500.0).is_err());
    }

    #[test]
    fn error_message_names_parameter() {
        let err = compute_layout(3, -1.0, 10.0, 4, 0.0, 500.0).unwrap_err();
        assert!(err.to_string().contains("tab_width"));
    }

    #[test]
    fn fold_params_derive_fold_width() {
        let params = FoldParams::new(96.0, DEFAULT_FOLD_FACTOR, DEFAULT_MAX_FOLD_STEPS).unwrap();
        assert!(approx(params.fold_width, 9.6));
        assert_eq!(params.max_fold_steps, 4);
        assert!(approx(params.total_width(10), 960.0));
    }

    #[test]
    fn fold_params_reject_bad_factor() {
        assert!(FoldParams::new(100.0, 0.0, 4).is_err());
        assert!(FoldParams::new(100.0, 1.0, 4).is_err());
        assert!(FoldParams::new(100.0, f32::NAN, 4).is_err());
        assert!(FoldParams::new(0.0, 0.1, 4).is_err());
    }

    #[test]
    fn fold_params_layout_matches_free_function() {
        let params = FoldParams::new(100.0, 0.1, 4).unwrap();
        assert_eq!(params.layout(10, 250.0, 500.0).unwrap(), ten_tabs(250.0));
    }

    #[test]
    fn clamp_offset_in_range_is_noop() {
        assert_eq!(clamp_offset(120.0, 1000.0, 500.0), 120.0);
    }

    #[test]
    fn clamp_offset_past_end() {
        assert_eq!(clamp_offset(1000.0, 1000.0, 500.0), 500.0);
    }

    #[test]
    fn clamp_offset_negative() {
        assert_eq!(clamp_offset(-40.0, 1000.0, 500.0), 0.0);
    }

    #[test]
    fn clamp_offset_content_smaller_than_container() {
        assert_eq!(clamp_offset(80.0, 300.0, 1000.0), 0.0);
    }

    #[test]
    fn clamp_offset_is_idempotent() {
        let once = clamp_offset(730.0, 1000.0, 500.0);
        assert_eq!(clamp_offset(once, 1000.0, 500.0), once);
    }

    #[test]
    fn wheel_prefers_horizontal_axis() {
        assert_eq!(wheel_scroll_amount(12.0, 40.0), 12.0);
        assert_eq!(wheel_scroll_amount(0.0, 40.0), 40.0);
        assert_eq!(wheel_scroll_amount(0.0, 0.0), 0.0);
    }

    #[test]
    fn reveal_already_visible() {
        assert_eq!(reveal_offset(2, 100.0, 100.0, 500.0, 1000.0), 100.0);
    }

    #[test]
    fn reveal_off_left() {
        assert_eq!(reveal_offset(1, 100.0, 250.0, 500.0, 1000.0), 100.0);
    }

    #[test]
    fn reveal_off_right() {
        // Tab 7 spans 700..800; right edge aligns with the container
        assert_eq!(reveal_offset(7, 100.0, 0.0, 500.0, 1000.0), 300.0);
    }

    #[test]
    fn reveal_clamps_to_valid_range() {
        assert_eq!(reveal_offset(2, 100.0, 0.0, 1000.0, 300.0), 0.0);
    }

    #[test]
    fn reveal_tab_wider_than_container_aligns_right_edge() {
        // 100px tab in an 80px container, both edges outside the view
        assert_eq!(reveal_offset(3, 100.0, 310.0, 80.0, 1000.0), 320.0);
    }
}
