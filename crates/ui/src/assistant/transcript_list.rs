use std::ops::Range;
use std::rc::Rc;

use gpui::*;
use gpui_component::{ActiveTheme, label::Label, v_flex, v_virtual_list};

use crate::assistant::conversation::{Role, Turn};
use crate::assistant::scroll_manager::ScrollManager;

const DEFAULT_CONTENT_WIDTH: Pixels = px(332.);
const LIST_HORIZONTAL_PADDING: Pixels = px(12.);
const CONTENT_WIDTH_CHANGE_EPSILON: f32 = 1.0;
/// Bubbles take at most this share of the content width, mirroring the
/// deployed layout.
const BUBBLE_WIDTH_RATIO: f32 = 0.8;
const BUBBLE_PADDING_X: Pixels = px(12.);
const BUBBLE_PADDING_Y: Pixels = px(8.);
const ESTIMATED_TEXT_LINE_HEIGHT: Pixels = px(18.);
const ESTIMATED_CHAR_WIDTH: f32 = 7.0;

struct RowHeight {
    height: Pixels,
    measured: bool,
}

/// Renders the ordered transcript and keeps the view pinned to the latest
/// turn.
///
/// Rows are virtualized with estimated heights that get corrected by real
/// measurement for visible rows. The transcript is append-only, so cached
/// heights are keyed by row index and only invalidate when the list width
/// changes.
pub struct TranscriptList {
    turns: Vec<Turn>,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    row_heights: Vec<RowHeight>,
    scroll_manager: ScrollManager,
    content_width: Option<Pixels>,
}

impl TranscriptList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            turns: Vec::new(),
            item_sizes: Rc::new(Vec::new()),
            row_heights: Vec::new(),
            scroll_manager: ScrollManager::new(),
            content_width: None,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Replaces the rendered transcript. Growth schedules a scroll to the
    /// latest turn unless the user has scrolled away from the tail.
    pub fn set_turns(&mut self, turns: Vec<Turn>, cx: &mut Context<Self>) {
        let grew = turns.len() > self.turns.len();

        self.turns = turns;
        self.row_heights.truncate(self.turns.len());
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        for turn in &self.turns[self.row_heights.len()..] {
            self.row_heights.push(RowHeight {
                height: estimate_turn_height(turn, content_width),
                measured: false,
            });
        }
        self.rebuild_item_sizes();

        if grew {
            self.scroll_manager.request_scroll_if_following();
        }

        cx.notify();
    }

    /// Forces a scroll to the latest turn; used when the panel opens.
    pub fn scroll_to_latest(&mut self, cx: &mut Context<Self>) {
        self.scroll_manager.request_scroll_to_latest();
        cx.notify();
    }

    fn update_content_width(&mut self, cx: &mut Context<Self>) {
        let list_width = self.scroll_manager.viewport().size.width;
        if list_width <= Pixels::ZERO {
            return;
        }

        let next_width = max_px(px(1.), list_width - LIST_HORIZONTAL_PADDING * 2);
        let changed = self.content_width.is_none_or(|current| {
            (f32::from(current) - f32::from(next_width)).abs() > CONTENT_WIDTH_CHANGE_EPSILON
        });

        if changed {
            self.content_width = Some(next_width);
            for (row, turn) in self.row_heights.iter_mut().zip(&self.turns) {
                row.height = estimate_turn_height(turn, next_width);
                row.measured = false;
            }
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn rebuild_item_sizes(&mut self) {
        self.item_sizes = Rc::new(
            self.row_heights
                .iter()
                .map(|row| size(px(0.), row.height))
                .collect(),
        );
    }

    fn measure_visible_rows(
        &mut self,
        visible_range: Range<usize>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.turns.is_empty() {
            return;
        }

        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let available_space = size(
            AvailableSpace::Definite(content_width),
            AvailableSpace::MinContent,
        );
        let mut updated = false;

        for index in visible_range {
            let Some(turn) = self.turns.get(index).cloned() else {
                continue;
            };

            let mut row_element = self.render_turn_row(&turn, cx);
            let measured = row_element
                .layout_as_root(available_space, window, cx)
                .height;

            let Some(row) = self.row_heights.get_mut(index) else {
                continue;
            };
            if !row.measured || (f32::from(row.height) - f32::from(measured)).abs() > 0.5 {
                row.height = measured;
                updated = true;
            }
            row.measured = true;
        }

        if updated {
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn render_turn_row(&self, turn: &Turn, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let text = if turn.text.is_empty() {
            " ".to_string()
        } else {
            turn.text.clone()
        };

        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let bubble_max_width = max_px(px(40.), content_width * BUBBLE_WIDTH_RATIO);

        let (bubble_bg, bubble_fg) = match turn.role {
            Role::User => (theme.accent, theme.accent_foreground),
            Role::Assistant => (theme.muted, theme.foreground),
        };

        let row = v_flex().w_full();
        let row = match turn.role {
            Role::User => row.items_end(),
            Role::Assistant => row.items_start(),
        };

        row.child(
            div()
                .max_w(bubble_max_width)
                .px(BUBBLE_PADDING_X)
                .py(BUBBLE_PADDING_Y)
                .rounded_lg()
                .bg(bubble_bg)
                .text_color(bubble_fg)
                .child(Label::new(text).text_sm()),
        )
        .into_any_element()
    }
}

impl Render for TranscriptList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.update_content_width(cx);
        self.scroll_manager.update_follow_state();
        self.scroll_manager.apply_pending_scroll();

        v_flex().size_full().min_h_0().child(
            v_virtual_list(
                cx.entity().clone(),
                "assistant-transcript",
                self.item_sizes.clone(),
                |this, visible_range, window, cx| {
                    // Measure only visible rows so long transcripts keep
                    // O(visible) layout work.
                    this.update_content_width(cx);
                    this.measure_visible_rows(visible_range.clone(), window, cx);
                    visible_range
                        .filter_map(|index| {
                            this.turns
                                .get(index)
                                .cloned()
                                .map(|turn| this.render_turn_row(&turn, cx))
                        })
                        .collect::<Vec<_>>()
                },
            )
            .size_full()
            .px_3()
            .py_2()
            .gap_3()
            .track_scroll(self.scroll_manager.handle()),
        )
    }
}

fn estimate_turn_height(turn: &Turn, content_width: Pixels) -> Pixels {
    let bubble_width = max_px(px(40.), content_width * BUBBLE_WIDTH_RATIO);
    let text_width = max_px(px(1.), bubble_width - BUBBLE_PADDING_X * 2);
    estimate_text_height(&turn.text, text_width) + BUBBLE_PADDING_Y * 2
}

fn estimate_text_height(text: &str, width: Pixels) -> Pixels {
    if text.is_empty() {
        return ESTIMATED_TEXT_LINE_HEIGHT;
    }

    let chars_per_line = (f32::from(width) / ESTIMATED_CHAR_WIDTH).floor().max(1.0) as usize;

    let mut line_count = 0usize;
    for line in text.lines() {
        let char_count = line.chars().count().max(1);
        line_count += char_count.div_ceil(chars_per_line);
    }

    // A trailing newline displays as one extra empty line.
    if text.ends_with('\n') {
        line_count += 1;
    }

    ESTIMATED_TEXT_LINE_HEIGHT * line_count.max(1)
}

fn max_px(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) >= f32::from(b) { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_turn_estimates_a_positive_height() {
        let width = px(332.);
        let turns = [
            Turn::user("is this blight?"),
            Turn::assistant(""),
            Turn::assistant("Apply neem oil.\nRepeat weekly."),
        ];

        for turn in &turns {
            assert!(estimate_turn_height(turn, width) > Pixels::ZERO);
        }
    }

    #[test]
    fn multiline_turns_estimate_taller_than_single_lines() {
        let width = px(332.);
        let single = estimate_turn_height(&Turn::assistant("short"), width);
        let multi = estimate_turn_height(
            &Turn::assistant("first line\nsecond line\nthird line"),
            width,
        );

        assert!(multi > single);
    }

    #[test]
    fn long_text_wraps_in_the_estimate() {
        let width = px(200.);
        let long_line = "neem ".repeat(60);
        let wrapped = estimate_text_height(&long_line, width);

        assert!(wrapped > ESTIMATED_TEXT_LINE_HEIGHT);
    }

    #[test]
    fn trailing_newline_adds_one_line() {
        let width = px(200.);
        let without = estimate_text_height("water sparingly", width);
        let with = estimate_text_height("water sparingly\n", width);

        assert_eq!(with, without + ESTIMATED_TEXT_LINE_HEIGHT);
    }
}
