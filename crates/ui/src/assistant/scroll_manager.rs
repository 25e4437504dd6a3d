use gpui::{Bounds, Pixels, point, px};
use gpui_component::VirtualListScrollHandle;

/// Distance from the tail within which follow mode stays (or becomes) active.
const FOLLOW_RESUME_THRESHOLD: Pixels = px(20.);
/// Ignores sub-pixel jitter when classifying scroll movement.
const SCROLL_JITTER_EPSILON: f32 = 1.0;

/// Keeps the transcript pinned to its latest turn.
///
/// Follows the tail while the user stays near it, pauses when they scroll up
/// to read older turns, and resumes once they return near the bottom. An
/// explicit request (new turn appended, panel opened) always wins.
pub struct ScrollManager {
    handle: VirtualListScrollHandle,
    pending_scroll_to_latest: bool,
    follow_latest: bool,
    last_offset: Pixels,
    last_max_offset: Pixels,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            handle: VirtualListScrollHandle::new(),
            pending_scroll_to_latest: false,
            follow_latest: true,
            last_offset: Pixels::ZERO,
            last_max_offset: Pixels::ZERO,
        }
    }

    pub fn handle(&self) -> &VirtualListScrollHandle {
        &self.handle
    }

    pub fn viewport(&self) -> Bounds<Pixels> {
        self.handle.bounds()
    }

    /// Unconditionally schedules a scroll to the latest turn and re-enables
    /// follow mode. Used when the panel transitions closed -> open.
    pub fn request_scroll_to_latest(&mut self) {
        self.pending_scroll_to_latest = true;
        self.follow_latest = true;
    }

    /// Schedules a scroll only when the user has not scrolled away from the
    /// tail. Used when the transcript grows.
    pub fn request_scroll_if_following(&mut self) {
        if self.follow_latest || near_latest(self.last_offset, self.last_max_offset) {
            self.pending_scroll_to_latest = true;
        }
    }

    /// Reconciles follow mode with whatever scrolling happened since the last
    /// frame. Call once per render, before [`Self::apply_pending_scroll`].
    pub fn update_follow_state(&mut self) {
        let offset = self.handle.offset().y;
        let max_offset = self.handle.max_offset().height;

        let offset_delta = f32::from(offset) - f32::from(self.last_offset);
        let content_grew =
            (f32::from(max_offset) - f32::from(self.last_max_offset)).abs() > SCROLL_JITTER_EPSILON;
        let scrolled_up = offset_delta > SCROLL_JITTER_EPSILON && !content_grew;
        let scrolled_down = offset_delta < -SCROLL_JITTER_EPSILON && !content_grew;

        if self.pending_scroll_to_latest
            || (content_grew && near_latest(self.last_offset, self.last_max_offset))
        {
            self.follow_latest = true;
        } else if self.follow_latest {
            if scrolled_up {
                self.follow_latest = false;
            }
        } else if scrolled_down && near_latest(offset, max_offset) {
            self.follow_latest = true;
        }

        self.last_offset = offset;
        self.last_max_offset = max_offset;
    }

    /// Moves the scroll offset to the tail when a scroll is due. Returns
    /// whether a scroll was applied.
    pub fn apply_pending_scroll(&mut self) -> bool {
        let should_scroll = self.follow_latest || self.pending_scroll_to_latest;

        if should_scroll {
            let max_offset = self.handle.max_offset().height;
            let target_y = if max_offset > Pixels::ZERO {
                // GPUI scroll offsets grow negative toward the tail.
                -max_offset
            } else {
                Pixels::ZERO
            };
            self.handle.set_offset(point(self.handle.offset().x, target_y));
        }

        self.pending_scroll_to_latest = false;
        should_scroll
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `offset` sits within the resume threshold of the tail.
///
/// `offset + max_offset` approaches zero at the tail because offsets are
/// negative.
fn near_latest(offset: Pixels, max_offset: Pixels) -> bool {
    if max_offset <= Pixels::ZERO {
        return true;
    }

    (offset + max_offset).abs() <= FOLLOW_RESUME_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_always_counts_as_at_the_tail() {
        assert!(near_latest(Pixels::ZERO, Pixels::ZERO));
        assert!(near_latest(px(-40.), px(0.)));
    }

    #[test]
    fn near_latest_respects_the_resume_threshold() {
        assert!(near_latest(px(-490.), px(500.)));
        assert!(near_latest(px(-500.), px(500.)));
        assert!(!near_latest(px(-200.), px(500.)));
    }
}
