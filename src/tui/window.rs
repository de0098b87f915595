//! Virtual window math for the horizontal list
//!
//! Only the items within a fixed radius of the focused index are painted.
//! Leading and trailing gaps stand in for the skipped items so the strip
//! keeps its full scrollable width and offset math.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Materialized sub-range of a list, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VirtualWindow {
    /// First materialized index (inclusive)
    pub start_index: usize,
    /// Last materialized index (inclusive)
    pub end_index: usize,
    /// Width standing in for items before `start_index`
    pub leading_gap: usize,
    /// Width standing in for items after `end_index`
    pub trailing_gap: usize,
}

impl VirtualWindow {
    /// Window of `radius` items either side of `focused_index`.
    ///
    /// `stride` is one item's width plus the gap after it. Returns `None`
    /// for an empty list. A focused index past the end is clamped to the
    /// last item for the purpose of windowing.
    pub fn compute(
        focused_index: usize,
        item_count: usize,
        radius: usize,
        stride: usize,
    ) -> Option<Self> {
        if item_count == 0 {
            return None;
        }

        let last = item_count - 1;
        let focused = focused_index.min(last);
        let start_index = focused.saturating_sub(radius);
        let end_index = focused.saturating_add(radius).min(last);

        Some(Self {
            start_index,
            end_index,
            leading_gap: start_index * stride,
            trailing_gap: (last - end_index) * stride,
        })
    }

    /// Number of materialized items
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    /// The window's slice of `items`
    pub fn items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = (self.end_index + 1).min(items.len());
        let start = self.start_index.min(end);
        &items[start..end]
    }
}

/// Horizontal translation that anchors `focused_index` at the strip origin
pub fn strip_offset(focused_index: usize, stride: usize) -> i64 {
    let distance = i64::try_from(focused_index.saturating_mul(stride)).unwrap_or(i64::MAX);
    -distance
}

/// Ease-out animation between two strip offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    started: Option<Instant>,
    duration: Duration,
}

impl Transition {
    /// A transition resting at `offset`
    pub fn settled(offset: i64, duration: Duration) -> Self {
        let offset = offset as f64;
        Self {
            from: offset,
            to: offset,
            started: None,
            duration,
        }
    }

    /// Start moving toward `target` from wherever the animation is at `now`
    pub fn retarget(&mut self, target: i64, now: Instant) {
        let target = target as f64;
        if (target - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started = if self.duration.is_zero() { None } else { Some(now) };
    }

    pub fn target(&self) -> i64 {
        self.to.round() as i64
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }

    /// Eased offset at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out(t)
    }

    /// Eased offset rounded to whole terminal columns
    pub fn offset_at(&self, now: Instant) -> i64 {
        self.value_at(now).round() as i64
    }
}

/// Cubic ease-out over `t` in `[0, 1]`
fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
