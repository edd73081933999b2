//! # Timeline Accessor
//!
//! Read-only view over the ordered frame sequence and round boundaries.
//! Both the economy pipeline and the AFK tracker slice their round windows
//! through this; neither touches the raw frame vector directly.

use crate::models::{Frame, GameEvent, MatchTimeline, Round};

/// Resolved tick boundaries for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundWindow {
    pub start_tick: u32,
    pub freeze_end_tick: u32,
    pub end_tick: u32,
}

impl RoundWindow {
    pub fn duration_ticks(&self) -> u32 {
        self.end_tick.saturating_sub(self.start_tick)
    }
}

/// Borrowing accessor over a materialized timeline.
pub struct TimelineView<'a> {
    timeline: &'a MatchTimeline,
}

impl<'a> TimelineView<'a> {
    pub fn new(timeline: &'a MatchTimeline) -> Self {
        Self { timeline }
    }

    pub fn tick_rate(&self) -> f64 {
        self.timeline.tick_rate
    }

    pub fn rounds(&self) -> &'a [Round] {
        &self.timeline.rounds
    }

    /// Seconds expressed in ticks, rounded to the nearest tick.
    pub fn ticks(&self, secs: f64) -> u32 {
        (secs * self.timeline.tick_rate).round().max(0.0) as u32
    }

    /// Elapsed seconds between two ticks (saturating below zero).
    pub fn secs_between(&self, from_tick: u32, to_tick: u32) -> f64 {
        to_tick.saturating_sub(from_tick) as f64 / self.timeline.tick_rate
    }

    /// Frames with tick in `[start_tick, end_tick]`, by binary search.
    pub fn frames_between(&self, start_tick: u32, end_tick: u32) -> &'a [Frame] {
        let frames = &self.timeline.frames;
        let lo = frames.partition_point(|f| f.tick < start_tick);
        let hi = frames.partition_point(|f| f.tick <= end_tick);
        &frames[lo..hi.max(lo)]
    }

    /// First frame at or after `tick`, but no later than `tick + window_ticks`.
    ///
    /// Returns `None` when no frame falls inside the window; callers treat
    /// the sample as absent rather than fabricating one.
    pub fn first_frame_at_or_after(&self, tick: u32, window_ticks: u32) -> Option<&'a Frame> {
        let upper = tick.saturating_add(window_ticks);
        self.frames_between(tick, upper).first()
    }

    /// Events of all frames with tick in `[start_tick, end_tick]`.
    pub fn events_between(
        &self,
        start_tick: u32,
        end_tick: u32,
    ) -> impl Iterator<Item = &'a GameEvent> {
        self.frames_between(start_tick, end_tick).iter().flat_map(|f| f.events.iter())
    }

    /// Resolve a round's tick window.
    ///
    /// Freeze end defaults to the start tick; an open round is closed at
    /// the last frame. Returns `None` for a structurally invalid round
    /// (nothing recorded at or after its start, or end before start) —
    /// the caller skips such rounds instead of aborting the match.
    pub fn resolve_round_window(&self, round: &Round) -> Option<RoundWindow> {
        let last_tick = self.timeline.last_tick()?;
        if last_tick < round.start_tick {
            return None;
        }
        let end_tick = round.end_or(last_tick).min(last_tick);
        if end_tick < round.start_tick {
            return None;
        }
        let freeze_end_tick = round.freeze_end().min(end_tick);
        Some(RoundWindow { start_tick: round.start_tick, freeze_end_tick, end_tick })
    }
}
