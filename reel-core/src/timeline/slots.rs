use crate::foundation::core::{FrameIndex, FrameRange};

/// Hands out back-to-back reveal windows: `duration` frames each, `gap` frames apart.
///
/// A cursor lives for one allocation pass. It is rebuilt from scratch whenever its inputs
/// change and is never shared between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotCursor {
    cursor: u64,
    duration: u64,
    gap: u64,
}

impl SlotCursor {
    /// Start allocating at `start`.
    pub fn new(start: u64, duration: u64, gap: u64) -> Self {
        Self {
            cursor: start,
            duration,
            gap,
        }
    }

    /// Frame the next slot will start at.
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Take the next window and advance past it and the gap.
    pub fn next_slot(&mut self) -> FrameRange {
        let start = self.cursor;
        let end = start.saturating_add(self.duration);
        self.cursor = end.saturating_add(self.gap);
        FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(end),
        }
    }

    /// Take `n` consecutive windows.
    pub fn take_slots(&mut self, n: usize) -> Vec<FrameRange> {
        (0..n).map(|_| self.next_slot()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/slots.rs"]
mod tests;
