//! Highlight segmentation: split paragraphs into plain and highlighted runs and give every
//! highlighted run its own reveal window.
//!
//! The pass is:
//!
//! 1. normalize phrases (trim, lowercase, drop empties),
//! 2. scan each phrase left to right without self-overlap,
//! 3. sort all matches and merge overlapping or touching ranges,
//! 4. emit segments that cover the paragraph exactly once,
//! 5. hand out reveal windows with one cursor shared by every paragraph.

use crate::{
    animation::interpolate::{InterpolateOptions, map_range},
    foundation::core::{Fps, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::slots::SlotCursor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
/// Byte range `[start, end)` into a paragraph, always on char boundaries.
pub struct MatchRange {
    /// First byte of the match.
    pub start: usize,
    /// One past the last byte of the match.
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One run of paragraph text.
pub struct TextSegment {
    /// Original text, casing preserved.
    pub text: String,
    /// Whether this run is a highlight span.
    pub highlighted: bool,
    /// Reveal window `[start_frame, end_frame)`; only highlighted runs carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<FrameRange>,
}

impl TextSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            highlighted: false,
            window: None,
        }
    }

    /// Reveal progress in `[0, 1]` at `frame`; plain runs report 0.
    pub fn reveal_progress(&self, frame: i64) -> f64 {
        self.window.map_or(0.0, |w| reveal_progress(w, frame))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Reveal pacing for highlight spans, in frames.
pub struct HighlightTiming {
    /// Length of each reveal window.
    pub duration_frames: u64,
    /// Pause between consecutive windows.
    pub gap_frames: u64,
    /// Frame the first window starts at.
    pub initial_delay_frames: u64,
}

impl HighlightTiming {
    /// Default pacing: 0.8 s reveals, 0.2 s gaps, 0.4 s initial delay.
    pub fn for_fps(fps: Fps) -> Self {
        Self {
            duration_frames: fps.secs_to_frames_round(0.8).max(1),
            gap_frames: fps.secs_to_frames_round(0.2).max(1),
            initial_delay_frames: fps.secs_to_frames_round(0.4),
        }
    }

    fn cursor(self) -> SlotCursor {
        SlotCursor::new(
            self.initial_delay_frames,
            self.duration_frames,
            self.gap_frames,
        )
    }
}

/// Trim and lowercase phrases, dropping the ones that end up empty.
///
/// Folding is per char, the same way paragraphs are folded before scanning.
pub fn normalize_phrases<S: AsRef<str>>(phrases: &[S]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| fold_case(p.as_ref().trim()))
        .filter(|p| !p.is_empty())
        .collect()
}

fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Lowercased text plus a byte map back to the original.
///
/// Lowercasing can change byte lengths (and even char counts), so every folded byte records the
/// byte span of the original char it came from.
struct Folded {
    text: String,
    origin: Vec<(usize, usize)>,
}

impl Folded {
    fn new(src: &str) -> Self {
        let mut text = String::with_capacity(src.len());
        let mut origin = Vec::with_capacity(src.len());
        for (at, ch) in src.char_indices() {
            let span = (at, at + ch.len_utf8());
            for lc in ch.to_lowercase() {
                text.push(lc);
                origin.extend(std::iter::repeat_n(span, lc.len_utf8()));
            }
        }
        Self { text, origin }
    }

    /// Widen a folded byte range to whole original chars.
    fn to_original(&self, start: usize, end: usize) -> MatchRange {
        MatchRange {
            start: self.origin[start].0,
            end: self.origin[end - 1].1,
        }
    }
}

/// All case-insensitive occurrences of already-normalized `phrases` in `paragraph`.
///
/// Each phrase is scanned independently; its own occurrences never overlap because the search
/// resumes at the end of every match. Ranges from different phrases may overlap. The result is
/// sorted by `(start, end)`.
pub fn find_matches<S: AsRef<str>>(paragraph: &str, phrases: &[S]) -> Vec<MatchRange> {
    let folded = Folded::new(paragraph);
    let mut out = Vec::new();
    for phrase in phrases {
        let phrase = phrase.as_ref();
        if phrase.is_empty() {
            continue;
        }
        let mut from = 0;
        while let Some(rel) = folded.text[from..].find(phrase) {
            let start = from + rel;
            let end = start + phrase.len();
            out.push(folded.to_original(start, end));
            from = end;
        }
    }
    out.sort_unstable();
    out
}

/// Merge sorted ranges; a range starting at or before the current end extends it.
pub fn merge_ranges(mut ranges: Vec<MatchRange>) -> Vec<MatchRange> {
    ranges.sort_unstable();
    let mut merged: Vec<MatchRange> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

/// Split `paragraph` into plain and highlighted runs along merged, sorted `ranges`.
///
/// Highlighted runs come back without a window; see [`segment_paragraphs`] for timing.
///
/// Fails with [`ReelError::Config`] when a range is empty or inverted, runs past the paragraph,
/// splits a char, or overlaps or precedes the range before it. [`merge_ranges`] output always
/// passes.
pub fn emit_segments(paragraph: &str, ranges: &[MatchRange]) -> ReelResult<Vec<TextSegment>> {
    let mut prev_end = 0;
    for (i, r) in ranges.iter().enumerate() {
        if r.start >= r.end {
            return Err(ReelError::config(format!(
                "highlight range {i} is empty or inverted ({}..{})",
                r.start, r.end
            )));
        }
        if r.end > paragraph.len() {
            return Err(ReelError::config(format!(
                "highlight range {i} ends at byte {} past the paragraph length {}",
                r.end,
                paragraph.len()
            )));
        }
        if !paragraph.is_char_boundary(r.start) || !paragraph.is_char_boundary(r.end) {
            return Err(ReelError::config(format!(
                "highlight range {i} ({}..{}) splits a character",
                r.start, r.end
            )));
        }
        if r.start < prev_end {
            return Err(ReelError::config(format!(
                "highlight range {i} starts at {} before the previous range ends at {prev_end}",
                r.start
            )));
        }
        prev_end = r.end;
    }
    Ok(emit_checked(paragraph, ranges))
}

fn emit_checked(paragraph: &str, ranges: &[MatchRange]) -> Vec<TextSegment> {
    let mut out = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for r in ranges {
        if cursor < r.start {
            out.push(TextSegment::plain(&paragraph[cursor..r.start]));
        }
        out.push(TextSegment {
            text: paragraph[r.start..r.end].to_owned(),
            highlighted: true,
            window: None,
        });
        cursor = r.end;
    }
    if cursor < paragraph.len() {
        out.push(TextSegment::plain(&paragraph[cursor..]));
    }
    out
}

/// Segment every paragraph and assign sequential, non-overlapping reveal windows.
///
/// Windows run across paragraphs in input order and left to right inside each paragraph.
/// Paragraphs without matches become a single plain segment and consume no time.
pub fn segment_paragraphs<P, H>(
    paragraphs: &[P],
    phrases: &[H],
    timing: HighlightTiming,
) -> Vec<Vec<TextSegment>>
where
    P: AsRef<str>,
    H: AsRef<str>,
{
    let phrases = normalize_phrases(phrases);
    let mut slots = timing.cursor();

    let out: Vec<Vec<TextSegment>> = paragraphs
        .iter()
        .map(|p| {
            let p = p.as_ref();
            let ranges = merge_ranges(find_matches(p, &phrases));
            let mut segments = emit_checked(p, &ranges);
            for seg in segments.iter_mut().filter(|s| s.highlighted) {
                seg.window = Some(slots.next_slot());
            }
            segments
        })
        .collect();

    tracing::debug!(
        paragraphs = paragraphs.len(),
        phrases = phrases.len(),
        last_frame = slots.position(),
        "segmented highlight paragraphs"
    );
    out
}

/// Reveal progress of `window` at `frame`, clamped to `[0, 1]`.
pub fn reveal_progress(window: FrameRange, frame: i64) -> f64 {
    map_range(
        frame as f64,
        [window.start.0 as f64, window.end.0 as f64],
        [0.0, 1.0],
        InterpolateOptions::clamp(),
    )
}

/// Progress as a whole percentage, e.g. for a growing background width.
pub fn reveal_percent(progress: f64) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/text/highlight.rs"]
mod tests;
