//! Reel computes deterministic, per-frame motion state for parametrized video scenes.
//!
//! Every value is a pure function of the frame number, the frame rate and the scene inputs.
//! Nothing is integrated step by step and nothing is cached between frames, so any frame can be
//! evaluated on its own, out of order, or on several threads at once.
//!
//! # Layers
//!
//! 1. **Animation math**: [`interpolate`] for range mapping, [`spring`] for damped progress
//!    curves, and helpers such as [`fade_in`], [`slide_in`] or [`typewriter`] on top.
//! 2. **Highlight segmentation**: [`segment_paragraphs`] splits paragraphs into plain and
//!    highlighted runs and gives each highlight its own reveal window.
//! 3. **Scenes**: a [`SceneFile`] (JSON) is built into a [`Scene`] that answers
//!    [`Scene::eval_frame`] with a serializable [`FrameState`].
//! 4. **Batch evaluation**: [`eval_frames`] walks a frame range sequentially or on a rayon pool.
//!
//! Drawing pixels and encoding video are left to the host.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod scene;
mod text;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOptions, Interpolation, interpolate};
pub use animation::primitives::{
    Direction, Style, counter, fade_in, fade_out, pulse, rotate, scale_in, slide_in, typewriter,
    typewriter_len,
};
pub use animation::spring::{
    DEFAULT_SETTLE_THRESHOLD, SpringConfig, SpringOptions, measure_spring, spring, spring_with,
};
pub use eval::pipeline::{EvalThreading, FrameSource, eval_frames};
pub use foundation::core::{Affine, Fps, FrameIndex, FrameRange, Transform2D, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use scene::highlight::{HighlightFrame, SegmentFrame, TextHighlightProps, TextHighlightScene};
pub use scene::list::{
    ListFrame, ListItemFrame, MAX_ITEM_CHARS, MAX_LIST_ITEMS, MAX_TITLE_CHARS, TextListProps,
    TextListScene,
};
pub use scene::model::{FrameState, Scene, SceneFile, SceneKind, SceneProps};
pub use scene::theme::{HighlightTheme, HighlightThemeKey, ListSpacing, ListTheme, ListThemeKey};
pub use text::highlight::{
    HighlightTiming, MatchRange, TextSegment, emit_segments, find_matches, merge_ranges,
    normalize_phrases, reveal_percent, reveal_progress, segment_paragraphs,
};
pub use timeline::node::{NodeTime, TimelineNode};
pub use timeline::slots::SlotCursor;
