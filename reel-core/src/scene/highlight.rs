use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOptions, map_range},
    animation::spring::{SpringConfig, spring},
    foundation::core::Fps,
    foundation::error::ReelResult,
    scene::theme::{HighlightTheme, HighlightThemeKey},
    text::highlight::{HighlightTiming, TextSegment, reveal_percent, segment_paragraphs},
};

/// Slow, heavy spring driving the zoom of the paragraph container.
const CONTAINER_SPRING: SpringConfig = SpringConfig {
    damping: 500.0,
    stiffness: 20.0,
    mass: 20.0,
    overshoot_clamping: false,
};

const CONTAINER_SCALE: [f64; 2] = [1.0, 1.3];

/// Hold after the last reveal when the scene file does not pin a duration.
const TAIL_SECS: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Inputs of the text-highlight scene.
pub struct TextHighlightProps {
    /// Paragraphs in display order.
    pub paragraphs: Vec<String>,
    /// Phrases to highlight, matched case-insensitively.
    #[serde(rename = "highlightsText", default)]
    pub highlights: Vec<String>,
    /// Visual theme.
    #[serde(default)]
    pub theme: HighlightThemeKey,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One segment as it should be drawn on a given frame.
pub struct SegmentFrame {
    /// Original text.
    pub text: String,
    /// Whether the run is a highlight span.
    pub highlighted: bool,
    /// Width of the highlight fill, 0..=100. Always 0 for plain runs.
    pub reveal_percent: u8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Full visual state of the text-highlight scene at one frame.
pub struct HighlightFrame {
    /// Frame this state belongs to.
    pub frame: i64,
    /// Uniform scale of the paragraph container.
    pub scale: f64,
    /// Resolved theme.
    pub theme: HighlightTheme,
    /// Segments per paragraph.
    pub paragraphs: Vec<Vec<SegmentFrame>>,
}

/// Text-highlight scene: paragraphs whose phrases get a growing background one after another.
///
/// Segmentation and timing are computed once from the props; every frame is then a pure
/// function of the frame number.
#[derive(Clone, Debug)]
pub struct TextHighlightScene {
    props: TextHighlightProps,
    fps: Fps,
    timing: HighlightTiming,
    segments: Vec<Vec<TextSegment>>,
}

impl TextHighlightScene {
    /// Segment the paragraphs. Any paragraphs and phrases are accepted, including none.
    #[tracing::instrument(skip(props), fields(paragraphs = props.paragraphs.len()))]
    pub fn new(props: TextHighlightProps, fps: Fps) -> ReelResult<Self> {
        fps.validate()?;
        let timing = HighlightTiming::for_fps(fps);
        let segments = segment_paragraphs(&props.paragraphs, &props.highlights, timing);
        Ok(Self {
            props,
            fps,
            timing,
            segments,
        })
    }

    /// Props the scene was built from.
    pub fn props(&self) -> &TextHighlightProps {
        &self.props
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Reveal pacing derived from the frame rate.
    pub fn timing(&self) -> HighlightTiming {
        self.timing
    }

    /// Timed segments per paragraph.
    pub fn segments(&self) -> &[Vec<TextSegment>] {
        &self.segments
    }

    /// End of the last reveal window, or 0 when nothing is highlighted.
    pub fn reveal_end(&self) -> u64 {
        self.segments
            .iter()
            .flatten()
            .filter_map(|s| s.window)
            .map(|w| w.end.0)
            .max()
            .unwrap_or(0)
    }

    /// Length that shows every reveal and then holds for a second.
    pub fn natural_duration(&self) -> u64 {
        (self.reveal_end() + self.fps.secs_to_frames_round(TAIL_SECS)).max(1)
    }

    /// Container zoom at `frame`, eased from 1 to 1.3.
    pub fn container_scale(&self, frame: i64) -> f64 {
        let progress = spring(frame, self.fps, CONTAINER_SPRING);
        map_range(
            progress,
            [0.0, 1.0],
            CONTAINER_SCALE,
            InterpolateOptions::clamp().with_easing(Ease::EASE),
        )
    }

    /// Visual state at `frame`.
    pub fn frame_state(&self, frame: i64) -> HighlightFrame {
        let paragraphs = self
            .segments
            .iter()
            .map(|segs| {
                segs.iter()
                    .map(|s| SegmentFrame {
                        text: s.text.clone(),
                        highlighted: s.highlighted,
                        reveal_percent: if s.highlighted {
                            reveal_percent(s.reveal_progress(frame))
                        } else {
                            0
                        },
                    })
                    .collect()
            })
            .collect();

        HighlightFrame {
            frame,
            scale: self.container_scale(frame),
            theme: *self.props.theme.theme(),
            paragraphs,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/highlight.rs"]
mod tests;
