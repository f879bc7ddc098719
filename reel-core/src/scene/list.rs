use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOptions, map_range},
    animation::primitives::{Direction, fade_in, slide_in},
    animation::spring::{SpringConfig, spring},
    foundation::core::{Fps, FrameRange, Vec2},
    foundation::error::{ReelError, ReelResult},
    scene::theme::{ListTheme, ListThemeKey},
    text::highlight::{reveal_percent, reveal_progress},
    timeline::slots::SlotCursor,
};

/// Longest accepted title, in chars.
pub const MAX_TITLE_CHARS: usize = 20;
/// Most list items a scene can hold.
pub const MAX_LIST_ITEMS: usize = 5;
/// Longest accepted list item, in chars.
pub const MAX_ITEM_CHARS: usize = 30;

const TITLE_SPRING: SpringConfig = SpringConfig {
    damping: 200.0,
    stiffness: 120.0,
    mass: 1.0,
    overshoot_clamping: false,
};

const SCALE_SPRING: SpringConfig = SpringConfig {
    damping: 200.0,
    stiffness: 80.0,
    mass: 1.5,
    overshoot_clamping: false,
};

const TITLE_SLIDE_DISTANCE: f64 = 220.0;
const CONTAINER_SCALE: [f64; 2] = [0.7, 0.9];
const ITEM_FADE_FRAMES: u64 = 6;
const VISIBILITY_LEAD_FRAMES: u64 = 30;
const TAIL_SECS: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Inputs of the text-list scene.
pub struct TextListProps {
    /// Heading shown above the list.
    pub title: String,
    /// Entries, numbered from 1.
    pub list_items: Vec<String>,
    /// Visual theme.
    #[serde(default)]
    pub theme: ListThemeKey,
}

impl TextListProps {
    /// Check title and item lengths and the item count.
    pub fn validate(&self) -> ReelResult<()> {
        let title_chars = self.title.chars().count();
        if title_chars == 0 {
            return Err(ReelError::validation("title must be at least 1 character"));
        }
        if title_chars > MAX_TITLE_CHARS {
            return Err(ReelError::validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters (got {title_chars})"
            )));
        }
        if self.list_items.is_empty() {
            return Err(ReelError::validation("at least 1 list item is required"));
        }
        if self.list_items.len() > MAX_LIST_ITEMS {
            return Err(ReelError::validation(format!(
                "at most {MAX_LIST_ITEMS} list items allowed (got {})",
                self.list_items.len()
            )));
        }
        for (i, item) in self.list_items.iter().enumerate() {
            let n = item.chars().count();
            if n > MAX_ITEM_CHARS {
                return Err(ReelError::validation(format!(
                    "list item {} must be at most {MAX_ITEM_CHARS} characters (got {n})",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One list entry at a given frame.
pub struct ListItemFrame {
    /// 1-based position.
    pub number: usize,
    /// Entry text.
    pub text: String,
    /// Fade-in opacity.
    pub opacity: f64,
    /// Remaining width of the brush stroke covering the entry, 100..=0.
    pub brush_percent: u8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Full visual state of the text-list scene at one frame.
pub struct ListFrame {
    /// Frame this state belongs to.
    pub frame: i64,
    /// Resolved theme.
    pub theme: ListTheme,
    /// Heading text.
    pub title: String,
    /// Title translation while it slides down into place.
    pub title_offset: Vec2,
    /// Title opacity.
    pub title_opacity: f64,
    /// Uniform scale of the whole container.
    pub scale: f64,
    /// Drawn width of the title underline, 0..=100.
    pub underline_percent: u8,
    /// Entries in order.
    pub items: Vec<ListItemFrame>,
}

/// Text-list scene: a title slides in, items fade in one by one, then brush strokes covering
/// them are wiped away one by one.
#[derive(Clone, Debug)]
pub struct TextListScene {
    props: TextListProps,
    fps: Fps,
    scale_delay: i64,
    visibility: Vec<FrameRange>,
    brush: Vec<FrameRange>,
}

impl TextListScene {
    /// Validate inputs and lay out item timings.
    #[tracing::instrument(skip(props), fields(items = props.list_items.len()))]
    pub fn new(props: TextListProps, fps: Fps) -> ReelResult<Self> {
        fps.validate()?;
        props.validate()?;

        let secs = |s: f64| fps.secs_to_frames_round(s);
        let n = props.list_items.len();

        let visibility = SlotCursor::new(
            VISIBILITY_LEAD_FRAMES + secs(0.5),
            secs(0.2),
            secs(0.01),
        )
        .take_slots(n);
        let all_visible_at = visibility.last().map_or(0, |w| w.end.0);
        let brush = SlotCursor::new(all_visible_at, secs(0.8), secs(0.3)).take_slots(n);

        tracing::debug!(
            all_visible_at,
            brush_end = brush.last().map_or(0, |w| w.end.0),
            "laid out list timings"
        );

        Ok(Self {
            scale_delay: i64::try_from(secs(0.4)).unwrap_or(i64::MAX),
            props,
            fps,
            visibility,
            brush,
        })
    }

    /// Props the scene was built from.
    pub fn props(&self) -> &TextListProps {
        &self.props
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Fade-in windows, one per item.
    pub fn visibility_windows(&self) -> &[FrameRange] {
        &self.visibility
    }

    /// Brush-wipe windows, one per item. The first starts once every item is visible.
    pub fn brush_windows(&self) -> &[FrameRange] {
        &self.brush
    }

    /// Length that plays every wipe and then holds for a second.
    pub fn natural_duration(&self) -> u64 {
        let last = self.brush.last().map_or(0, |w| w.end.0);
        last + self.fps.secs_to_frames_round(TAIL_SECS)
    }

    /// Visual state at `frame`.
    pub fn frame_state(&self, frame: i64) -> ListFrame {
        let fps = self.fps;

        let title_progress = spring(frame, fps, TITLE_SPRING);
        let title_opacity = map_range(
            title_progress,
            [0.0, 1.0],
            [0.0, 1.0],
            InterpolateOptions::clamp(),
        );

        let scale_progress = spring(frame.saturating_sub(self.scale_delay), fps, SCALE_SPRING);
        let scale = map_range(
            scale_progress,
            [0.0, 1.0],
            CONTAINER_SCALE,
            InterpolateOptions::clamp().with_easing(Ease::EASE),
        );
        let underline = map_range(
            scale_progress,
            [0.0, 1.0],
            [0.0, 1.0],
            InterpolateOptions::clamp(),
        );

        let items = self
            .props
            .list_items
            .iter()
            .zip(self.visibility.iter().zip(&self.brush))
            .enumerate()
            .map(|(i, (text, (vis, brush)))| ListItemFrame {
                number: i + 1,
                text: text.clone(),
                opacity: fade_in(frame, vis.start.as_i64(), ITEM_FADE_FRAMES),
                brush_percent: reveal_percent(1.0 - reveal_progress(*brush, frame)),
            })
            .collect();

        ListFrame {
            frame,
            theme: *self.props.theme.theme(),
            title: self.props.title.clone(),
            title_offset: slide_in(
                frame,
                fps,
                Direction::Top,
                TITLE_SLIDE_DISTANCE,
                SpringConfig::SLIDE,
            ),
            title_opacity,
            scale,
            underline_percent: reveal_percent(underline),
            items,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/list.rs"]
mod tests;
