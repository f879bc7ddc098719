use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    eval::pipeline::FrameSource,
    foundation::core::{Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    scene::highlight::{HighlightFrame, TextHighlightProps, TextHighlightScene},
    scene::list::{ListFrame, TextListProps, TextListScene},
    text::highlight::TextSegment,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// JSON-facing scene description: frame rate, optional length and the scene props.
pub struct SceneFile {
    /// Frame rate.
    pub fps: Fps,
    /// Length in frames. When absent the scene's natural length is used.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Scene kind and props.
    pub scene: SceneProps,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Props of one of the supported scene kinds.
pub enum SceneProps {
    /// Paragraphs with sequentially revealed highlights.
    TextHighlight(TextHighlightProps),
    /// Title plus numbered items with brush wipes.
    TextList(TextListProps),
}

impl SceneFile {
    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate the props and precompute everything the scene needs per frame.
    #[tracing::instrument(skip(self), fields(fps = ?self.fps, duration = ?self.duration))]
    pub fn build(&self) -> ReelResult<Scene> {
        self.fps.validate()?;
        let kind = match &self.scene {
            SceneProps::TextHighlight(p) => {
                SceneKind::TextHighlight(TextHighlightScene::new(p.clone(), self.fps)?)
            }
            SceneProps::TextList(p) => SceneKind::TextList(TextListScene::new(p.clone(), self.fps)?),
        };
        let duration = match self.duration {
            Some(0) => return Err(ReelError::validation("scene duration must be > 0")),
            Some(d) => d,
            None => kind.natural_duration(),
        };
        tracing::debug!(duration, "built scene");
        Ok(Scene {
            fps: self.fps,
            duration,
            kind,
        })
    }
}

#[derive(Clone, Debug)]
/// Evaluator for one scene kind.
pub enum SceneKind {
    /// Text-highlight evaluator.
    TextHighlight(TextHighlightScene),
    /// Text-list evaluator.
    TextList(TextListScene),
}

impl SceneKind {
    fn natural_duration(&self) -> u64 {
        match self {
            Self::TextHighlight(s) => s.natural_duration(),
            Self::TextList(s) => s.natural_duration(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Visual state of any scene kind at one frame.
pub enum FrameState {
    /// State of a text-highlight scene.
    TextHighlight(HighlightFrame),
    /// State of a text-list scene.
    TextList(ListFrame),
}

/// A built scene with a fixed length, ready to evaluate frames.
#[derive(Clone, Debug)]
pub struct Scene {
    fps: Fps,
    duration: u64,
    kind: SceneKind,
}

impl Scene {
    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Length in frames.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// The underlying evaluator.
    pub fn kind(&self) -> &SceneKind {
        &self.kind
    }

    /// Timed segmentation, for highlight scenes only.
    pub fn segments(&self) -> Option<&[Vec<TextSegment>]> {
        match &self.kind {
            SceneKind::TextHighlight(s) => Some(s.segments()),
            SceneKind::TextList(_) => None,
        }
    }

    /// Visual state at `frame`; frames at or past the duration are rejected.
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<FrameState> {
        if frame.0 >= self.duration {
            return Err(ReelError::evaluation(format!(
                "frame {} is outside the scene (duration {})",
                frame.0, self.duration
            )));
        }
        let f = frame.as_i64();
        Ok(match &self.kind {
            SceneKind::TextHighlight(s) => FrameState::TextHighlight(s.frame_state(f)),
            SceneKind::TextList(s) => FrameState::TextList(s.frame_state(f)),
        })
    }
}

impl FrameSource for Scene {
    type Output = FrameState;

    fn duration(&self) -> u64 {
        self.duration
    }

    fn eval_frame(&self, frame: FrameIndex) -> ReelResult<FrameState> {
        Scene::eval_frame(self, frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
