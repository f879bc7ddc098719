use rayon::prelude::*;

use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};

/// Anything that can produce an independent state for each frame.
///
/// Implementors must be pure in the frame index: evaluating frames in any order, or on several
/// threads at once, yields the same outputs as a sequential pass.
pub trait FrameSource: Sync {
    /// Per-frame state.
    type Output: Send;

    /// Number of frames, `[0, duration)`.
    fn duration(&self) -> u64;

    /// State at `frame`.
    fn eval_frame(&self, frame: FrameIndex) -> ReelResult<Self::Output>;
}

#[derive(Clone, Debug)]
/// Threading and chunking options for [`eval_frames`].
pub struct EvalThreading {
    /// Evaluate chunks on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Pool size. `None` lets rayon pick.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Evaluate every frame of `range`, returning outputs in frame order.
///
/// `range` must be non-empty and lie inside `[0, source.duration())`.
///
/// The first failing frame aborts the whole call; no partial output is returned.
#[tracing::instrument(skip(source), fields(start = range.start.0, end = range.end.0))]
pub fn eval_frames<S: FrameSource>(
    source: &S,
    range: FrameRange,
    threading: &EvalThreading,
) -> ReelResult<Vec<S::Output>> {
    if range.is_empty() {
        return Err(ReelError::validation("eval range must be non-empty"));
    }
    if range.end.0 > source.duration() {
        return Err(ReelError::validation(format!(
            "eval range end {} exceeds duration {}",
            range.end.0,
            source.duration()
        )));
    }

    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(4096) as usize);

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            out.push(source.eval_frame(FrameIndex(f))?);
        }
        return Ok(out);
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames: Vec<u64> = (chunk_start..chunk_end).collect();
        let evaluated = pool.install(|| {
            frames
                .par_iter()
                .map(|&f| source.eval_frame(FrameIndex(f)))
                .collect::<Vec<_>>()
        });
        for item in evaluated {
            out.push(item?);
        }
        chunk_start = chunk_end;
    }

    tracing::debug!(frames = out.len(), "evaluated frames in parallel");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/pipeline.rs"]
mod tests;
