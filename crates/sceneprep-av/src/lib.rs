//! # sceneprep-av
//!
//! External-tool layer for the sceneprep pipeline.
//!
//! This crate provides functionality for:
//! - Splitting a source video into per-scene clips, either losslessly in one
//!   mkvmerge pass or per-range with ffmpeg
//! - Probing clip durations and stream details via ffprobe
//! - Detecting which collaborator binaries are available on `PATH`
//!
//! Every external tool sits behind a narrow trait ([`Remuxer`],
//! [`RangeExtractor`], [`DurationProber`]) so the executors can be tested
//! against fakes without invoking real binaries. Execution is synchronous
//! and sequential throughout: each invocation blocks until the tool exits,
//! and a failure aborts the whole operation.

mod error;
pub mod probe;
pub mod split;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use probe::{DetailProber, DurationProber, FfprobeProber, VideoDetails};
pub use split::{
    split_with_extractor, split_with_remuxer, FfmpegExtractor, MkvmergeRemuxer, RangeExtractor,
    Remuxer,
};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
