//! # sceneprep-scenes
//!
//! Scene-table interpretation for the sceneprep pipeline.
//!
//! This crate turns the CSV emitted by an external shot-boundary detector
//! into an ordered [`SceneTable`] that the split executor can act on:
//!
//! - Resolving the detector's varying column headers to a canonical
//!   start/end pair ([`schema`])
//! - Canonicalizing timecode strings to `HH:MM:SS[.mmm]` ([`timecode`])
//! - Loading the CSV with bounded retries against transient file locks
//!   ([`loader`])
//!
//! ## Example
//!
//! ```no_run
//! use sceneprep_scenes::{load_scene_table, RetryPolicy};
//!
//! let table = load_scene_table("Movie-Scenes.csv".as_ref(), &RetryPolicy::default())?;
//! for scene in table.records() {
//!     println!("{:04}: {} - {}", scene.index, scene.start, scene.end);
//! }
//! # Ok::<(), sceneprep_scenes::Error>(())
//! ```

mod error;
pub mod loader;
pub mod schema;
pub mod table;
pub mod timecode;

// Re-exports
pub use error::{Error, Result};
pub use loader::{load_scene_table, RetryPolicy};
pub use schema::ResolvedSchema;
pub use table::{SceneRecord, SceneTable};
