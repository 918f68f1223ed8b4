//! clipline is the engine behind an audio/video timeline widget.
//!
//! A host hands over the widget's JSON payload and gets back a validated model:
//!
//! - [`decode`] a payload into a [`Timeline`], assigning audio lanes so overlapping clips never
//!   share one
//! - [`apply_edit`] an [`EditCommand`] (move, resize, lane change) atomically
//! - [`encode`] the timeline back into the payload shape
//!
//! ```
//! use clipline::{EditCommand, TrackKind};
//!
//! let raw = serde_json::json!({
//!     "video": [],
//!     "audio": [
//!         {"id": "a1", "src": "horse.mp3", "start": 1, "duration": 8, "lane": 0},
//!         {"id": "a3", "src": "horse.mp3", "start": 9, "duration": 3, "lane": 0}
//!     ]
//! });
//! let t = clipline::decode(&raw).unwrap();
//! let resize = EditCommand::resize(TrackKind::Audio, "a1", 10.0);
//! assert!(clipline::apply_edit(&t, &resize).is_err());
//! assert_eq!(clipline::encode(&t), raw);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod edit;
mod engine;
mod foundation;

pub mod fixtures;
pub mod timeline;

pub use crate::codec::payload::{decode, decode_with, encode};
pub use crate::edit::apply::{apply_edit, apply_edit_with};
pub use crate::edit::command::EditCommand;
pub use crate::edit::session::{EditSession, EditState};
pub use crate::engine::{EngineOpts, TimelineBoundary, TimelineEngine};
pub use crate::foundation::core::{Span, TrackKind};
pub use crate::foundation::error::{TimelineError, TimelineResult};
pub use crate::timeline::clip::Clip;
pub use crate::timeline::media::{MediaDurations, NoDurations};
pub use crate::timeline::model::{Timeline, Track};
