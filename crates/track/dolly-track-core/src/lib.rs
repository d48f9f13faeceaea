//! Dolly Track Core (engine-agnostic)
//!
//! Keyframed camera tracks for scripted camera moves. A [`Shot`] holds
//! position, look-at and up-vector [`Track`]s; each track maps frame numbers
//! to [`KeyedPose`]s that are either in world space or locked to an external
//! object resolved through a [`ReferenceResolver`]. Tracks evaluate at any
//! frame with constant, linear, cosine or Catmull-Rom interpolation and
//! persist in a compact text form (see [`codec`]).

pub mod codec;
pub mod composite;
pub mod config;
pub mod error;
pub mod ids;
pub mod interp;
pub mod playback;
pub mod pose;
pub mod reference;
pub mod sampling;
pub mod scanner;
pub mod shot;
pub mod store;
pub mod track;

// Re-exports for consumers (hosts)
pub use codec::{decode_shot, decode_track, encode_shot, encode_track};
pub use composite::CompositeTrack;
pub use config::Config;
pub use error::TrackError;
pub use ids::{OwnerId, ReferenceId};
pub use playback::{PlaybackState, Playhead};
pub use pose::{KeyedPose, ReferenceMode, TransitionKind};
pub use reference::{NoReferences, ReferenceResolver, ReferenceTable, WorldTransform};
pub use sampling::{sample_track, TrackSource, CONTROL_GAP_FRAMES};
pub use scanner::Scanner;
pub use shot::{CameraView, Shot, ShotLocks};
pub use store::{load_frame, load_shot, save_frame, save_shot, MemoryStore, ShotStore};
pub use track::{Frame, Track};

/// Result alias for fallible track operations.
pub type Result<T> = core::result::Result<T, TrackError>;
