//! Per-owner string settings and shot persistence on top of them.
//!
//! The settings text groups keys under owner headers:
//!
//! ```text
//! [81234]
//! shot=Position: [0:Unlocked::<0,0,0>:Linear] , LookAt: , UpVec:
//! frame=12
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::codec::encode_shot;
use crate::error::TrackError;
use crate::ids::OwnerId;
use crate::shot::Shot;
use crate::track::Frame;

/// Key holding the encoded shot.
pub const SHOT_KEY: &str = "shot";
/// Key holding the playhead frame of a paused shot.
pub const FRAME_KEY: &str = "frame";

/// Injected key-value persistence, one namespace per owner.
pub trait ShotStore {
    fn get(&self, owner: OwnerId, key: &str) -> Option<String>;
    fn set(&mut self, owner: OwnerId, key: &str, value: String);
    /// Forget everything stored for `owner`, e.g. when the object is removed.
    fn remove_owner(&mut self, owner: OwnerId);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    owners: BTreeMap<OwnerId, BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Dump in the settings text format, owners and keys in ascending order.
    pub fn to_settings_text(&self) -> String {
        let mut out = String::new();
        for (owner, settings) in &self.owners {
            let _ = writeln!(out, "[{owner}]");
            for (key, value) in settings {
                let _ = writeln!(out, "{key}={value}");
            }
        }
        out
    }

    /// Load the settings text format.
    ///
    /// `key=value` lines before the first header and lines with neither a
    /// header nor `=` are skipped. Values may themselves contain `=`.
    pub fn from_settings_text(text: &str) -> Result<Self, TrackError> {
        let mut store = Self::new();
        let mut current: Option<OwnerId> = None;
        let mut settings = 0usize;

        for line in text.lines() {
            if let Some(header) = line.strip_prefix('[') {
                let id = header
                    .split(']')
                    .next()
                    .and_then(|id| id.trim().parse::<i64>().ok())
                    .ok_or_else(|| TrackError::parse("owner id expected", line))?;
                let owner = OwnerId(id);
                store.owners.entry(owner).or_default();
                current = Some(owner);
            } else if let Some((key, value)) = line.split_once('=') {
                let Some(owner) = current else {
                    continue;
                };
                store.set(owner, key, value.to_string());
                settings += 1;
            }
        }

        log::debug!(
            "settings loaded: {} owners, {} settings",
            store.owners.len(),
            settings
        );
        Ok(store)
    }
}

impl ShotStore for MemoryStore {
    fn get(&self, owner: OwnerId, key: &str) -> Option<String> {
        self.owners.get(&owner)?.get(key).cloned()
    }

    fn set(&mut self, owner: OwnerId, key: &str, value: String) {
        self.owners
            .entry(owner)
            .or_default()
            .insert(key.to_string(), value);
    }

    fn remove_owner(&mut self, owner: OwnerId) {
        if self.owners.remove(&owner).is_some() {
            log::debug!("removed settings of owner {owner}");
        }
    }
}

/// Load the shot stored for `owner`; an owner without one gets an empty shot.
pub fn load_shot(store: &dyn ShotStore, owner: OwnerId) -> Result<Shot, TrackError> {
    let Some(text) = store.get(owner, SHOT_KEY) else {
        log::debug!("no shot stored for owner {owner}");
        return Ok(Shot::default());
    };
    text.parse::<Shot>().map_err(|err| {
        log::warn!("stored shot of owner {owner} failed to decode: {err}");
        err
    })
}

/// Store `shot` for `owner`. A shot that cannot be encoded leaves the store untouched.
pub fn save_shot(store: &mut dyn ShotStore, owner: OwnerId, shot: &Shot) -> Result<(), TrackError> {
    let text = encode_shot(shot)?;
    log::debug!(
        "saving shot for owner {owner}: {}/{}/{} keyframes",
        shot.position.len(),
        shot.look_at.len(),
        shot.up.len()
    );
    store.set(owner, SHOT_KEY, text);
    Ok(())
}

/// Stored playhead frame, if one was saved and is a valid frame number.
pub fn load_frame(store: &dyn ShotStore, owner: OwnerId) -> Option<Frame> {
    store.get(owner, FRAME_KEY)?.trim().parse().ok()
}

pub fn save_frame(store: &mut dyn ShotStore, owner: OwnerId, frame: Frame) {
    store.set(owner, FRAME_KEY, frame.to_string());
}
