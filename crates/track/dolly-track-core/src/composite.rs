//! Look-at track expressed relative to a position track.

use nalgebra::Vector3;

use crate::config::Config;
use crate::error::TrackError;
use crate::reference::ReferenceResolver;
use crate::sampling::TrackSource;
use crate::track::Frame;

/// Read-only view combining a `basis` and a `target` source.
///
/// In point mode the result sits one unit from the basis point, in the
/// direction of the raw target point. Directions pass through from `target`.
#[derive(Clone, Copy)]
pub struct CompositeTrack<'a> {
    basis: &'a dyn TrackSource,
    target: &'a dyn TrackSource,
}

impl<'a> CompositeTrack<'a> {
    pub fn new(basis: &'a dyn TrackSource, target: &'a dyn TrackSource) -> Self {
        Self { basis, target }
    }
}

impl TrackSource for CompositeTrack<'_> {
    fn evaluate_with(
        &self,
        config: &Config,
        frame: Frame,
        want_direction: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vector3<f64>, TrackError> {
        if want_direction {
            return self.target.evaluate_with(config, frame, true, resolver);
        }
        let basis = self.basis.evaluate_with(config, frame, false, resolver)?;
        let target = self.target.evaluate_with(config, frame, false, resolver)?;
        Ok(basis + (target - basis).normalize())
    }
}
