//! Per-value interpolation toward buffered samples
use driftline_core::prelude::*;
use tracing::{trace, warn};

/// Outcome of a single [`InterpolatedTrack::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackStep<T> {
    /// No target was available: the rendered value did not move
    Idle,
    /// The rendered value moved toward the target
    Moved,
    /// The rendered value reached the buffer head, which got removed from the buffer
    Retired(T),
}

impl<T> TrackStep<T> {
    pub fn is_retired(&self) -> bool {
        matches!(self, TrackStep::Retired(_))
    }
}

/// Tracks the rendered value of one component (position, yaw or pitch) of a remote entity,
/// along with the samples received for it that have not been consumed yet.
///
/// Every tick the rendered value is moved toward the target by `lerp_rate * delta`:
/// - in [`InterpolationMode::Direct`] the target is the latest received sample
/// - in [`InterpolationMode::Historical`] the target is the oldest unconsumed sample, which
///   is retired once the rendered value gets within [`TrackValue::EPSILON`] of it
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedTrack<T: TrackValue> {
    kind: SampleKind,
    mode: InterpolationMode,
    buffer: SampleBuffer<T>,
    rendered: T,
    /// rate used during the last tick that had a target
    lerp_rate: f32,
}

impl<T: TrackValue> InterpolatedTrack<T> {
    /// Create a track whose rendered value starts at `initial`
    pub fn new(kind: SampleKind, mode: InterpolationMode, initial: T) -> Self {
        Self {
            kind,
            mode,
            buffer: SampleBuffer::new(),
            rendered: initial,
            lerp_rate: 0.0,
        }
    }

    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Current rendered value
    pub fn rendered(&self) -> T {
        self.rendered
    }

    pub fn lerp_rate(&self) -> f32 {
        self.lerp_rate
    }

    /// Number of samples that have not been consumed yet
    pub fn backlog(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &SampleBuffer<T> {
        &self.buffer
    }

    /// Sample the next tick will move toward
    pub fn target(&self) -> Option<T> {
        self.buffer.peek().copied()
    }

    /// Buffer a newly received sample.
    ///
    /// Non-finite samples are rejected so that they never reach the rendered value.
    pub fn receive(&mut self, sample: T) -> Result<(), SampleError> {
        if !sample.is_finite() {
            warn!(kind = %self.kind, ?sample, "rejecting non-finite sample");
            #[cfg(feature = "metrics")]
            {
                metrics::counter!("driftline::samples::rejected").increment(1);
            }
            return Err(SampleError::NonFinite { kind: self.kind });
        }
        match self.mode {
            InterpolationMode::Direct => self.buffer.replace(sample),
            InterpolationMode::Historical => self.buffer.push(sample),
        }
        trace!(kind = %self.kind, ?sample, backlog = self.buffer.len(), "received sample");
        Ok(())
    }

    /// Switch the interpolation mode.
    ///
    /// Switching to [`InterpolationMode::Direct`] collapses the buffer to its latest sample.
    pub fn set_mode(&mut self, mode: InterpolationMode) {
        if mode == InterpolationMode::Direct
            && let Some(latest) = self.buffer.latest().copied()
        {
            self.buffer.replace(latest);
        }
        self.mode = mode;
    }

    /// Teleport the rendered value and drop all buffered samples.
    ///
    /// This is the only way for the rendered value to jump, see [`RemoteEntityState::reset`].
    ///
    /// [`RemoteEntityState::reset`]: crate::state::RemoteEntityState::reset
    pub fn reset(&mut self, value: T) {
        self.buffer.clear();
        self.rendered = value;
    }

    /// Advance the rendered value by one tick of `delta_secs`
    pub fn update(
        &mut self,
        delta_secs: f32,
        locomotion: Locomotion,
        tiers: &RateTiers,
    ) -> TrackStep<T> {
        let backlog = self.buffer.len();
        let Some(target) = self.buffer.peek().copied() else {
            return TrackStep::Idle;
        };
        self.lerp_rate = tiers.select(self.mode, backlog, locomotion);
        let t = if delta_secs.is_finite() {
            (self.lerp_rate * delta_secs).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.rendered = self.rendered.interpolate(target, t);

        if self.mode == InterpolationMode::Historical
            && self.rendered.distance_to(target) < T::EPSILON
        {
            self.buffer.pop();
            trace!(kind = %self.kind, ?target, remaining = self.buffer.len(), "retired sample");
            return TrackStep::Retired(target);
        }
        TrackStep::Moved
    }
}
