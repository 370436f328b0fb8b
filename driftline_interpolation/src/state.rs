//! Interpolation state of a single remote entity
use bevy_ecs::component::Component;
use bevy_ecs::reflect::ReflectComponent;
use bevy_math::{EulerRot, Quat, Vec3};
use bevy_reflect::Reflect;
use bevy_transform::components::Transform;
use driftline_core::prelude::*;

use crate::plugin::InterpolationConfig;
use crate::track::{InterpolatedTrack, TrackStep};

/// Identifier of a remote entity, as used by the replication transport
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
#[reflect(Component)]
pub struct RemoteId(pub u64);

/// Component holding everything needed to render a remote entity smoothly.
///
/// The rotation is kept as two independent scalar tracks (yaw and pitch), each with its own
/// buffer: under packet loss one can catch up before the other.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RemoteEntityState {
    pub position: InterpolatedTrack<Vec3>,
    pub yaw: InterpolatedTrack<Angle>,
    pub pitch: InterpolatedTrack<Angle>,
    locomotion: Locomotion,
}

/// Result of ticking every track of a [`RemoteEntityState`] once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityStep {
    pub position: TrackStep<Vec3>,
    pub yaw: TrackStep<Angle>,
    pub pitch: TrackStep<Angle>,
}

impl EntityStep {
    /// Number of samples retired during this step
    pub fn retired(&self) -> usize {
        usize::from(self.position.is_retired())
            + usize::from(self.yaw.is_retired())
            + usize::from(self.pitch.is_retired())
    }
}

impl RemoteEntityState {
    /// Create the state of a newly spawned remote entity.
    ///
    /// The spawn values are used as the initial rendered values. Angles are in degrees.
    pub fn new(mode: InterpolationMode, position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position: InterpolatedTrack::new(SampleKind::Position, mode, position),
            yaw: InterpolatedTrack::new(SampleKind::Yaw, mode, Angle::new(yaw)),
            pitch: InterpolatedTrack::new(SampleKind::Pitch, mode, Angle::new(pitch)),
            locomotion: Locomotion::default(),
        }
    }

    pub fn historical(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::new(InterpolationMode::Historical, position, yaw, pitch)
    }

    pub fn direct(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::new(InterpolationMode::Direct, position, yaw, pitch)
    }

    /// Route a sample received from the transport to the matching track
    pub fn on_sample_received(&mut self, sample: SampleValue) -> Result<(), SampleError> {
        match sample {
            SampleValue::Position(position) => self.position.receive(position),
            SampleValue::Yaw(yaw) => self.yaw.receive(Angle::new(yaw)),
            SampleValue::Pitch(pitch) => self.pitch.receive(Angle::new(pitch)),
        }
    }

    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    /// Update the last known locomotion state, which selects the lerp rate tier
    pub fn set_locomotion(&mut self, locomotion: Locomotion) {
        self.locomotion = locomotion;
    }

    /// Teleport the entity to the given values and drop every buffered sample.
    ///
    /// Used when the remote entity is respawned in place; angles are in degrees.
    pub fn reset(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.position.reset(position);
        self.yaw.reset(Angle::new(yaw));
        self.pitch.reset(Angle::new(pitch));
    }

    /// Switch the interpolation mode of every track
    pub fn set_mode(&mut self, mode: InterpolationMode) {
        self.position.set_mode(mode);
        self.yaw.set_mode(mode);
        self.pitch.set_mode(mode);
    }

    /// Largest number of unconsumed samples across the tracks
    pub fn backlog(&self) -> usize {
        self.position
            .backlog()
            .max(self.yaw.backlog())
            .max(self.pitch.backlog())
    }

    /// Advance every track by one frame
    pub fn update(&mut self, delta_secs: f32, config: &InterpolationConfig) -> EntityStep {
        let locomotion = self.locomotion;
        EntityStep {
            position: self.position.update(delta_secs, locomotion, &config.position),
            yaw: self.yaw.update(delta_secs, locomotion, &config.rotation),
            pitch: self.pitch.update(delta_secs, locomotion, &config.rotation),
        }
    }

    /// Transform to use when rendering the entity this frame.
    ///
    /// The rotation applies the yaw around the Y axis, then the pitch around the local X axis.
    pub fn rendered_transform(&self) -> Transform {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.rendered().radians(),
            self.pitch.rendered().radians(),
            0.0,
        );
        Transform::from_translation(self.position.rendered()).with_rotation(rotation)
    }
}
