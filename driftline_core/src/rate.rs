//! Coarse lerp-rate schedule used by the interpolation tracks
use bevy_reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::BACKLOG_THRESHOLD;

/// How a track picks its target
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum InterpolationMode {
    /// Always chase the single most recently received sample.
    /// New samples overwrite the previous target, no history is kept.
    Direct,
    /// Replay every received sample in arrival order.
    /// Adds visual latency proportional to the buffer depth, but remote entities
    /// traverse every waypoint.
    #[default]
    Historical,
}

/// Last known locomotion state of the remote entity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum Locomotion {
    Walking,
    #[default]
    Running,
}

/// Three-level lerp-rate schedule.
///
/// The rate is multiplied by the frame delta to get the interpolation fraction of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct RateTiers {
    /// Rate used while the remote entity is walking
    pub walking: f32,
    /// Rate used while the remote entity is running
    pub normal: f32,
    /// Rate used to catch up when the buffer backlog exceeds [`BACKLOG_THRESHOLD`]
    pub faster: f32,
}

impl Default for RateTiers {
    fn default() -> Self {
        Self::position()
    }
}

impl RateTiers {
    pub const fn new(walking: f32, normal: f32, faster: f32) -> Self {
        Self {
            walking,
            normal,
            faster,
        }
    }

    /// Default schedule for position tracks
    pub const fn position() -> Self {
        Self::new(13.0, 16.0, 27.0)
    }

    /// Default schedule for yaw and pitch tracks
    pub const fn rotation() -> Self {
        Self::new(15.0, 20.0, 27.0)
    }

    pub fn with_walking(mut self, walking: f32) -> Self {
        self.walking = walking;
        self
    }

    pub fn with_normal(mut self, normal: f32) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_faster(mut self, faster: f32) -> Self {
        self.faster = faster;
        self
    }

    /// Pick the rate for the next tick.
    ///
    /// Backlog only matters in [`InterpolationMode::Historical`]: in direct mode
    /// the buffer never holds more than one sample.
    pub fn select(&self, mode: InterpolationMode, backlog: usize, locomotion: Locomotion) -> f32 {
        if mode == InterpolationMode::Historical && backlog > BACKLOG_THRESHOLD {
            return self.faster;
        }
        match locomotion {
            Locomotion::Walking => self.walking,
            Locomotion::Running => self.normal,
        }
    }
}
