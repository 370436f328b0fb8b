//! Values that can be interpolated on a track
use bevy_math::Vec3;
use bevy_reflect::Reflect;
use core::fmt::Debug;
use serde::{Deserialize, Serialize};

use crate::{POSITION_EPSILON, ROTATION_EPSILON};

/// A value that a track can move toward, one tick at a time.
pub trait TrackValue: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Distance under which the rendered value is considered to have reached a sample
    const EPSILON: f32;

    /// Move from `self` toward `target` by the fraction `t`.
    ///
    /// `t` is already clamped to `[0, 1]` by the caller, so the result never overshoots.
    fn interpolate(self, target: Self, t: f32) -> Self;

    /// Non-negative distance between two values
    fn distance_to(self, target: Self) -> f32;

    /// Returns false if the value contains a NaN or infinite component
    fn is_finite(self) -> bool;
}

impl TrackValue for Vec3 {
    const EPSILON: f32 = POSITION_EPSILON;

    fn interpolate(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }

    fn distance_to(self, target: Self) -> f32 {
        self.distance(target)
    }

    fn is_finite(self) -> bool {
        Vec3::is_finite(self)
    }
}

/// Euler angle in degrees, normalized to `[0, 360)`.
///
/// Interpolation follows the shortest arc: going from 350 to 10 passes through 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Reflect)]
pub struct Angle(pub f32);

impl Angle {
    pub fn new(degrees: f32) -> Self {
        Self(normalize(degrees))
    }

    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Signed shortest rotation (in `(-180, 180]`) that takes `self` to `target`
    pub fn delta_to(self, target: Angle) -> f32 {
        let delta = (target.0 - self.0).rem_euclid(360.0);
        if delta > 180.0 { delta - 360.0 } else { delta }
    }
}

fn normalize(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

impl From<f32> for Angle {
    fn from(degrees: f32) -> Self {
        Angle::new(degrees)
    }
}

impl TrackValue for Angle {
    const EPSILON: f32 = ROTATION_EPSILON;

    fn interpolate(self, target: Self, t: f32) -> Self {
        Angle::new(self.0 + self.delta_to(target) * t)
    }

    fn distance_to(self, target: Self) -> f32 {
        self.delta_to(target).abs()
    }

    fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
