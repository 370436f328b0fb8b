//! Values pushed by the replication transport for a remote entity
use bevy_math::Vec3;
use core::fmt;

/// Which track of a remote entity a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Position,
    Yaw,
    Pitch,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::Position => f.write_str("position"),
            SampleKind::Yaw => f.write_str("yaw"),
            SampleKind::Pitch => f.write_str("pitch"),
        }
    }
}

/// One authoritative value received for a remote entity.
///
/// Rotation is received as two independent scalar angles (in degrees),
/// which are buffered and interpolated on separate tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Position(Vec3),
    Yaw(f32),
    Pitch(f32),
}

impl SampleValue {
    pub fn kind(&self) -> SampleKind {
        match self {
            SampleValue::Position(_) => SampleKind::Position,
            SampleValue::Yaw(_) => SampleKind::Yaw,
            SampleValue::Pitch(_) => SampleKind::Pitch,
        }
    }
}

impl From<Vec3> for SampleValue {
    fn from(value: Vec3) -> Self {
        SampleValue::Position(value)
    }
}
