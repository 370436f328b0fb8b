//! Contains the sample types, buffers and rate schedule shared by driftline crates

pub mod error;
pub mod rate;
pub mod sample;
pub mod sample_buffer;
pub mod value;

/// Distance (in world units) under which a buffered position sample is considered reached
pub const POSITION_EPSILON: f32 = 0.3;

/// Angular distance (in degrees) under which a buffered rotation sample is considered reached
pub const ROTATION_EPSILON: f32 = 0.4;

/// Number of buffered samples above which historical interpolation switches to the fastest rate
pub const BACKLOG_THRESHOLD: usize = 10;

pub mod prelude {
    pub use crate::error::SampleError;
    pub use crate::rate::{InterpolationMode, Locomotion, RateTiers};
    pub use crate::sample::{SampleKind, SampleValue};
    pub use crate::sample_buffer::SampleBuffer;
    pub use crate::value::{Angle, TrackValue};
    pub use crate::{BACKLOG_THRESHOLD, POSITION_EPSILON, ROTATION_EPSILON};
}
