//! Handles interpolation of remote entities between the updates received from the transport
//!
//! Every remote entity rendered locally gets a [`RemoteEntityState`] component. The transport
//! pushes samples (position, yaw, pitch) into it, and each frame the [`InterpolationPlugin`]
//! moves the rendered transform toward those samples:
//! - in [`InterpolationMode::Historical`], every received sample is visited in arrival order.
//!   A sample is removed from the buffer once the rendered value is close enough to it.
//!   If the backlog grows beyond [`BACKLOG_THRESHOLD`], the fastest lerp rate is used to catch up.
//! - in [`InterpolationMode::Direct`], the rendered value always chases the latest sample.
//!
//! [`InterpolationMode::Historical`]: driftline_core::rate::InterpolationMode::Historical
//! [`InterpolationMode::Direct`]: driftline_core::rate::InterpolationMode::Direct
//! [`BACKLOG_THRESHOLD`]: driftline_core::BACKLOG_THRESHOLD

pub use plugin::{InterpolationConfig, InterpolationPlugin, InterpolationSystems};
pub use state::{EntityStep, RemoteEntityState, RemoteId};

mod entity_map;
/// Updates pushed by the transport, and how they are applied to entities
pub mod inbound;
/// Provides the `InterpolationPlugin` and its systems
pub mod plugin;
/// The `RemoteEntityState` component
pub mod state;
/// Interpolation of a single value toward its buffered samples
pub mod track;

/// Commonly used items for client-side interpolation.
pub mod prelude {
    pub use crate::entity_map::RemoteEntityMap;
    pub use crate::inbound::{apply_inbound, InboundError, InboundUpdate, RemoteUpdate};
    pub use crate::plugin::{InterpolationConfig, InterpolationPlugin, InterpolationSystems};
    pub use crate::state::{EntityStep, RemoteEntityState, RemoteId};
    pub use crate::track::{InterpolatedTrack, TrackStep};
}
