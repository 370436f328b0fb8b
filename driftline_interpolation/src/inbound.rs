//! Updates pushed by the replication transport
use bevy_ecs::system::Query;
use driftline_core::prelude::*;
use tracing::trace;

use crate::entity_map::RemoteEntityMap;
use crate::state::{RemoteEntityState, RemoteId};

/// Payload of an update received for a remote entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteUpdate {
    /// A new authoritative position, yaw or pitch
    Sample(SampleValue),
    /// The entity changed locomotion state
    Locomotion(Locomotion),
}

/// An update addressed to the remote entity identified by `remote`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InboundUpdate {
    pub remote: RemoteId,
    pub update: RemoteUpdate,
}

impl InboundUpdate {
    pub fn sample(remote: RemoteId, sample: impl Into<SampleValue>) -> Self {
        Self {
            remote,
            update: RemoteUpdate::Sample(sample.into()),
        }
    }

    pub fn locomotion(remote: RemoteId, locomotion: Locomotion) -> Self {
        Self {
            remote,
            update: RemoteUpdate::Locomotion(locomotion),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum InboundError {
    /// No local entity is registered for this remote id (not spawned yet, or already despawned)
    #[error("no local entity for remote id {0:?}")]
    UnknownRemote(RemoteId),
    /// The entity is registered but does not have a [`RemoteEntityState`]
    #[error("remote id {0:?} has no interpolation state")]
    MissingState(RemoteId),
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Apply an update to the matching remote entity
pub fn apply_inbound(
    inbound: InboundUpdate,
    entity_map: &RemoteEntityMap,
    states: &mut Query<&mut RemoteEntityState>,
) -> Result<(), InboundError> {
    let entity = entity_map
        .get(inbound.remote)
        .ok_or(InboundError::UnknownRemote(inbound.remote))?;
    let mut state = states
        .get_mut(entity)
        .map_err(|_| InboundError::MissingState(inbound.remote))?;
    trace!(remote = ?inbound.remote, ?entity, update = ?inbound.update, "apply inbound update");
    match inbound.update {
        RemoteUpdate::Sample(sample) => state.on_sample_received(sample)?,
        RemoteUpdate::Locomotion(locomotion) => state.set_locomotion(locomotion),
    }
    Ok(())
}
