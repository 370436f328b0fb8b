//! Maps the identifiers used by the transport to local entities
use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::*;
use bevy_platform::collections::HashMap;
use tracing::{debug, warn};

use crate::state::RemoteId;

/// Lookup from [`RemoteId`] to the local entity rendering it.
///
/// Kept up to date by observers: an entry is added every time a [`RemoteId`] is inserted on an
/// entity, and removed when that id is overwritten, removed, or the entity despawned.
#[derive(Resource, Debug, Default)]
pub struct RemoteEntityMap {
    map: HashMap<RemoteId, Entity>,
}

impl RemoteEntityMap {
    pub fn get(&self, remote: RemoteId) -> Option<Entity> {
        self.map.get(&remote).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RemoteId, &Entity)> {
        self.map.iter()
    }
}

pub(crate) fn register_remote_entity(
    trigger: On<Insert, RemoteId>,
    query: Query<&RemoteId>,
    mut entity_map: ResMut<RemoteEntityMap>,
) {
    let entity = trigger.entity;
    let Ok(remote) = query.get(entity) else {
        return;
    };
    if let Some(previous) = entity_map.map.insert(*remote, entity)
        && previous != entity
    {
        warn!(
            ?remote,
            ?previous,
            ?entity,
            "remote id was already mapped to another entity"
        );
    }
    debug!(?remote, ?entity, "registered remote entity");
}

/// Runs before the old `RemoteId` is overwritten or removed, so it can still be read
pub(crate) fn unregister_remote_entity(
    trigger: On<Replace, RemoteId>,
    query: Query<(Entity, &RemoteId)>,
    mut entity_map: ResMut<RemoteEntityMap>,
) {
    let entity = trigger.entity;
    let Ok((_, &remote)) = query.get(entity) else {
        return;
    };
    // only remove the entry if it still points to this entity
    if entity_map.get(remote) != Some(entity) {
        return;
    }
    entity_map.map.remove(&remote);
    // another entity still carrying the same id takes the entry back
    if let Some((other, _)) = query
        .iter()
        .find(|(other, id)| *other != entity && **id == remote)
    {
        entity_map.map.insert(remote, other);
        debug!(?remote, ?entity, ?other, "remote id moved back to another entity");
        return;
    }
    debug!(?remote, ?entity, "unregistered remote entity");
}
