use bevy_app::{App, Plugin, Update};
use bevy_ecs::prelude::*;
use bevy_ecs::reflect::ReflectResource;
use bevy_reflect::Reflect;
use bevy_time::Time;
use bevy_transform::components::Transform;
use driftline_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity_map::{register_remote_entity, unregister_remote_entity, RemoteEntityMap};
use crate::state::{RemoteEntityState, RemoteId};

/// Config to specify how remote entities should be interpolated
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Lerp rates used by the position track
    pub position: RateTiers,
    /// Lerp rates used by the yaw and pitch tracks
    pub rotation: RateTiers,
    /// If true, the rendered transform is written into the entity's [`Transform`] every frame
    pub write_transform: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            position: RateTiers::position(),
            rotation: RateTiers::rotation(),
            write_transform: true,
        }
    }
}

impl InterpolationConfig {
    pub fn with_position_rates(mut self, position: RateTiers) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation_rates(mut self, rotation: RateTiers) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_write_transform(mut self, write_transform: bool) -> Self {
        self.write_transform = write_transform;
        self
    }
}

/// Interpolates every entity with a [`RemoteEntityState`].
///
/// The systems read the frame delta from [`Time`], so the app needs the `TimePlugin`
/// (or a manually advanced `Time` resource).
#[derive(Default)]
pub struct InterpolationPlugin {
    config: InterpolationConfig,
}

impl InterpolationPlugin {
    pub fn new(config: InterpolationConfig) -> Self {
        Self { config }
    }
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum InterpolationSystems {
    /// Move inbound updates into the entity buffers
    Receive,
    /// Advance the rendered values toward the buffered samples
    Interpolate,
    /// Write the rendered values into the `Transform`
    Apply,

    /// SystemSet encompassing all other interpolation sets
    All,
}

/// Advance every remote entity by one frame
pub(crate) fn interpolate(
    time: Res<Time>,
    config: Res<InterpolationConfig>,
    mut query: Query<(Entity, &mut RemoteEntityState)>,
) {
    let delta = time.delta_secs();
    #[cfg(feature = "metrics")]
    let mut max_backlog = 0;
    for (entity, mut state) in query.iter_mut() {
        let step = state.update(delta, &config);
        trace!(
            ?entity,
            ?step,
            backlog = state.backlog(),
            position = ?state.position.rendered(),
            "interpolate"
        );
        #[cfg(feature = "metrics")]
        {
            max_backlog = max_backlog.max(state.backlog());
            metrics::counter!("driftline::samples::retired").increment(step.retired() as u64);
        }
    }
    #[cfg(feature = "metrics")]
    {
        metrics::gauge!("driftline::buffer::max_backlog").set(max_backlog as f64);
    }
}

pub(crate) fn apply_transform(mut query: Query<(&RemoteEntityState, &mut Transform)>) {
    for (state, mut transform) in query.iter_mut() {
        *transform = state.rendered_transform().with_scale(transform.scale);
    }
}

fn write_transform_enabled(config: Res<InterpolationConfig>) -> bool {
    config.write_transform
}

impl Plugin for InterpolationPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "metrics")]
        {
            metrics::describe_counter!(
                "driftline::samples::retired",
                metrics::Unit::Count,
                "Buffered samples reached by the rendered value and removed from the buffer"
            );
            metrics::describe_counter!(
                "driftline::samples::rejected",
                metrics::Unit::Count,
                "Non-finite samples dropped before being buffered"
            );
            metrics::describe_gauge!(
                "driftline::buffer::max_backlog",
                metrics::Unit::Count,
                "Largest number of unconsumed samples on any remote entity track"
            );
        }

        // REFLECT
        app.register_type::<InterpolationConfig>()
            .register_type::<RateTiers>()
            .register_type::<InterpolationMode>()
            .register_type::<Locomotion>()
            .register_type::<Angle>()
            .register_type::<RemoteId>();

        // RESOURCES
        app.insert_resource(self.config);
        app.init_resource::<RemoteEntityMap>();

        // OBSERVERS
        app.add_observer(register_remote_entity);
        app.add_observer(unregister_remote_entity);

        // SETS
        app.configure_sets(
            Update,
            (
                InterpolationSystems::Receive,
                InterpolationSystems::Interpolate,
                InterpolationSystems::Apply,
            )
                .chain()
                .in_set(InterpolationSystems::All),
        );

        // SYSTEMS
        app.add_systems(
            Update,
            (
                interpolate.in_set(InterpolationSystems::Interpolate),
                apply_transform
                    .run_if(write_transform_enabled)
                    .in_set(InterpolationSystems::Apply),
            ),
        );
    }
}
