use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_math::Vec3;
use bevy_time::Time;
use bevy_transform::components::Transform;
use core::time::Duration;
use driftline::prelude::*;
use tracing::trace;

/// Stepper with a single client `App` running the driftline plugins.
///
/// Time is advanced manually by `frame_duration` on every [`frame_step`](Self::frame_step),
/// so tests are deterministic. Samples can be pushed either directly on the entity or through
/// the crossbeam `sender`, as a transport thread would.
pub struct InterpolationStepper {
    pub app: App,
    pub sender: SampleSender,
    pub frame_duration: Duration,
}

impl Default for InterpolationStepper {
    fn default() -> Self {
        Self::new(InterpolationConfig::default(), Duration::from_millis(16))
    }
}

impl InterpolationStepper {
    pub fn new(config: InterpolationConfig, frame_duration: Duration) -> Self {
        let (sender, receiver) = driftline::crossbeam::channel();
        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.add_plugins(DriftlinePlugins::new(config).with_receiver(receiver));
        app.finish();
        app.cleanup();
        Self {
            app,
            sender,
            frame_duration,
        }
    }

    /// Spawn a remote entity at the given position, facing `yaw` degrees
    pub fn spawn_remote(
        &mut self,
        remote: RemoteId,
        mode: InterpolationMode,
        position: Vec3,
        yaw: f32,
    ) -> Entity {
        let state = RemoteEntityState::new(mode, position, yaw, 0.0);
        let transform = state.rendered_transform();
        self.app.world_mut().spawn((remote, state, transform)).id()
    }

    /// Push a sample directly on the entity, bypassing the channel
    pub fn receive(&mut self, entity: Entity, sample: impl Into<SampleValue>) {
        self.state_mut(entity)
            .on_sample_received(sample.into())
            .unwrap();
    }

    pub fn state(&self, entity: Entity) -> &RemoteEntityState {
        self.app
            .world()
            .get::<RemoteEntityState>(entity)
            .unwrap()
    }

    pub fn state_mut(&mut self, entity: Entity) -> bevy_ecs::world::Mut<'_, RemoteEntityState> {
        self.app
            .world_mut()
            .get_mut::<RemoteEntityState>(entity)
            .unwrap()
    }

    pub fn transform(&self, entity: Entity) -> Transform {
        *self.app.world().get::<Transform>(entity).unwrap()
    }

    pub fn frame_step(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<Time>()
            .advance_by(self.frame_duration);
        self.app.update();
        trace!(
            elapsed = ?self.app.world().resource::<Time>().elapsed(),
            "frame step"
        );
    }

    pub fn frame_steps(&mut self, n: usize) {
        for _ in 0..n {
            self.frame_step();
        }
    }
}
