use crate::stepper::InterpolationStepper;
use bevy_math::Vec3;
use driftline::prelude::*;
use std::thread;
use test_log::test;

/// A transport thread streams a path for several entities while the app keeps ticking
#[test]
fn test_transport_thread_feeds_entities() {
    let mut stepper = InterpolationStepper::default();
    let entities: Vec<_> = (0..3)
        .map(|i| {
            stepper.spawn_remote(
                RemoteId(i),
                InterpolationMode::Historical,
                Vec3::ZERO,
                0.0,
            )
        })
        .collect();

    let sender = stepper.sender.clone();
    let transport = thread::spawn(move || {
        for step in 1..=5 {
            for i in 0..3 {
                let position = Vec3::new(step as f32, i as f32, 0.0);
                sender.send_sample(RemoteId(i), position).unwrap();
            }
        }
    });
    transport.join().unwrap();

    stepper.frame_steps(300);
    for (i, entity) in entities.into_iter().enumerate() {
        let state = stepper.state(entity);
        assert_eq!(state.position.backlog(), 0);
        let last = Vec3::new(5.0, i as f32, 0.0);
        assert!(state.position.rendered().distance(last) < POSITION_EPSILON);
    }
}

/// Samples arriving after the entity got despawned are dropped, and a new entity can reuse
/// the remote id
#[test]
fn test_despawn_and_respawn() {
    let mut stepper = InterpolationStepper::default();
    let first = stepper.spawn_remote(
        RemoteId(9),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    stepper.app.world_mut().despawn(first);
    stepper.sender.send_sample(RemoteId(9), Vec3::X).unwrap();
    stepper.frame_step();
    assert!(stepper.app.world().resource::<RemoteEntityMap>().is_empty());

    let second = stepper.spawn_remote(
        RemoteId(9),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    assert_eq!(
        stepper.app.world().resource::<RemoteEntityMap>().get(RemoteId(9)),
        Some(second)
    );
    stepper.sender.send_sample(RemoteId(9), Vec3::Y).unwrap();
    stepper.frame_step();
    // the sample sent before the respawn did not leak into the new entity
    assert_eq!(stepper.state(second).position.target(), Some(Vec3::Y));
    assert_eq!(stepper.state(second).position.backlog(), 1);
}

/// Locomotion updates sent through the channel select the lerp rate tier
#[test]
fn test_locomotion_through_channel() {
    let mut stepper = InterpolationStepper::default();
    let entity = stepper.spawn_remote(
        RemoteId(1),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    stepper
        .sender
        .send_locomotion(RemoteId(1), Locomotion::Walking)
        .unwrap();
    stepper
        .sender
        .send_sample(RemoteId(1), Vec3::new(20.0, 0.0, 0.0))
        .unwrap();
    stepper.frame_step();

    let state = stepper.state(entity);
    assert_eq!(state.locomotion(), Locomotion::Walking);
    assert_eq!(
        state.position.lerp_rate(),
        InterpolationConfig::default().position.walking
    );
}

/// Non-finite samples are rejected at the boundary and never reach the transform
#[test]
fn test_non_finite_samples_rejected() {
    let mut stepper = InterpolationStepper::default();
    let entity = stepper.spawn_remote(
        RemoteId(1),
        InterpolationMode::Direct,
        Vec3::ZERO,
        0.0,
    );
    stepper
        .sender
        .send_sample(RemoteId(1), Vec3::new(1.0, 0.0, 0.0))
        .unwrap();
    stepper
        .sender
        .send_sample(RemoteId(1), Vec3::new(f32::NAN, 0.0, 0.0))
        .unwrap();
    stepper
        .sender
        .send_sample(RemoteId(1), SampleValue::Yaw(f32::INFINITY))
        .unwrap();
    stepper.frame_steps(10);

    let state = stepper.state(entity);
    assert_eq!(state.position.target(), Some(Vec3::new(1.0, 0.0, 0.0)));
    assert_eq!(state.yaw.backlog(), 0);
    let transform = stepper.transform(entity);
    assert!(transform.translation.is_finite());
    assert!(transform.rotation.is_finite());
}
