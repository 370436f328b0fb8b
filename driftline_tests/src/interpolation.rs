use crate::stepper::InterpolationStepper;
use approx::assert_relative_eq;
use bevy_math::Vec3;
use core::time::Duration;
use driftline::prelude::*;
use test_log::test;

/// Two waypoints with a lerp rate of 13 and 0.1s frames:
/// both are visited in order and the buffer ends up empty.
#[test]
fn test_two_waypoints_scenario() {
    let rates = RateTiers::new(13.0, 13.0, 13.0);
    let mut stepper = InterpolationStepper::new(
        InterpolationConfig::default().with_position_rates(rates),
        Duration::from_millis(100),
    );
    let entity = stepper.spawn_remote(
        RemoteId(0),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    stepper.receive(entity, Vec3::ZERO);
    stepper.receive(entity, Vec3::new(10.0, 0.0, 0.0));

    stepper.frame_steps(50);

    let state = stepper.state(entity);
    assert!(state.position.buffer().is_empty());
    assert!(
        state
            .position
            .rendered()
            .distance(Vec3::new(10.0, 0.0, 0.0))
            < POSITION_EPSILON
    );
    assert!(
        stepper
            .transform(entity)
            .translation
            .distance(Vec3::new(10.0, 0.0, 0.0))
            < POSITION_EPSILON
    );
}

/// Historical mode visits every waypoint: the rendered position comes within epsilon of
/// each of them, in order
#[test]
fn test_historical_visits_every_waypoint() {
    let mut stepper = InterpolationStepper::default();
    let entity = stepper.spawn_remote(
        RemoteId(0),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    // a detour that direct mode would cut through
    let path = [
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(5.0, 0.0, 5.0),
        Vec3::new(5.0, 0.0, 0.0),
    ];
    for waypoint in path {
        stepper.receive(entity, waypoint);
    }

    let mut next = 0;
    for _ in 0..600 {
        stepper.frame_step();
        let rendered = stepper.state(entity).position.rendered();
        if next < path.len() && rendered.distance(path[next]) < POSITION_EPSILON {
            next += 1;
        }
    }
    assert_eq!(next, path.len());
    assert_eq!(stepper.state(entity).position.backlog(), 0);
}

/// Without samples, ticking leaves the rendered transform untouched
#[test]
fn test_no_samples_no_movement() {
    let mut stepper = InterpolationStepper::default();
    let spawn = Vec3::new(3.0, 1.0, -2.0);
    let entity = stepper.spawn_remote(RemoteId(0), InterpolationMode::Historical, spawn, 30.0);
    stepper.frame_steps(20);
    let state = stepper.state(entity);
    assert_eq!(state.position.rendered(), spawn);
    assert_relative_eq!(state.yaw.rendered().degrees(), 30.0);
    assert_eq!(stepper.transform(entity).translation, spawn);
}

/// A backlog above the threshold makes the entity catch up with the faster rate,
/// and it goes back to the locomotion tier once the backlog is consumed
#[test]
fn test_backlog_catch_up() {
    let config = InterpolationConfig::default();
    let mut stepper = InterpolationStepper::new(config, Duration::from_millis(16));
    let entity = stepper.spawn_remote(
        RemoteId(0),
        InterpolationMode::Historical,
        Vec3::ZERO,
        0.0,
    );
    stepper.state_mut(entity).set_locomotion(Locomotion::Walking);
    for i in 1..=11 {
        stepper.receive(entity, Vec3::new(i as f32, 0.0, 0.0));
    }

    stepper.frame_step();
    assert_relative_eq!(
        stepper.state(entity).position.lerp_rate(),
        config.position.faster
    );

    let mut caught_up = false;
    for _ in 0..600 {
        stepper.frame_step();
        let state = stepper.state(entity);
        if state.position.backlog() <= BACKLOG_THRESHOLD && state.position.backlog() > 0 {
            // the rate is picked from the backlog at the start of the tick
            stepper.frame_step();
            assert_relative_eq!(
                stepper.state(entity).position.lerp_rate(),
                config.position.walking
            );
            caught_up = true;
            break;
        }
    }
    assert!(caught_up);
}

/// Direct mode chases the latest sample: the intermediate samples are skipped
#[test]
fn test_direct_mode_skips_intermediate_samples() {
    let mut stepper = InterpolationStepper::default();
    let entity = stepper.spawn_remote(RemoteId(0), InterpolationMode::Direct, Vec3::ZERO, 0.0);
    stepper.receive(entity, Vec3::new(0.0, 0.0, 5.0));
    stepper.receive(entity, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(stepper.state(entity).position.backlog(), 1);

    let target = Vec3::new(5.0, 0.0, 0.0);
    let mut previous = stepper.state(entity).position.rendered().distance(target);
    for _ in 0..120 {
        stepper.frame_step();
        let rendered = stepper.state(entity).position.rendered();
        // straight line toward the latest target
        assert!(rendered.z.abs() < 1e-4);
        let distance = rendered.distance(target);
        assert!(distance <= previous + 1e-5);
        previous = distance;
    }
    assert!(previous < POSITION_EPSILON);
}

/// Rotation is written to the transform from the independent yaw and pitch tracks
#[test]
fn test_rotation_tracks() {
    let mut stepper = InterpolationStepper::default();
    let entity = stepper.spawn_remote(
        RemoteId(0),
        InterpolationMode::Historical,
        Vec3::ZERO,
        350.0,
    );
    stepper.receive(entity, SampleValue::Yaw(20.0));
    stepper.receive(entity, SampleValue::Pitch(-15.0));
    stepper.frame_steps(120);

    let state = stepper.state(entity);
    assert!(state.yaw.rendered().distance_to(Angle::new(20.0)) < ROTATION_EPSILON);
    assert!(state.pitch.rendered().distance_to(Angle::new(-15.0)) < ROTATION_EPSILON);
    assert_eq!(state.yaw.backlog(), 0);
    assert_eq!(state.pitch.backlog(), 0);

    let expected = state.rendered_transform().rotation;
    let rotation = stepper.transform(entity).rotation;
    assert_relative_eq!(rotation.angle_between(expected), 0.0, epsilon = 1e-4);
}
