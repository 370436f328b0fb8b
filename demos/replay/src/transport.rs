//! Simulated replication transport running on its own thread
use core::f32::consts::TAU;
use core::time::Duration;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use bevy_math::Vec3;
use driftline::prelude::*;
use rand::Rng;
use tracing::{debug, info};

/// Radius of the circle walked by every remote entity
const RADIUS: f32 = 8.0;
/// Angular speed (in radians per second) while running; walking is half as fast
const RUNNING_SPEED: f32 = 0.8;
/// Entities alternate between running and walking with this period
const LOCOMOTION_PERIOD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy)]
pub struct TransportSettings {
    pub entities: u64,
    pub send_interval: Duration,
    pub jitter: Duration,
}

/// Where the remote entity `id` is on its circle after `angle` radians
pub fn waypoint(id: u64, angle: f32) -> (Vec3, f32) {
    let phase = angle + id as f32 * TAU / 8.0;
    let position = Vec3::new(RADIUS * phase.cos(), 0.0, RADIUS * phase.sin());
    // face along the tangent of the circle
    let yaw = (-phase).to_degrees();
    (position, yaw)
}

/// Spawn the transport thread.
///
/// It keeps sending until `stop` is set or the app drops its receiver, and returns the number
/// of updates it sent.
pub fn spawn(
    settings: TransportSettings,
    sender: SampleSender,
    stop: Arc<AtomicBool>,
) -> JoinHandle<Result<usize, ChannelError>> {
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut sent = 0;
        let mut elapsed = Duration::ZERO;
        let mut angle = 0.0_f32;
        let mut locomotion = Locomotion::Running;
        while !stop.load(Ordering::Relaxed) {
            let jitter_ms = if settings.jitter.is_zero() {
                0
            } else {
                rng.random_range(0..settings.jitter.as_millis() as u64)
            };
            let wait = settings.send_interval + Duration::from_millis(jitter_ms);
            thread::sleep(wait);
            elapsed += wait;

            let next = if (elapsed.as_millis() / LOCOMOTION_PERIOD.as_millis()) % 2 == 0 {
                Locomotion::Running
            } else {
                Locomotion::Walking
            };
            let speed = match next {
                Locomotion::Running => RUNNING_SPEED,
                Locomotion::Walking => RUNNING_SPEED / 2.0,
            };
            angle += speed * wait.as_secs_f32();

            for id in 0..settings.entities {
                let remote = RemoteId(id);
                if next != locomotion {
                    sender.send_locomotion(remote, next)?;
                    sent += 1;
                }
                let (position, yaw) = waypoint(id, angle);
                sender.send_sample(remote, position)?;
                sender.send_sample(remote, SampleValue::Yaw(yaw))?;
                sent += 2;
            }
            if next != locomotion {
                debug!(?next, "remote entities changed locomotion");
                locomotion = next;
            }
        }
        info!(sent, "transport stopped");
        Ok(sent)
    })
}
