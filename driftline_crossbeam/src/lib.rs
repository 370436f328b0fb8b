/*! # Driftline Crossbeam

Thread-safe inbound path for driftline.

The replication transport usually reads the network on a background thread. It pushes the updates
it decodes through a [`SampleSender`]; the [`CrossbeamInboundPlugin`] drains them on the
update thread, right before interpolation runs, so the entity buffers are only ever touched
by a single thread.
*/

use bevy_app::{App, Plugin, Update};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use driftline_core::prelude::*;
use driftline_interpolation::prelude::*;
use tracing::{debug, error, trace};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The receiving side (the app) has been dropped
    #[error("the inbound sample channel is disconnected")]
    Disconnected,
}

/// Sending half of the inbound channel. Can be cloned and moved to any thread.
#[derive(Clone, Debug)]
pub struct SampleSender {
    sender: Sender<InboundUpdate>,
}

impl SampleSender {
    pub fn send(&self, update: InboundUpdate) -> Result<(), ChannelError> {
        self.sender
            .send(update)
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Equivalent of `OnSampleReceived(entity, kind, value)`
    pub fn send_sample(
        &self,
        remote: RemoteId,
        sample: impl Into<SampleValue>,
    ) -> Result<(), ChannelError> {
        self.send(InboundUpdate::sample(remote, sample))
    }

    pub fn send_locomotion(
        &self,
        remote: RemoteId,
        locomotion: Locomotion,
    ) -> Result<(), ChannelError> {
        self.send(InboundUpdate::locomotion(remote, locomotion))
    }
}

/// Receiving half of the inbound channel, drained every frame on the update thread
#[derive(Resource, Clone, Debug)]
pub struct SampleReceiver {
    receiver: Receiver<InboundUpdate>,
    disconnected: bool,
}

impl SampleReceiver {
    /// Number of updates waiting to be drained
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Create an unbounded inbound channel
pub fn channel() -> (SampleSender, SampleReceiver) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (
        SampleSender { sender },
        SampleReceiver {
            receiver,
            disconnected: false,
        },
    )
}

pub struct CrossbeamInboundPlugin {
    receiver: SampleReceiver,
}

impl CrossbeamInboundPlugin {
    pub fn new(receiver: SampleReceiver) -> Self {
        Self { receiver }
    }

    fn receive(
        mut receiver: ResMut<SampleReceiver>,
        entity_map: Res<RemoteEntityMap>,
        mut states: Query<&mut RemoteEntityState>,
    ) {
        let mut received = 0;
        loop {
            match receiver.receiver.try_recv() {
                Ok(update) => {
                    received += 1;
                    match apply_inbound(update, &entity_map, &mut states) {
                        Ok(()) => {}
                        // non-finite samples are already reported by the track
                        Err(InboundError::Sample(_)) => {}
                        Err(e) => debug!(?e, "dropping inbound update"),
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !receiver.disconnected {
                        error!("inbound sample channel is disconnected");
                        receiver.disconnected = true;
                    }
                    break;
                }
            }
        }
        if received > 0 {
            trace!(received, "drained inbound updates");
        }
    }
}

impl Plugin for CrossbeamInboundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.receiver.clone());
        app.add_systems(
            Update,
            Self::receive.in_set(InterpolationSystems::Receive),
        );
    }
}
