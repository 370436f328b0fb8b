/*! # Driftline

Driftline smooths the rendering of remote entities on a client.

The replication transport (not part of this crate) pushes authoritative positions and rotations
for every remote entity. Instead of snapping to those values, driftline buffers them per entity
and moves the rendered transform toward them every frame, either replaying every received sample
in order ([`InterpolationMode::Historical`](prelude::InterpolationMode::Historical)) or always
chasing the latest one ([`InterpolationMode::Direct`](prelude::InterpolationMode::Direct)).

```rust,ignore
use bevy::prelude::*;
use driftline::prelude::*;

let (sender, receiver) = driftline::crossbeam::channel();
let mut app = App::new();
app.add_plugins((MinimalPlugins, DriftlinePlugins::default().with_receiver(receiver)));
app.world_mut().spawn((
    RemoteId(42),
    RemoteEntityState::historical(Vec3::ZERO, 0.0, 0.0),
    Transform::default(),
));

// from the network thread
sender.send_sample(RemoteId(42), Vec3::new(1.0, 0.0, 0.0)).unwrap();
```
*/
#![allow(clippy::type_complexity)]
// only enables the `doc_cfg` feature when
// the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]

mod plugins;
pub use plugins::DriftlinePlugins;

/// Sample types, buffers and the lerp-rate schedule
pub mod core {
    pub use driftline_core::*;
}

/// Per-entity interpolation state and the bevy plugin driving it
pub mod interpolation {
    pub use driftline_interpolation::*;
}

/// Thread-safe inbound channel
#[cfg(feature = "crossbeam")]
pub mod crossbeam {
    pub use driftline_crossbeam::*;
}

/// Prelude containing commonly used types
pub mod prelude {
    pub use crate::plugins::DriftlinePlugins;
    pub use driftline_core::prelude::*;
    pub use driftline_interpolation::prelude::*;

    #[cfg(feature = "crossbeam")]
    pub use driftline_crossbeam::{
        ChannelError, CrossbeamInboundPlugin, SampleReceiver, SampleSender,
    };
}
