use bevy_app::{PluginGroup, PluginGroupBuilder};
use driftline_interpolation::{InterpolationConfig, InterpolationPlugin};

/// A plugin group containing all the driftline plugins.
///
/// By default, the following plugins will be added:
/// - [`InterpolationPlugin`]: interpolates every entity with a `RemoteEntityState`
/// - `CrossbeamInboundPlugin` (with the `crossbeam` feature): drains the inbound channel created
///   with `driftline::crossbeam::channel()`. Only added if a receiver was provided.
#[derive(Default)]
pub struct DriftlinePlugins {
    pub config: InterpolationConfig,
    #[cfg(feature = "crossbeam")]
    pub receiver: Option<driftline_crossbeam::SampleReceiver>,
}

impl DriftlinePlugins {
    pub fn new(config: InterpolationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    #[cfg(feature = "crossbeam")]
    pub fn with_receiver(mut self, receiver: driftline_crossbeam::SampleReceiver) -> Self {
        self.receiver = Some(receiver);
        self
    }
}

impl PluginGroup for DriftlinePlugins {
    #[allow(clippy::let_and_return)]
    fn build(self) -> PluginGroupBuilder {
        let builder = PluginGroupBuilder::start::<Self>();
        let builder = builder.add(InterpolationPlugin::new(self.config));

        #[cfg(feature = "crossbeam")]
        let builder = match self.receiver {
            Some(receiver) => {
                builder.add(driftline_crossbeam::CrossbeamInboundPlugin::new(receiver))
            }
            None => builder,
        };

        builder
    }
}
