/*! # Driftline tests

Helpers to drive a bevy `App` with the driftline plugins frame by frame, and the integration
tests built on top of them.
*/

pub mod stepper;

#[cfg(test)]
mod inbound;
#[cfg(test)]
mod interpolation;
