use crate::sample::SampleKind;

/// Errors returned when a received sample cannot be buffered
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// The sample contains a NaN or infinite component.
    /// It is dropped so that it never propagates into the rendered value.
    #[error("rejected a non-finite {kind} sample")]
    NonFinite { kind: SampleKind },
}
