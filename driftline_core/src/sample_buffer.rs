//! FIFO queue of received samples awaiting consumption
use std::collections::VecDeque;

/// SampleBuffer stores the samples received for one track of a remote entity.
///
/// Samples are only ever appended at the back and consumed from the front:
/// the buffer is never reordered, the order is the arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T> {
    // The front contains the oldest unconsumed sample, the back the most recently received one.
    buffer: VecDeque<T>,
}

impl<T> Default for SampleBuffer<T> {
    fn default() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }
}

impl<T> SampleBuffer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample at the back of the buffer
    pub fn push(&mut self, sample: T) {
        self.buffer.push_back(sample);
    }

    /// Drop every buffered sample and keep only `sample`.
    ///
    /// Used when the buffer is collapsed to a single live target.
    pub fn replace(&mut self, sample: T) {
        self.buffer.clear();
        self.buffer.push_back(sample);
    }

    /// Oldest unconsumed sample, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.buffer.front()
    }

    /// Most recently received sample
    pub fn latest(&self) -> Option<&T> {
        self.buffer.back()
    }

    /// Remove and return the oldest sample
    pub fn pop(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate from the oldest to the most recent sample
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }
}

impl<T> Extend<T> for SampleBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buffer.extend(iter);
    }
}

impl<T> FromIterator<T> for SampleBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            buffer: iter.into_iter().collect(),
        }
    }
}
