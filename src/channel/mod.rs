//! Producer/consumer iteration over a bounded pipe
//!
//! Every call spawns exactly one background producer thread that walks the
//! sequence in global order, pushes each element into a bounded pipe and
//! closes the pipe by dropping its sender. The consumer drains the returned
//! [`ChannelStream`] until it reports closed. The relay variant's producer
//! additionally runs one scoped helper per chunk, each joined before the
//! producer moves to the next chunk.
//!
//! Backpressure: the producer blocks once the pipe holds `capacity` elements,
//! so memory stays bounded whatever the sequence size.
//!
//! ## Abandoning a plain stream
//!
//! The plain protocol has no stop signal. A stream that is kept alive but no
//! longer drained leaves its producer parked on the full pipe for as long as
//! the stream lives, pinning up to `capacity` elements. Dropping the stream
//! disconnects the pipe, and the parked producer wakes with a send error and
//! exits. Joining an undrained plain stream blocks forever. Consumers that may
//! stop early should use [`ChannelIterate::cancellable_channel_iter`].

pub mod cancel;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, Sender};
use tracing::{debug, trace};

use crate::config::PipeConfig;
use crate::protocol::{NextValue, Sequence};
use crate::{Element, SequenceError};

use self::cancel::CancelSignal;

/// Receiving end of a channel protocol, paired with its producer thread
#[derive(Debug)]
pub struct ChannelStream {
    pipe: Receiver<Element>,
    producer: JoinHandle<()>,
}

impl ChannelStream {
    fn spawn<F>(config: &PipeConfig, produce: F) -> Self
    where
        F: FnOnce(Sender<Element>) + Send + 'static,
    {
        let (sender, pipe) = bounded(config.capacity());
        let producer = thread::spawn(move || produce(sender));
        Self { pipe, producer }
    }

    /// Block for the next element; `None` once the pipe is closed and drained
    ///
    /// Keeps returning `None` after the stream has reported closed.
    #[inline]
    pub fn recv(&self) -> Option<Element> {
        self.pipe.recv().ok()
    }

    /// Number of pipe slots
    pub fn capacity(&self) -> usize {
        self.pipe.capacity().unwrap_or_default()
    }

    /// Elements currently buffered in the pipe
    pub fn buffered(&self) -> usize {
        self.pipe.len()
    }

    /// Whether the producer thread has exited
    pub fn is_producer_finished(&self) -> bool {
        self.producer.is_finished()
    }

    /// Wait for the producer thread to exit
    ///
    /// The pipe stays open while waiting, so call this only on a stream that
    /// was drained to the end or whose cancel signal has fired.
    pub fn join(self) -> Result<(), SequenceError> {
        let Self { pipe, producer } = self;
        let joined = producer.join();
        drop(pipe);
        joined.map_err(|_| SequenceError::ProducerPanicked)
    }

    /// Split into the raw receiver and the producer's join handle
    pub fn into_parts(self) -> (Receiver<Element>, JoinHandle<()>) {
        (self.pipe, self.producer)
    }
}

impl Iterator for ChannelStream {
    type Item = Element;

    #[inline]
    fn next(&mut self) -> Option<Element> {
        self.recv()
    }
}

impl std::iter::FusedIterator for ChannelStream {}

impl NextValue for ChannelStream {
    #[inline]
    fn next_value(&mut self) -> Option<Element> {
        self.recv()
    }
}

/// Channel protocols for a shared, read-only sequence
///
/// Implemented for `Arc<S>` so the producer can hold the sequence for as long
/// as it runs, independently of the caller.
pub trait ChannelIterate {
    /// Plain Channel-Pull with the default pipe
    fn channel_iter(&self) -> ChannelStream {
        self.channel_iter_with(&PipeConfig::default())
    }

    /// Plain Channel-Pull with an explicit pipe configuration
    fn channel_iter_with(&self, config: &PipeConfig) -> ChannelStream;

    /// Cancellable Channel-Pull with the default pipe
    fn cancellable_channel_iter(&self, cancel: CancelSignal) -> ChannelStream {
        self.cancellable_channel_iter_with(cancel, &PipeConfig::default())
    }

    /// Cancellable Channel-Pull with an explicit pipe configuration
    ///
    /// Once `cancel` fires the producer emits at most the element it was
    /// already offering, closes the pipe and exits.
    fn cancellable_channel_iter_with(&self, cancel: CancelSignal, config: &PipeConfig) -> ChannelStream;

    /// Channel-Pull relayed through one short-lived producer per chunk
    fn relay_channel_iter(&self) -> ChannelStream {
        self.relay_channel_iter_with(&PipeConfig::default())
    }

    /// Relayed Channel-Pull with an explicit configuration for every pipe
    fn relay_channel_iter_with(&self, config: &PipeConfig) -> ChannelStream;
}

impl<S: Sequence> ChannelIterate for Arc<S> {
    fn channel_iter_with(&self, config: &PipeConfig) -> ChannelStream {
        let seq = Arc::clone(self);
        ChannelStream::spawn(config, move |pipe| {
            let mut emitted = 0usize;
            let completed = seq.walk(|item| {
                // A send error means the stream was dropped
                let sent = pipe.send(item).is_ok();
                emitted += usize::from(sent);
                sent
            });
            trace!(emitted, completed, "channel producer finished");
        })
    }

    fn cancellable_channel_iter_with(&self, cancel: CancelSignal, config: &PipeConfig) -> ChannelStream {
        let seq = Arc::clone(self);
        ChannelStream::spawn(config, move |pipe| {
            let timer = cancel.timer();
            let mut emitted = 0usize;
            let mut cancelled = false;

            let completed = seq.walk(|item| {
                if cancel.is_cancelled() {
                    cancelled = true;
                    return false;
                }
                select! {
                    send(pipe, item) -> res => {
                        let sent = res.is_ok();
                        emitted += usize::from(sent);
                        sent
                    }
                    recv(cancel.done()) -> _ => {
                        cancelled = true;
                        false
                    }
                    recv(timer) -> _ => {
                        cancelled = true;
                        false
                    }
                }
            });

            if cancelled {
                debug!(emitted, "channel producer observed cancellation");
            }
            trace!(emitted, completed, "channel producer finished");
        })
    }

    fn relay_channel_iter_with(&self, config: &PipeConfig) -> ChannelStream {
        let seq = Arc::clone(self);
        let capacity = config.capacity();
        ChannelStream::spawn(config, move |pipe| {
            let mut relayed = 0usize;
            let completed = seq.walk_chunks(|chunk| {
                // The chunk producer is joined before the scope returns, so
                // none outlives the outer producer
                thread::scope(|scope| {
                    let (chunk_sender, chunk_pipe) = bounded(capacity);
                    scope.spawn(move || {
                        chunk.walk(&mut |item| chunk_sender.send(item).is_ok());
                    });
                    for item in &chunk_pipe {
                        if pipe.send(item).is_err() {
                            // Dropping `chunk_pipe` on return unblocks the
                            // chunk producer if it is still sending
                            return false;
                        }
                        relayed += 1;
                    }
                    true
                })
            });
            trace!(relayed, completed, "relay producer finished");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArraySequence;

    fn sample() -> Arc<ArraySequence> {
        Arc::new(ArraySequence::build(3, 2, |k| k as Element).unwrap())
    }

    #[test]
    fn test_plain_stream_drains_in_order() {
        let seq = sample();
        let mut stream = seq.channel_iter();
        let drained: Vec<_> = stream.by_ref().collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(stream.recv(), None);
        assert_eq!(stream.capacity(), crate::DEFAULT_PIPE_CAPACITY);
        stream.join().unwrap();
    }

    #[test]
    fn test_relay_stream_drains_in_order() {
        let seq = sample();
        let mut stream = seq.relay_channel_iter_with(&PipeConfig::new(1).unwrap());
        assert_eq!(stream.by_ref().collect::<Vec<_>>(), seq.to_vec());
        stream.join().unwrap();
    }

    #[test]
    fn test_cancelled_before_start_emits_nothing() {
        let seq = sample();
        let (handle, signal) = cancel::cancellation();
        handle.cancel();
        let mut stream = seq.cancellable_channel_iter(signal);
        assert_eq!(stream.next_value(), None);
        stream.join().unwrap();
    }
}
