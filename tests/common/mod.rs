//! Shared helpers: build either layout and drain it through any protocol
#![allow(dead_code)]

use std::sync::Arc;

use chunkseq::{
    ArraySequence, CancelSignal, ChannelIterate, Cursor, Element, Fill, LinkedSequence, NextValue,
    Sequence,
};

/// Storage layouts under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Array,
    Linked,
}

pub const LAYOUTS: [Layout; 2] = [Layout::Array, Layout::Linked];

/// Every way of draining a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Walk,
    Pull,
    TestThenRead,
    AdvanceThenRead,
    DynNextValue,
    Channel,
    Cancellable,
    Relay,
    Fill(usize),
}

pub const PROTOCOLS: [Protocol; 9] = [
    Protocol::Walk,
    Protocol::Pull,
    Protocol::TestThenRead,
    Protocol::AdvanceThenRead,
    Protocol::DynNextValue,
    Protocol::Channel,
    Protocol::Cancellable,
    Protocol::Relay,
    Protocol::Fill(3),
];

pub fn identity(k: usize) -> Element {
    k as Element
}

/// Install a test-writer subscriber; safe to call from every test
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

pub fn array(chunk_count: usize, chunk_size: usize, generator: fn(usize) -> Element) -> Arc<ArraySequence> {
    Arc::new(ArraySequence::build(chunk_count, chunk_size, generator).expect("valid shape"))
}

pub fn linked(chunk_count: usize, chunk_size: usize, generator: fn(usize) -> Element) -> Arc<LinkedSequence> {
    Arc::new(LinkedSequence::build(chunk_count, chunk_size, generator).expect("valid shape"))
}

/// Build `layout` and drain it through `protocol`
pub fn drain(
    layout: Layout,
    protocol: Protocol,
    chunk_count: usize,
    chunk_size: usize,
    generator: fn(usize) -> Element,
) -> Vec<Element> {
    match layout {
        Layout::Array => drain_sequence(&array(chunk_count, chunk_size, generator), protocol),
        Layout::Linked => drain_sequence(&linked(chunk_count, chunk_size, generator), protocol),
    }
}

/// Drain `seq` through `protocol`, checking that pull-style protocols stay
/// exhausted and that channel producers terminate
pub fn drain_sequence<S: Sequence>(seq: &Arc<S>, protocol: Protocol) -> Vec<Element> {
    let mut items = Vec::new();
    match protocol {
        Protocol::Walk => {
            assert!(seq.walk(|item| {
                items.push(item);
                true
            }));
        }
        Protocol::Pull => {
            let mut pull = seq.pull();
            while let Some(item) = pull.next_value() {
                items.push(item);
            }
            assert_stays_exhausted(&mut pull);
        }
        Protocol::TestThenRead => {
            let mut cursor = seq.cursor();
            while cursor.has_next() {
                items.push(cursor.read_next());
            }
            assert!(!cursor.has_next());
        }
        Protocol::AdvanceThenRead => {
            let mut cursor = seq.cursor();
            while cursor.advance() {
                items.push(cursor.value());
            }
            assert!(!cursor.advance());
        }
        Protocol::DynNextValue => {
            let mut cursor = seq.cursor();
            let source: &mut dyn NextValue = &mut cursor;
            while let Some(item) = source.next_value() {
                items.push(item);
            }
            assert_stays_exhausted(source);
        }
        Protocol::Channel => {
            let mut stream = seq.channel_iter();
            items.extend(stream.by_ref());
            assert_stays_exhausted(&mut stream);
            stream.join().expect("producer terminates");
        }
        Protocol::Cancellable => {
            let mut stream = seq.cancellable_channel_iter(CancelSignal::never());
            items.extend(stream.by_ref());
            assert_stays_exhausted(&mut stream);
            stream.join().expect("producer terminates");
        }
        Protocol::Relay => {
            let mut stream = seq.relay_channel_iter();
            items.extend(stream.by_ref());
            assert_stays_exhausted(&mut stream);
            stream.join().expect("producer terminates");
        }
        Protocol::Fill(len) => {
            items = fill_all(&mut seq.filler(), len);
        }
    }
    items
}

/// Drain a filler with `len`-sized buffers, checking the short-read rule
pub fn fill_all<F: Fill>(filler: &mut F, len: usize) -> Vec<Element> {
    let mut buf = vec![Element::MIN; len];
    let mut items = Vec::new();
    loop {
        let n = filler.fill(&mut buf);
        assert!(n <= len, "fill wrote {n} into a buffer of {len}");
        if n == 0 {
            break;
        }
        items.extend_from_slice(&buf[..n]);
        if n < len {
            assert_eq!(filler.fill(&mut buf), 0, "short fill must be followed by 0");
            break;
        }
    }
    assert_eq!(filler.fill(&mut buf), 0);
    items
}

pub fn assert_stays_exhausted<N: NextValue + ?Sized>(source: &mut N) {
    for _ in 0..3 {
        assert_eq!(source.next_value(), None);
    }
}
