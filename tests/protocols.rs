//! Protocol equivalence: every protocol, on either layout, yields the same
//! elements in the same order as Push-Visit

mod common;

use chunkseq::{sum_values, ArraySequence, Cursor, Element, LinkedSequence, NextValue, Sequence};
use common::*;
use test_case::test_case;

#[test_case(Protocol::Walk ; "walk")]
#[test_case(Protocol::Pull ; "pull")]
#[test_case(Protocol::TestThenRead ; "test then read")]
#[test_case(Protocol::AdvanceThenRead ; "advance then read")]
#[test_case(Protocol::DynNextValue ; "dyn next value")]
#[test_case(Protocol::Channel ; "channel")]
#[test_case(Protocol::Cancellable ; "cancellable channel")]
#[test_case(Protocol::Relay ; "relay channel")]
#[test_case(Protocol::Fill(1) ; "fill by one")]
#[test_case(Protocol::Fill(4) ; "fill by four")]
fn three_chunks_of_two_yield_zero_to_five(protocol: Protocol) {
    for layout in LAYOUTS {
        let items = drain(layout, protocol, 3, 2, identity);
        assert_eq!(items, vec![0, 1, 2, 3, 4, 5], "{layout:?} via {protocol:?}");
        assert_eq!(items.iter().sum::<Element>(), 15);
    }
}

#[test_case(Protocol::Walk ; "walk")]
#[test_case(Protocol::Pull ; "pull")]
#[test_case(Protocol::TestThenRead ; "test then read")]
#[test_case(Protocol::AdvanceThenRead ; "advance then read")]
#[test_case(Protocol::DynNextValue ; "dyn next value")]
#[test_case(Protocol::Channel ; "channel")]
#[test_case(Protocol::Cancellable ; "cancellable channel")]
#[test_case(Protocol::Relay ; "relay channel")]
#[test_case(Protocol::Fill(2) ; "fill")]
fn empty_shapes_yield_nothing(protocol: Protocol) {
    for layout in LAYOUTS {
        assert!(drain(layout, protocol, 0, 2, identity).is_empty(), "no chunks, {layout:?} via {protocol:?}");
        assert!(drain(layout, protocol, 3, 0, identity).is_empty(), "empty chunks, {layout:?} via {protocol:?}");
    }
}

#[test]
fn checksum_is_identical_across_protocols_and_layouts() {
    init_test_logging();
    let generator: fn(usize) -> Element = |k| (k as Element * 7) - 300;
    let reference = array(37, 29, generator).to_vec();
    let expected: Element = reference.iter().sum();

    for layout in LAYOUTS {
        for protocol in PROTOCOLS {
            let items = drain(layout, protocol, 37, 29, generator);
            assert_eq!(items, reference, "{layout:?} via {protocol:?}");
            assert_eq!(items.iter().sum::<Element>(), expected);
        }
    }
    assert_eq!(array(37, 29, generator).checksum(), expected);
    assert_eq!(linked(37, 29, generator).checksum(), expected);
}

#[test]
fn walk_stops_at_requested_value() {
    for layout in LAYOUTS {
        let mut seen = Vec::new();
        let completed = match layout {
            Layout::Array => array(3, 2, identity).walk(|item| {
                seen.push(item);
                item != 2
            }),
            Layout::Linked => linked(3, 2, identity).walk(|item| {
                seen.push(item);
                item != 2
            }),
        };
        assert!(!completed);
        assert_eq!(seen, vec![0, 1, 2], "{layout:?}");
    }
}

#[test]
fn walk_stop_on_last_element_of_a_chunk_skips_later_chunks() {
    let seq = linked(4, 3, identity);
    let mut seen = Vec::new();
    assert!(!seq.walk(|item| {
        seen.push(item);
        item != 5
    }));
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn walk_returns_true_when_every_element_is_visited() {
    assert!(array(2, 2, identity).walk(|_| true));
    assert!(linked(2, 2, identity).walk(|_| true));
}

#[test]
fn generic_consumer_drives_any_pull_source() {
    let seq = array(5, 5, identity);
    let list = linked(5, 5, identity);
    let expected = seq.checksum();

    let mut sources: Vec<Box<dyn NextValue + '_>> = vec![
        Box::new(seq.pull()),
        Box::new(seq.cursor()),
        Box::new(list.pull()),
        Box::new(list.cursor()),
    ];
    for source in &mut sources {
        assert_eq!(sum_values(source), expected);
        assert_eq!(source.next_value(), None);
    }
}

#[test]
fn independent_cursors_do_not_interfere() {
    let seq = ArraySequence::build(2, 3, identity).unwrap();
    let mut first = seq.cursor();
    let mut second = seq.cursor();

    assert!(first.advance());
    assert!(first.advance());
    assert_eq!(first.value(), 1);
    assert!(second.has_next());
    assert_eq!(second.read_next(), 0);
    assert!(first.advance());
    assert_eq!(first.value(), 2);
    assert_eq!(second.values().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn closure_shape_matches_pull_object() {
    let seq = LinkedSequence::build(3, 3, identity).unwrap();
    let mut next = seq.pull().into_fn();
    let mut seen = Vec::new();
    while let Some(item) = next() {
        seen.push(item);
    }
    assert_eq!(seen, seq.to_vec());
    for _ in 0..3 {
        assert_eq!(next(), None);
    }
}
