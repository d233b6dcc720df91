//! Fire-once listeners.

use chime::{Callback, Context, Dispatcher, testing::CallCounter};
use rstest::rstest;
use std::{cell::Cell, rc::Rc};

mod common;
use common::{Session, Trace};

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn test_only_emits_once(#[case] emissions: usize) {
    let d = Dispatcher::<&str, ()>::new();
    let counter = CallCounter::new();
    d.once("foo", counter.callback());

    for _ in 0..emissions {
        d.emit("foo", ()).unwrap();
    }

    assert!(d.listeners("foo").is_empty());
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_once_is_gone_after_first_emission() {
    let d = Dispatcher::<&str, ()>::new();
    let counter = CallCounter::new();
    d.once("foo", counter.callback());

    assert!(d.emit("foo", ()).unwrap());
    assert!(d.listeners("foo").is_empty());
    assert!(!d.emit("foo", ()).unwrap());
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_nested_emit_does_not_refire() {
    let d = Dispatcher::<&str, ()>::new();
    let calls = Rc::new(Cell::new(0));
    let cb = {
        let calls = calls.clone();
        Callback::fallible(move |call| {
            calls.set(calls.get() + 1);
            let owner = call.owner().expect("bound to its dispatcher");
            assert!(!owner.emit("foo", ())?);
            Ok(())
        })
    };
    d.once("foo", cb);

    assert!(d.emit("foo", ()).unwrap());
    assert!(d.listeners("foo").is_empty());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_sibling_once_listeners_fire_once_under_reentry() {
    let d = Dispatcher::<&str, ()>::new();
    let trace = Trace::new();
    let reemit = {
        let trace = trace.clone();
        Callback::fallible(move |call| {
            trace.push("a");
            call.owner().expect("bound to its dispatcher").emit("foo", ())?;
            Ok(())
        })
    };
    d.once("foo", reemit);
    d.once("foo", trace.label("b"));

    d.emit("foo", ()).unwrap();
    assert_eq!(trace.joined(), "a;b");
    assert!(d.is_empty());
}

#[test]
fn test_only_emits_once_for_multiple_listeners() {
    let d = Dispatcher::<&str, ()>::new();
    let (foo, bar, multi) = (CallCounter::new(), CallCounter::new(), CallCounter::new());
    d.once("foo", foo.callback());
    d.once("foo", bar.callback());
    d.on("foo", multi.callback());

    for _ in 0..5 {
        d.emit("foo", ()).unwrap();
    }

    assert_eq!(d.listeners("foo").len(), 1);
    assert_eq!(multi.count(), 5);
    assert_eq!(foo.count(), 1);
    assert_eq!(bar.count(), 1);
}

#[test]
fn test_once_with_context() {
    let d = Dispatcher::<&str, ()>::new();
    let trace = Trace::new();
    d.once_with("foo", trace.receiver(), Context::new(Session { name: "ctx" }));

    d.emit("foo", ()).unwrap();
    d.emit("foo", ()).unwrap();
    assert_eq!(trace.entries(), vec!["ctx"]);
}

#[test]
fn test_once_on_wildcard() {
    let d = Dispatcher::<&str, ()>::new();
    let counter = CallCounter::new();
    d.once(chime::Channel::Wildcard, counter.callback());

    d.emit("a", ()).unwrap();
    d.emit("b", ()).unwrap();
    assert_eq!(counter.count(), 1);
    assert!(d.is_empty());
}
