//! Listeners that modify or re-enter the dispatcher while it delivers.

use chime::{Callback, Channel, Dispatcher, Matcher, testing::CallCounter};
use std::{cell::OnceCell, rc::Rc};

mod common;
use common::Trace;

#[test]
fn test_listener_added_during_emit_waits_for_next_round() {
    let d = Dispatcher::<&str, ()>::new();
    let late = CallCounter::new();
    let adder = {
        let late = late.clone();
        Callback::new(move |call| {
            let owner = call.owner().expect("bound to its dispatcher");
            owner.on(Channel::Event("foo"), late.callback(), None);
        })
    };
    d.once("foo", adder);

    d.emit("foo", ()).unwrap();
    assert_eq!(late.count(), 0);
    assert_eq!(d.listeners("foo").len(), 1);

    d.emit("foo", ()).unwrap();
    assert_eq!(late.count(), 1);
}

#[test]
fn test_removed_sibling_still_fires_in_current_round() {
    let d = Dispatcher::<&str, ()>::new();
    let trace = Trace::new();
    let second = trace.label("second");
    let remover = {
        let trace = trace.clone();
        let second = second.clone();
        Callback::new(move |call| {
            trace.push("first");
            call.owner()
                .expect("bound to its dispatcher")
                .remove_listener(Channel::Event("foo"), &Matcher::callback(&second));
        })
    };
    d.on("foo", remover).on("foo", second);

    d.emit("foo", ()).unwrap();
    assert_eq!(trace.joined(), "first;second");

    d.emit("foo", ()).unwrap();
    assert_eq!(trace.joined(), "first;second;first");
}

#[test]
fn test_listener_removing_itself() {
    let d = Dispatcher::<&str, ()>::new();
    let counter = CallCounter::new();
    let slot: Rc<OnceCell<Callback<&str, ()>>> = Rc::default();
    let selfish = {
        let counter = counter.clone();
        let slot = slot.clone();
        let tick = counter.callback();
        Callback::fallible(move |call| {
            tick.call(call)?;
            let me = slot.get().expect("registered");
            call.owner()
                .expect("bound to its dispatcher")
                .remove_listener(Channel::Event("foo"), &Matcher::callback(me));
            Ok(())
        })
    };
    let _ = slot.set(selfish.clone());
    d.on("foo", selfish);

    assert!(d.emit("foo", ()).unwrap());
    assert!(!d.emit("foo", ()).unwrap());
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_listener_emitting_other_event() {
    let d = Dispatcher::<&str, u32>::new();
    let trace = Trace::new();
    let relay = {
        let trace = trace.clone();
        Callback::fallible(move |call| {
            trace.push(format!("relay:{}", call.args()));
            call.owner()
                .expect("bound to its dispatcher")
                .emit("pong", call.args() + 1)?;
            Ok(())
        })
    };
    let sink = {
        let trace = trace.clone();
        Callback::new(move |call| trace.push(format!("{}:{}", call.event(), call.args())))
    };
    d.on("ping", relay).on("pong", sink);

    d.emit("ping", 1).unwrap();
    assert_eq!(trace.joined(), "relay:1;pong:2");
}
