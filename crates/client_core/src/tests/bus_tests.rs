use super::*;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&u32) + Send + Sync>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&log);
    let make = move |tag: &str| -> Box<dyn Fn(&u32) + Send + Sync> {
        let log = Arc::clone(&shared);
        let tag = tag.to_string();
        Box::new(move |value: &u32| log.lock().expect("log").push(format!("{tag}:{value}")))
    };
    (log, make)
}

#[test]
fn delivers_in_registration_order() {
    let bus = EventBus::<u32>::new("test");
    let (log, make) = recorder();

    let a = make("a");
    let b = make("b");
    let c = make("c");
    let _sa = bus.subscribe(move |v| a(v));
    let _sb = bus.subscribe(move |v| b(v));
    let _sc = bus.subscribe(move |v| c(v));

    assert_eq!(bus.publish(&7), 3);
    assert_eq!(*log.lock().expect("log"), vec!["a:7", "b:7", "c:7"]);
}

#[test]
fn unsubscribe_stops_delivery_for_that_listener_only() {
    let bus = EventBus::<u32>::new("test");
    let (log, make) = recorder();

    let a = make("a");
    let b = make("b");
    let sa = bus.subscribe(move |v| a(v));
    let _sb = bus.subscribe(move |v| b(v));

    bus.publish(&1);
    sa.unsubscribe();
    bus.publish(&2);

    assert_eq!(*log.lock().expect("log"), vec!["a:1", "b:1", "b:2"]);
    assert_eq!(bus.listener_count(), 1);
}

#[test]
fn dropping_subscription_releases_listener() {
    let bus = EventBus::<u32>::new("test");
    {
        let _sub = bus.subscribe(|_| {});
        assert_eq!(bus.listener_count(), 1);
    }
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn listener_may_unsubscribe_reentrantly() {
    let bus = EventBus::<u32>::new("test");
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let hits = Arc::new(Mutex::new(0u32));

    let slot_in = Arc::clone(&slot);
    let hits_in = Arc::clone(&hits);
    let sub = bus.subscribe(move |_| {
        *hits_in.lock().expect("hits") += 1;
        if let Some(sub) = slot_in.lock().expect("slot").take() {
            sub.unsubscribe();
        }
    });
    *slot.lock().expect("slot") = Some(sub);

    bus.publish(&1);
    bus.publish(&2);

    assert_eq!(*hits.lock().expect("hits"), 1);
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn listener_added_during_dispatch_waits_for_next_publish() {
    let bus = EventBus::<u32>::new("test");
    let late_hits = Arc::new(Mutex::new(Vec::new()));
    let held: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

    let bus_in = bus.clone();
    let late_in = Arc::clone(&late_hits);
    let held_in = Arc::clone(&held);
    let _outer = bus.subscribe(move |value| {
        if *value == 1 {
            let late = Arc::clone(&late_in);
            let sub = bus_in.subscribe(move |v| late.lock().expect("late").push(*v));
            held_in.lock().expect("held").push(sub);
        }
    });

    assert_eq!(bus.publish(&1), 1);
    assert_eq!(bus.publish(&2), 2);
    assert_eq!(*late_hits.lock().expect("late"), vec![2]);
}

#[test]
fn clear_makes_outstanding_subscriptions_inert() {
    let bus = EventBus::<u32>::new("test");
    let sub = bus.subscribe(|_| {});
    let _other = bus.subscribe(|_| {});

    assert_eq!(bus.clear(), 2);
    assert_eq!(bus.publish(&1), 0);
    sub.unsubscribe();
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn subscription_outliving_bus_is_harmless() {
    let bus = EventBus::<u32>::new("test");
    let sub = bus.subscribe(|_| {});
    drop(bus);
    drop(sub);
}
