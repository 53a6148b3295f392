//! Navigation events and the analytics data layer fed by them

use log::debug;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::routes::Route;

/// Emitted after every successful navigation
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub from: Option<Route>,
    pub to: Route,
}

type Listener = Arc<dyn Fn(&NavigationEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    current: Option<Route>,
    listeners: BTreeMap<u64, Listener>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Publishes route changes to subscribed listeners
#[derive(Clone, Default)]
pub struct NavigationBus {
    inner: Arc<Mutex<BusInner>>,
}

impl NavigationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is unsubscribed or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn current(&self) -> Option<Route> {
        lock(&self.inner).current.clone()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Record the new route and notify listeners in subscription order
    pub fn publish(&self, to: Route) -> NavigationEvent {
        let (event, listeners) = {
            let mut inner = lock(&self.inner);
            let from = inner.current.replace(to.clone());
            let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
            (NavigationEvent { from, to }, listeners)
        };

        debug!("navigated to {}", event.to);
        // Listeners run outside the lock so they may subscribe or unsubscribe.
        for listener in listeners {
            listener(&event);
        }
        event
    }
}

/// Handle to a registered listener
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<BusInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            lock(&bus).listeners.remove(&self.id);
        }
    }
}

/// One analytics event, in the `{"event": ..., ...}` shape tag managers expect
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(event: &str) -> Self {
        Self {
            event: event.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn page_view(route: &Route) -> Self {
        Self::new("page_view").with("page_path", json!(route.path()))
    }
}

/// Most events a [`DataLayer`] keeps before dropping the oldest
pub const DEFAULT_DATA_LAYER_CAPACITY: usize = 500;

/// Bounded analytics event log owned by the application context.
///
/// Events stay until [`DataLayer::drain`] hands them to a forwarder. When
/// nothing drains the log, the oldest events are dropped past the capacity.
#[derive(Clone)]
pub struct DataLayer {
    events: Arc<Mutex<VecDeque<AnalyticsEvent>>>,
    capacity: usize,
}

impl Default for DataLayer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_DATA_LAYER_CAPACITY)
    }
}

impl DataLayer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, event: AnalyticsEvent) {
        let mut events = lock(&self.events);
        if events.len() == self.capacity {
            debug!("data layer full, dropping {}", events[0].event);
            events.pop_front();
        }
        events.push_back(event);
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        lock(&self.events).iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.events).is_empty()
    }

    /// Hand the collected events to a forwarder and forget them
    pub fn drain(&self) -> Vec<AnalyticsEvent> {
        lock(&self.events).drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn listeners_see_from_and_to() {
        let bus = NavigationBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        bus.publish(Route::Home);
        bus.publish(Route::PropertyDetail(3));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].from, Some(Route::Home));
        assert_eq!(seen[1].to, Route::PropertyDetail(3));
        assert_eq!(bus.current(), Some(Route::PropertyDetail(3)));
    }

    #[test]
    fn unsubscribe_and_drop_stop_delivery() {
        let bus = NavigationBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c1 = count.clone();
        let first = bus.subscribe(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = count.clone();
        let second = bus.subscribe(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.listener_count(), 2);

        bus.publish(Route::About);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        first.unsubscribe();
        drop(second);
        assert_eq!(bus.listener_count(), 0);

        bus.publish(Route::Contact);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus = NavigationBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn page_view_shape() {
        let event = AnalyticsEvent::page_view(&Route::Properties);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "page_view", "page_path": "/properties"})
        );

        let layer = DataLayer::default();
        layer.push(event);
        assert_eq!(layer.drain().len(), 1);
        assert!(layer.events().is_empty());
    }

    #[test]
    fn data_layer_drops_oldest_past_capacity() {
        let layer = DataLayer::with_capacity(2);
        layer.push(AnalyticsEvent::page_view(&Route::Home));
        layer.push(AnalyticsEvent::page_view(&Route::About));
        layer.push(AnalyticsEvent::new("logout"));

        let events = layer.events();
        assert_eq!(layer.len(), 2);
        assert_eq!(events[0].fields["page_path"], json!("/about"));
        assert_eq!(events[1].event, "logout");
    }
}
