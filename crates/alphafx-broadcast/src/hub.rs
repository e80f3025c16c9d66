//! Broadcast hub actor and subscriber handles.

use std::collections::HashMap;

use alphafx_core::Event;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::BroadcastConfig;
use crate::error::{BroadcastError, BroadcastResult};

/// A live subscriber's receiving end.
///
/// Dropping the subscription is enough to disconnect: the hub removes
/// the subscriber on its next delivery attempt.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    rx: mpsc::Receiver<Event>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receive the next event in publish order for this subscriber.
    ///
    /// Returns `None` once the hub has shut down.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[derive(Debug)]
enum HubMsg {
    Publish(Event),
    Subscribe(oneshot::Sender<Subscription>),
    Unsubscribe(Uuid),
    SubscriberCount(oneshot::Sender<usize>),
}

/// Handle for publishing events and managing subscriptions.
///
/// Cheap to clone; all clones feed the same hub actor.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    tx: mpsc::Sender<HubMsg>,
}

impl BroadcastHub {
    /// Spawn the hub actor, returning the handle and the worker task.
    pub fn spawn(config: BroadcastConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.hub_queue_depth);
        let task = HubTask {
            rx,
            subscribers: HashMap::new(),
            subscriber_queue_depth: config.subscriber_queue_depth,
        };
        let handle = tokio::spawn(task.run());
        (Self { tx }, handle)
    }

    /// Enqueue an event for fan-out without waiting.
    ///
    /// The producer never blocks on delivery. If the hub inbox is full
    /// the event is dropped and logged; subscriber queues are the
    /// per-consumer isolation layer behind this.
    pub fn publish(&self, event: Event) {
        match self.tx.try_send(HubMsg::Publish(event)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Broadcast hub inbox full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("Broadcast hub stopped, dropping event");
            }
        }
    }

    /// Register a new subscriber and return its receiving end.
    pub async fn subscribe(&self) -> BroadcastResult<Subscription> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(HubMsg::Subscribe(reply_tx))
            .await
            .map_err(|_| BroadcastError::HubClosed)?;
        reply_rx.await.map_err(|_| BroadcastError::HubClosed)
    }

    /// Remove a subscriber explicitly. Best effort; dropping the
    /// `Subscription` has the same outcome.
    pub fn unsubscribe(&self, id: Uuid) {
        let _ = self.tx.try_send(HubMsg::Unsubscribe(id));
    }

    /// Number of currently registered subscribers.
    pub async fn subscriber_count(&self) -> BroadcastResult<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(HubMsg::SubscriberCount(reply_tx))
            .await
            .map_err(|_| BroadcastError::HubClosed)?;
        reply_rx.await.map_err(|_| BroadcastError::HubClosed)
    }
}

struct SubscriberSlot {
    tx: mpsc::Sender<Event>,
    /// Events lost to a full queue since this subscriber connected.
    dropped: u64,
}

struct HubTask {
    rx: mpsc::Receiver<HubMsg>,
    subscribers: HashMap<Uuid, SubscriberSlot>,
    subscriber_queue_depth: usize,
}

impl HubTask {
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                HubMsg::Publish(event) => self.fan_out(event),
                HubMsg::Subscribe(reply) => {
                    let id = Uuid::new_v4();
                    let (tx, rx) = mpsc::channel(self.subscriber_queue_depth);
                    if reply.send(Subscription { id, rx }).is_ok() {
                        self.subscribers.insert(id, SubscriberSlot { tx, dropped: 0 });
                        debug!(%id, total = self.subscribers.len(), "Subscriber registered");
                    }
                }
                HubMsg::Unsubscribe(id) => {
                    if self.subscribers.remove(&id).is_some() {
                        debug!(%id, total = self.subscribers.len(), "Subscriber removed");
                    }
                }
                HubMsg::SubscriberCount(reply) => {
                    let _ = reply.send(self.subscribers.len());
                }
            }
        }
        debug!("Broadcast hub stopped");
    }

    /// Deliver one event to every subscriber independently.
    ///
    /// A full queue drops the event for that subscriber only; a closed
    /// queue removes the subscriber. Neither affects the others.
    fn fan_out(&mut self, event: Event) {
        self.subscribers.retain(|id, slot| {
            match slot.tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    slot.dropped += 1;
                    trace!(%id, dropped = slot.dropped, "Subscriber queue full, event dropped");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(%id, "Subscriber disconnected, removing");
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphafx_core::{Pair, Price};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn price_event(price: rust_decimal::Decimal) -> Event {
        let pair = Pair::parse("EURUSD").unwrap();
        Event::price_update(&pair, Price::new(price), Utc::now())
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_noop() {
        let (hub, _task) = BroadcastHub::spawn(BroadcastConfig::default());
        hub.publish(price_event(dec!(1.08)));
        assert_eq!(hub.subscriber_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_event() {
        let (hub, _task) = BroadcastHub::spawn(BroadcastConfig::default());
        let mut a = hub.subscribe().await.unwrap();
        let mut b = hub.subscribe().await.unwrap();
        assert_eq!(hub.subscriber_count().await.unwrap(), 2);

        let event = price_event(dec!(1.08));
        hub.publish(event.clone());

        assert_eq!(a.recv().await.unwrap(), event);
        assert_eq!(b.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let (hub, _task) = BroadcastHub::spawn(BroadcastConfig::default());
        let mut sub = hub.subscribe().await.unwrap();

        hub.publish(price_event(dec!(1.01)));
        hub.publish(price_event(dec!(1.02)));
        hub.publish(price_event(dec!(1.03)));

        for expected in [1.01f64, 1.02, 1.03] {
            match sub.recv().await.unwrap() {
                Event::PriceUpdate { price, .. } => {
                    assert!((price - expected).abs() < 1e-12)
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_dropped_subscriber_does_not_affect_others() {
        let (hub, _task) = BroadcastHub::spawn(BroadcastConfig::default());
        let gone = hub.subscribe().await.unwrap();
        let mut alive = hub.subscribe().await.unwrap();
        drop(gone);

        let event = price_event(dec!(1.10));
        hub.publish(event.clone());
        assert_eq!(alive.recv().await.unwrap(), event);

        // The dead subscriber was pruned during fan-out.
        assert_eq!(hub.subscriber_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_slow_subscriber_is_isolated() {
        let config = BroadcastConfig {
            subscriber_queue_depth: 2,
            ..Default::default()
        };
        let (hub, _task) = BroadcastHub::spawn(config);
        let mut slow = hub.subscribe().await.unwrap();
        let mut fast = hub.subscribe().await.unwrap();

        // Publish more than the slow queue can hold without draining it.
        for i in 0..5u32 {
            hub.publish(price_event(rust_decimal::Decimal::from(i + 1)));
        }

        // The fast subscriber drains everything.
        let mut fast_count = 0;
        while fast_count < 5 {
            fast.recv().await.unwrap();
            fast_count += 1;
        }

        // The slow subscriber kept the first two, lost the rest, and is
        // still registered.
        assert!(slow.recv().await.is_some());
        assert!(slow.recv().await.is_some());
        assert_eq!(hub.subscriber_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_explicit_unsubscribe() {
        let (hub, _task) = BroadcastHub::spawn(BroadcastConfig::default());
        let sub = hub.subscribe().await.unwrap();
        hub.unsubscribe(sub.id());

        // The count query is processed after the unsubscribe message on
        // the same inbox, so it observes the removal.
        assert_eq!(hub.subscriber_count().await.unwrap(), 0);
    }
}
