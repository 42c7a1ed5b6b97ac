// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::domain::message::models::Document;
use crate::domain::message::repos::{DocumentStore, Mutation, Subscriber, Subscription};

/// In-memory `DocumentStore`.
pub struct MessageStore {
    document: RwLock<Arc<Document>>,
    subscribers: Arc<Mutex<Subscribers>>,
    notifications: Mutex<Notifications>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Arc<Subscriber>)>,
}

#[derive(Default)]
struct Notifications {
    pending: VecDeque<Arc<Document>>,
    is_dispatching: bool,
}

impl MessageStore {
    pub fn new(document: Document) -> Self {
        Self {
            document: RwLock::new(Arc::new(document)),
            subscribers: Default::default(),
            notifications: Default::default(),
        }
    }
}

impl DocumentStore for MessageStore {
    fn get(&self) -> Arc<Document> {
        self.document.read().clone()
    }

    fn set(&self, document: Document) -> Arc<Document> {
        let document = {
            let mut current = self.document.write();
            self.store(&mut current, document)
        };
        self.dispatch();
        document
    }

    fn update(&self, mutation: Box<Mutation<'_>>) -> Option<Arc<Document>> {
        let document = {
            let mut current = self.document.write();
            let next = mutation(&current)?;
            self.store(&mut current, next)
        };
        self.dispatch();
        Some(document)
    }

    fn subscribe(&self, subscriber: Box<Subscriber>) -> Subscription {
        let id = {
            let mut subscribers = self.subscribers.lock();
            let id = subscribers.next_id;
            subscribers.next_id += 1;
            subscribers.entries.push((id, Arc::from(subscriber)));
            id
        };

        let registry = Arc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }
}

impl MessageStore {
    /// Must be called while holding the document lock so that the queue follows the store order.
    fn store(&self, current: &mut Arc<Document>, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        *current = document.clone();
        self.notifications.lock().pending.push_back(document.clone());
        document
    }

    /// Drains the queue unless another call is already doing so. No lock is held while a
    /// subscriber runs, so subscribers may call back into the store.
    fn dispatch(&self) {
        {
            let mut notifications = self.notifications.lock();
            if notifications.is_dispatching {
                return;
            }
            notifications.is_dispatching = true;
        }

        loop {
            let document = {
                let mut notifications = self.notifications.lock();
                let Some(document) = notifications.pending.pop_front() else {
                    notifications.is_dispatching = false;
                    return;
                };
                document
            };

            let subscribers = self
                .subscribers
                .lock()
                .entries
                .iter()
                .map(|(_, subscriber)| subscriber.clone())
                .collect::<Vec<_>>();

            trace!("Notifying {} subscriber(s)…", subscribers.len());
            for subscriber in subscribers {
                subscriber(&document);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_notifies_with_the_stored_value() {
        let store = MessageStore::new(Document::default());
        let received = Arc::new(Mutex::new(vec![]));

        let sink = received.clone();
        let _subscription = store.subscribe(Box::new(move |document| {
            sink.lock().push(document.clone());
        }));

        let before = store.get();
        let stored = store.set(Document {
            content: "Hello".to_string(),
            ..Default::default()
        });

        assert!(!Arc::ptr_eq(&before, &stored));
        assert!(Arc::ptr_eq(&stored, &store.get()));

        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert!(Arc::ptr_eq(&received[0], &stored));
        assert_eq!(received[0].content, "Hello");
    }

    #[test]
    fn test_unsubscribe() {
        let store = MessageStore::new(Document::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let subscription = store.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.set(Document::default());
        subscription.unsubscribe();
        store.set(Document::default());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribers_may_reenter_the_store() {
        let store = Arc::new(MessageStore::new(Document::default()));
        let seen = Arc::new(Mutex::new(vec![]));

        let (inner_store, sink) = (store.clone(), seen.clone());
        let _subscription = store.subscribe(Box::new(move |document| {
            sink.lock().push(inner_store.get().content.clone());
            if document.content == "first" {
                inner_store.set(Document {
                    content: "second".to_string(),
                    ..Default::default()
                });
            }
        }));

        store.set(Document {
            content: "first".to_string(),
            ..Default::default()
        });

        assert_eq!(*seen.lock(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(store.get().content, "second");
    }

    #[test]
    fn test_nested_sets_are_delivered_in_order() {
        let store = Arc::new(MessageStore::new(Document::default()));
        let seen_by_last = Arc::new(Mutex::new(vec![]));

        let inner_store = store.clone();
        let _first = store.subscribe(Box::new(move |document| {
            if document.content == "first" {
                inner_store.set(Document {
                    content: "second".to_string(),
                    ..Default::default()
                });
            }
        }));
        let sink = seen_by_last.clone();
        let _last = store.subscribe(Box::new(move |document| {
            sink.lock().push(document.clone());
        }));

        store.set(Document {
            content: "first".to_string(),
            ..Default::default()
        });

        let seen = seen_by_last.lock();
        assert_eq!(
            seen.iter()
                .map(|document| document.content.as_str())
                .collect::<Vec<_>>(),
            vec!["first", "second"]
        );
        assert!(Arc::ptr_eq(&seen[1], &store.get()));
    }

    #[test]
    fn test_update_skips_rejected_mutations() {
        let store = MessageStore::new(Document::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let _subscription = store.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let before = store.get();
        assert!(store.update(Box::new(|_| None)).is_none());
        assert!(Arc::ptr_eq(&before, &store.get()));

        let updated = store.update(Box::new(|document| {
            Some(Document {
                content: format!("{}!", document.content),
                ..document.clone()
            })
        }));
        assert_eq!(updated.map(|document| document.content.clone()).as_deref(), Some("!"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(MessageStore::new(Document::default()));

        let workers = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(Box::new(|document| {
                            Some(Document {
                                content: format!("{}x", document.content),
                                ..document.clone()
                            })
                        }));
                    }
                })
            })
            .collect::<Vec<_>>();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.get().content.len(), 1000);
    }
}
