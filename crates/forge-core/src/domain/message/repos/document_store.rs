// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::domain::message::models::Document;

pub type Subscriber = dyn Fn(&Arc<Document>) + Send + Sync;

/// Computes the next document from the current one. `None` leaves the store untouched.
pub type Mutation<'a> = dyn FnOnce(&Document) -> Option<Document> + 'a;

/// Holds the document being edited.
///
/// Every `set` replaces the top-level value, so subscribers can detect changes by comparing
/// `Arc` pointers.
pub trait DocumentStore: Send + Sync {
    fn get(&self) -> Arc<Document>;

    /// Replaces the document and notifies all subscribers.
    ///
    /// Notifications are delivered in the order the documents were stored. A `set` issued while
    /// subscribers are being notified (e.g. from within a subscriber) is queued and delivered
    /// once the current round is complete.
    fn set(&self, document: Document) -> Arc<Document>;

    /// Applies `mutation` to the current document and stores its result. No other write can
    /// happen in between. `mutation` must not call back into the store.
    fn update(&self, mutation: Box<Mutation<'_>>) -> Option<Arc<Document>>;

    fn subscribe(&self, subscriber: Box<Subscriber>) -> Subscription;
}

/// Returned by `DocumentStore::subscribe`. Dropping it keeps the subscriber registered, call
/// `unsubscribe` to remove it.
#[must_use = "A subscription can only be cancelled through its handle"]
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    pub fn unsubscribe(self) {
        (self.cancel)()
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
