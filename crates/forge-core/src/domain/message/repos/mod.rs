// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use document_store::{DocumentStore, Mutation, Subscriber, Subscription};

mod document_store;
