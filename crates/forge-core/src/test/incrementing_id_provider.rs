// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicU64, Ordering};

use crate::app::deps::IDProvider;

/// Hands out "id-1", "id-2", …
#[derive(Default)]
pub struct IncrementingIDProvider {
    last_id: AtomicU64,
}

impl IDProvider for IncrementingIDProvider {
    fn new_id(&self) -> String {
        format!("id-{}", self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
