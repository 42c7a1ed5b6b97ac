// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use incrementing_id_provider::IncrementingIDProvider;

mod incrementing_id_provider;
