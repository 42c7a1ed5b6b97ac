// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

// Source: https://github.com/novacrazy/serde_shims/blob/master/mime/src/lib.rs
// Serializes `Mime` as its essence string, e.g. `"image/png"`.

use std::fmt;
use std::str::FromStr;

use mime::Mime;
use serde::{de, Deserializer, Serializer};

pub fn serialize<S>(media_type: &Mime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(media_type.as_ref())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Mime, D::Error>
where
    D: Deserializer<'de>,
{
    struct MediaTypeVisitor;

    impl<'de> de::Visitor<'de> for MediaTypeVisitor {
        type Value = Mime;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a media type such as \"image/png\"")
        }

        fn visit_str<E>(self, value: &str) -> Result<Mime, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                return Ok(mime::APPLICATION_OCTET_STREAM);
            }
            Mime::from_str(value).map_err(|err| E::custom(format!("{value}: {err}")))
        }
    }

    deserializer.deserialize_str(MediaTypeVisitor)
}
