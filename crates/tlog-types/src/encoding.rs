//! Base64 encoding newtypes for wire fields
//!
//! Proposed entries carry binary fields (signatures, PEM blobs) as standard
//! base64 strings. These newtypes decode on deserialization so the rest of
//! the core works with raw bytes, and re-encode deterministically on
//! serialization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! base64_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wrap raw bytes
            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            /// The decoded bytes
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Whether no bytes are present
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Standard base64 encoding of the bytes
            pub fn to_base64(&self) -> String {
                BASE64.encode(&self.0)
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base64())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                let bytes = BASE64
                    .decode(s.as_bytes())
                    .map_err(|e| D::Error::custom(format!("invalid base64: {}", e)))?;
                Ok(Self(bytes))
            }
        }
    };
}

base64_newtype! {
    /// Raw signature bytes, base64-encoded on the wire
    SignatureBytes
}

base64_newtype! {
    /// Raw PEM bytes (public key or certificate), base64-encoded on the wire
    PemBytes
}
