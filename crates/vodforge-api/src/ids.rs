//! Typed identifiers for remote resources.
//!
//! The platform hands out opaque string identifiers. Each resource kind gets
//! its own newtype so an encoding id cannot be passed where a muxing id is
//! expected. Identifiers are immutable once received.

use serde::{Deserialize, Serialize};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

resource_id!(
    /// Identifier of an input (source media location).
    InputId
);
resource_id!(
    /// Identifier of an output (storage destination).
    OutputId
);
resource_id!(
    /// Identifier of an encoding job.
    EncodingId
);
resource_id!(
    /// Identifier of an input stream inside an encoding.
    InputStreamId
);
resource_id!(
    /// Identifier of a codec configuration.
    CodecConfigId
);
resource_id!(
    /// Identifier of a stream inside an encoding.
    StreamId
);
resource_id!(
    /// Identifier of a muxing inside an encoding.
    MuxingId
);
resource_id!(
    /// Identifier of a DRM configuration attached to a muxing.
    DrmId
);
resource_id!(
    /// Identifier of a DASH or HLS manifest.
    ManifestId
);
resource_id!(
    /// Identifier of a DASH period.
    PeriodId
);
resource_id!(
    /// Identifier of a DASH adaptation set.
    AdaptationSetId
);
resource_id!(
    /// Identifier of a DASH representation.
    RepresentationId
);
resource_id!(
    /// Identifier of a DASH content protection entry.
    ContentProtectionId
);
resource_id!(
    /// Identifier of an HLS media or variant stream entry.
    HlsEntryId
);
