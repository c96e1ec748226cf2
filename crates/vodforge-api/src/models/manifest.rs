//! DASH and HLS manifest resources.

use crate::ids::{DrmId, EncodingId, MuxingId, StreamId};
use crate::models::common::EncodingOutput;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// DASH
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashManifest {
    pub manifest_name: String,
    pub outputs: Vec<EncodingOutput>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoAdaptationSet {}

#[derive(Debug, Clone, Serialize)]
pub struct AudioAdaptationSet {
    pub lang: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashRepresentationType {
    Template,
    List,
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashRepresentationTypeMode {
    TemplateRepresentation,
    TemplateAdaptationSet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashFmp4Representation {
    pub encoding_id: EncodingId,
    pub muxing_id: MuxingId,
    #[serde(rename = "type")]
    pub representation_type: DashRepresentationType,
    pub mode: DashRepresentationTypeMode,
    pub segment_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProtection {
    pub encoding_id: EncodingId,
    pub muxing_id: MuxingId,
    pub drm_id: DrmId,
}

// ---------------------------------------------------------------------------
// HLS
// ---------------------------------------------------------------------------

/// `EXT-X-VERSION` of the generated playlists, sent as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlsVersion {
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    V10,
}

impl HlsVersion {
    pub fn number(self) -> u8 {
        match self {
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
            Self::V6 => 6,
            Self::V7 => 7,
            Self::V8 => 8,
            Self::V9 => 9,
            Self::V10 => 10,
        }
    }
}

impl Serialize for HlsVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HlsManifest {
    pub manifest_name: String,
    pub outputs: Vec<EncodingOutput>,
    pub name: String,
    pub hls_master_playlist_version: HlsVersion,
    pub hls_media_playlist_version: HlsVersion,
}

/// `EXT-X-MEDIA` audio rendition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMediaInfo {
    pub name: String,
    pub group_id: String,
    pub language: String,
    pub segment_path: String,
    pub encoding_id: EncodingId,
    pub stream_id: StreamId,
    pub muxing_id: MuxingId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drm_id: Option<DrmId>,
    pub uri: String,
}

/// `EXT-X-STREAM-INF` variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfo {
    pub audio: String,
    pub closed_captions: String,
    pub segment_path: String,
    pub uri: String,
    pub encoding_id: EncodingId,
    pub stream_id: StreamId,
    pub muxing_id: MuxingId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drm_id: Option<DrmId>,
}
