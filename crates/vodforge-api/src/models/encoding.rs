//! Encodings, their input streams and streams, and the start request.

use crate::ids::{CodecConfigId, InputId, InputStreamId, ManifestId, StreamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    pub name: String,
    /// Platform region identifier, e.g. `AKAMAI_JP_OSA`.
    pub cloud_region: String,
    pub encoder_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamSelectionMode {
    Auto,
    PositionAbsolute,
    VideoRelative,
    AudioRelative,
    SubtitleRelative,
}

/// Selects one track of an input file by position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestInputStream {
    pub input_id: InputId,
    pub input_path: String,
    pub selection_mode: StreamSelectionMode,
    pub position: u32,
}

/// Dolby Vision mezzanine plus its sidecar metadata XML.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DolbyVisionInputStream {
    pub input_id: InputId,
    pub video_input_path: String,
    pub metadata_input_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DolbyAtmosInputFormat {
    Adm,
    Damf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DolbyAtmosIngestInputStream {
    pub input_id: InputId,
    pub input_path: String,
    pub input_format: DolbyAtmosInputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamMode {
    Standard,
    PerTitleTemplate,
    PerTitleTemplateFixedResolution,
    PerTitleTemplateFixedResolutionAndBitrate,
    PerTitleResult,
    #[serde(other)]
    Unknown,
}

impl StreamMode {
    /// Per-title templates are placeholders that never produce renditions.
    pub fn is_per_title_template(self) -> bool {
        matches!(
            self,
            Self::PerTitleTemplate
                | Self::PerTitleTemplateFixedResolution
                | Self::PerTitleTemplateFixedResolutionAndBitrate
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInput {
    pub input_stream_id: InputStreamId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub codec_config_id: CodecConfigId,
    pub input_streams: Vec<StreamInput>,
    pub name: String,
    pub mode: StreamMode,
}

/// Stream as returned by the platform.
///
/// The mode is kept as sent so that template modes newer than
/// [`StreamMode`] are still recognised.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDetails {
    pub id: StreamId,
    pub codec_config_id: CodecConfigId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl StreamDetails {
    /// Mode as the platform defaults it when omitted.
    pub fn effective_mode(&self) -> StreamMode {
        match self.mode.as_deref() {
            None => StreamMode::Standard,
            Some(raw) => serde_json::from_value(serde_json::Value::from(raw))
                .unwrap_or(StreamMode::Unknown),
        }
    }

    /// Any `PER_TITLE_TEMPLATE*` mode, known or not.
    pub fn is_per_title_template(&self) -> bool {
        self.mode
            .as_deref()
            .is_some_and(|raw| raw.contains("PER_TITLE_TEMPLATE"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResource {
    pub manifest_id: ManifestId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManifestGenerator {
    Legacy,
    V2,
}

/// Body of the encoding start call.
///
/// Manifests listed here are generated by the platform as part of the
/// encoding, so they need no separate start.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEncodingRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vod_dash_manifests: Vec<ManifestResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vod_hls_manifests: Vec<ManifestResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_generator: Option<ManifestGenerator>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_title_template_detection() {
        assert!(StreamMode::PerTitleTemplate.is_per_title_template());
        assert!(StreamMode::PerTitleTemplateFixedResolution.is_per_title_template());
        assert!(StreamMode::PerTitleTemplateFixedResolutionAndBitrate.is_per_title_template());
        assert!(!StreamMode::PerTitleResult.is_per_title_template());
        assert!(!StreamMode::Standard.is_per_title_template());
    }

    #[test]
    fn test_empty_start_request_is_empty_object() {
        let json = serde_json::to_string(&StartEncodingRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_start_request_with_manifests() {
        let request = StartEncodingRequest {
            vod_dash_manifests: vec![ManifestResource {
                manifest_id: ManifestId::from("dash-1"),
            }],
            vod_hls_manifests: vec![ManifestResource {
                manifest_id: ManifestId::from("hls-1"),
            }],
            manifest_generator: Some(ManifestGenerator::V2),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "vodDashManifests": [{"manifestId": "dash-1"}],
                "vodHlsManifests": [{"manifestId": "hls-1"}],
                "manifestGenerator": "V2"
            })
        );
    }

    #[test]
    fn test_stream_details_default_mode() {
        let details: StreamDetails =
            serde_json::from_str(r#"{"id": "s1", "codecConfigId": "c1"}"#).unwrap();
        assert_eq!(details.effective_mode(), StreamMode::Standard);
        assert!(!details.is_per_title_template());
    }

    #[test]
    fn test_stream_details_unknown_template_mode_is_still_a_template() {
        let details: StreamDetails = serde_json::from_str(
            r#"{"id": "s1", "codecConfigId": "c1", "mode": "PER_TITLE_TEMPLATE_FIXED_CODEC"}"#,
        )
        .unwrap();
        assert_eq!(details.effective_mode(), StreamMode::Unknown);
        assert!(details.is_per_title_template());

        let result: StreamDetails = serde_json::from_str(
            r#"{"id": "s2", "codecConfigId": "c1", "mode": "PER_TITLE_RESULT"}"#,
        )
        .unwrap();
        assert_eq!(result.effective_mode(), StreamMode::PerTitleResult);
        assert!(!result.is_per_title_template());
    }

    #[test]
    fn test_ingest_input_stream_wire_format() {
        let stream = IngestInputStream {
            input_id: InputId::from("in-1"),
            input_path: "inputs/movie.mov".into(),
            selection_mode: StreamSelectionMode::AudioRelative,
            position: 0,
        };
        let json = serde_json::to_value(&stream).unwrap();
        assert_eq!(json["selectionMode"], "AUDIO_RELATIVE");
        assert_eq!(json["inputPath"], "inputs/movie.mov");
    }
}
