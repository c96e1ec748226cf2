//! Muxings and the DRM configurations attached to them.

use crate::ids::{DrmId, MuxingId, StreamId};
use crate::models::common::EncodingOutput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingStream {
    pub stream_id: StreamId,
}

/// Fragmented MP4 muxing.
///
/// When the muxing is encrypted, `outputs` stays empty and the DRM
/// configuration carries the output instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fmp4Muxing {
    pub segment_length: f64,
    pub segment_naming: String,
    pub init_segment_name: String,
    pub streams: Vec<MuxingStream>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<EncodingOutput>,
    pub name: String,
}

/// Muxing as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingDetails {
    pub id: MuxingId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub streams: Vec<MuxingStream>,
    #[serde(default)]
    pub outputs: Vec<EncodingOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncryptionMode {
    Ctr,
    Cbc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IvSize {
    #[serde(rename = "IV_8_BYTES")]
    Iv8Bytes,
    #[serde(rename = "IV_16_BYTES")]
    Iv16Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CencWidevine {
    pub pssh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CencPlayReady {
    pub la_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CencFairPlay {
    pub iv: String,
    pub uri: String,
}

/// Common encryption with per-DRM-system signalling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CencDrm {
    pub key: String,
    pub kid: String,
    pub encryption_mode: EncryptionMode,
    pub iv_size: IvSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widevine: Option<CencWidevine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_ready: Option<CencPlayReady>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_play: Option<CencFairPlay>,
    pub outputs: Vec<EncodingOutput>,
    pub name: String,
}

/// DRM configuration as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrmDetails {
    pub id: DrmId,
    #[serde(default)]
    pub outputs: Vec<EncodingOutput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::OutputId;

    #[test]
    fn test_unencrypted_muxing_omits_outputs_only_when_empty() {
        let muxing = Fmp4Muxing {
            segment_length: 6.0,
            segment_naming: "segment_%number%.m4s".into(),
            init_segment_name: "init.mp4".into(),
            streams: vec![MuxingStream {
                stream_id: StreamId::from("s-1"),
            }],
            outputs: vec![],
            name: "Video FMP4 Muxing 240p".into(),
        };
        let json = serde_json::to_value(&muxing).unwrap();
        assert!(json.get("outputs").is_none());
        assert_eq!(json["streams"][0]["streamId"], "s-1");
        assert_eq!(json["initSegmentName"], "init.mp4");
    }

    #[test]
    fn test_cenc_wire_format() {
        let drm = CencDrm {
            key: "12341234123412341234123412341234".into(),
            kid: "43214321432143214321432143214321".into(),
            encryption_mode: EncryptionMode::Cbc,
            iv_size: IvSize::Iv16Bytes,
            widevine: Some(CencWidevine { pssh: "pssh".into() }),
            play_ready: Some(CencPlayReady {
                la_url: "http://pr.example/rightsmanager.asmx".into(),
            }),
            fair_play: None,
            outputs: vec![EncodingOutput::public(OutputId::from("o"), "out/video/240p")],
            name: "Video FMP4 CENC".into(),
        };

        let json = serde_json::to_value(&drm).unwrap();
        assert_eq!(json["encryptionMode"], "CBC");
        assert_eq!(json["ivSize"], "IV_16_BYTES");
        assert_eq!(json["playReady"]["laUrl"], "http://pr.example/rightsmanager.asmx");
        assert!(json.get("fairPlay").is_none());
    }

    #[test]
    fn test_drm_details_decoding() {
        let drm: DrmDetails = serde_json::from_str(
            r#"{"id": "drm-1", "key": "k", "outputs": [{"outputId": "o", "outputPath": "a/b"}]}"#,
        )
        .unwrap();
        assert_eq!(drm.id, DrmId::from("drm-1"));
        assert_eq!(drm.outputs[0].output_path, "a/b");
    }
}
