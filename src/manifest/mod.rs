//! Manifest topology: turn an encoding's muxings into DASH and HLS entries.
//!
//! Work happens in three passes. [`collect_muxings`] walks the remote
//! resources once, [`plan`] decides where every rendition goes without
//! touching the network, and the [`dash`] and [`hls`] builders apply the plan.

pub mod dash;
pub mod hls;

use anyhow::{Context, Result};
use vodforge_api::models::{
    AudioMediaInfo, CodecConfigType, ContentProtection, DashFmp4Representation,
    DashRepresentationType, DashRepresentationTypeMode, StreamInfo,
};
use vodforge_api::{BitmovinClient, DrmId, EncodingId, MuxingId, OutputId, StreamId};

pub const DASH_MANIFEST_NAME: &str = "stream.mpd";
pub const HLS_MANIFEST_NAME: &str = "stream.m3u8";

const AUDIO_GROUP: &str = "audio";
const AUDIO_LANGUAGE: &str = "en";

/// Which side of a manifest a rendition lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

/// Route a codec to a track kind. `None` means the codec has no place in
/// the manifests.
pub fn track_kind(codec: CodecConfigType) -> Option<TrackKind> {
    match codec {
        CodecConfigType::Aac
        | CodecConfigType::DolbyAtmos
        | CodecConfigType::Ac3
        | CodecConfigType::Eac3 => Some(TrackKind::Audio),
        CodecConfigType::H264
        | CodecConfigType::H265
        | CodecConfigType::Av1
        | CodecConfigType::Vp9 => Some(TrackKind::Video),
        CodecConfigType::Other => None,
    }
}

/// Whether CENC records are looked up for each muxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrmLookup {
    Cenc,
    Disabled,
}

/// Where manifests are written.
#[derive(Debug, Clone)]
pub struct ManifestTarget {
    pub encoding_id: EncodingId,
    pub output_id: OutputId,
    /// Output base path, always ending with `/`
    pub base_path: String,
}

/// Everything the manifests need to know about one muxing.
#[derive(Debug, Clone, PartialEq)]
pub struct MuxingDescriptor {
    pub muxing_id: MuxingId,
    pub stream_id: StreamId,
    pub codec: CodecConfigType,
    pub bitrate: u64,
    /// Segment location relative to the output base path
    pub segment_path: String,
    pub drm_id: Option<DrmId>,
}

/// Strip the output base path from an absolute output path.
///
/// Paths outside the base are returned unchanged.
pub fn relative_segment_path(output_path: &str, base_path: &str) -> String {
    output_path
        .strip_prefix(base_path)
        .unwrap_or(output_path)
        .to_string()
}

/// Gather descriptors for every fMP4 muxing of an encoding.
///
/// Muxings whose first stream is a per-title template, or whose codec is
/// neither audio nor video, are skipped.
pub async fn collect_muxings(
    client: &BitmovinClient,
    encoding_id: &EncodingId,
    base_path: &str,
    drm: DrmLookup,
) -> Result<Vec<MuxingDescriptor>> {
    let muxings = client
        .list_fmp4_muxings(encoding_id)
        .await
        .context("Failed to list fMP4 muxings")?;
    tracing::debug!("Found {} fMP4 muxings on encoding {}", muxings.len(), encoding_id);

    let mut descriptors = Vec::with_capacity(muxings.len());

    for muxing in muxings {
        let stream_ref = muxing
            .streams
            .first()
            .with_context(|| format!("Muxing {} has no streams", muxing.id))?;

        let stream = client
            .get_stream(encoding_id, &stream_ref.stream_id)
            .await
            .with_context(|| format!("Failed to fetch stream {}", stream_ref.stream_id))?;

        if stream.is_per_title_template() {
            tracing::debug!(
                "Skipping muxing {}: stream {} is a per-title template",
                muxing.id,
                stream.id
            );
            continue;
        }

        let codec = client
            .codec_config_type(&stream.codec_config_id)
            .await
            .with_context(|| format!("Failed to fetch codec type of {}", stream.codec_config_id))?;

        if track_kind(codec).is_none() {
            tracing::debug!(
                "Skipping muxing {}: codec {:?} is neither audio nor video",
                muxing.id,
                codec
            );
            continue;
        }

        let codec_details = client
            .get_codec_configuration(codec, &stream.codec_config_id)
            .await
            .with_context(|| {
                format!("Failed to fetch codec configuration {}", stream.codec_config_id)
            })?;
        let bitrate = codec_details.bitrate.with_context(|| {
            format!("Codec configuration {} has no bitrate", stream.codec_config_id)
        })?;

        let drm_record = match drm {
            DrmLookup::Cenc => client
                .list_cenc_drms(encoding_id, &muxing.id)
                .await
                .with_context(|| format!("Failed to list CENC DRMs of muxing {}", muxing.id))?
                .into_iter()
                .next(),
            DrmLookup::Disabled => None,
        };

        let output_path = match &drm_record {
            Some(record) => record.outputs.first(),
            None => muxing.outputs.first(),
        }
        .map(|output| output.output_path.as_str())
        .with_context(|| format!("Muxing {} has no output", muxing.id))?;

        descriptors.push(MuxingDescriptor {
            muxing_id: muxing.id.clone(),
            stream_id: stream.id,
            codec,
            bitrate,
            segment_path: relative_segment_path(output_path, base_path),
            drm_id: drm_record.map(|record| record.id),
        });
    }

    Ok(descriptors)
}

/// One DASH representation and its optional content protection.
#[derive(Debug, Clone)]
pub struct DashEntry {
    pub representation: DashFmp4Representation,
    pub content_protection: Option<ContentProtection>,
}

/// Manifest entries derived from the collected muxings.
#[derive(Debug, Clone, Default)]
pub struct ManifestPlan {
    pub dash_video: Vec<DashEntry>,
    pub dash_audio: Vec<DashEntry>,
    pub hls_audio: Vec<AudioMediaInfo>,
    pub hls_video: Vec<StreamInfo>,
}

/// Decide the DASH and HLS entries for each descriptor.
pub fn plan(encoding_id: &EncodingId, descriptors: &[MuxingDescriptor]) -> ManifestPlan {
    let mut plan = ManifestPlan::default();

    for descriptor in descriptors {
        let Some(kind) = track_kind(descriptor.codec) else {
            tracing::debug!("No manifest entry for codec {:?}", descriptor.codec);
            continue;
        };

        let dash = DashEntry {
            representation: DashFmp4Representation {
                encoding_id: encoding_id.clone(),
                muxing_id: descriptor.muxing_id.clone(),
                representation_type: DashRepresentationType::Template,
                mode: DashRepresentationTypeMode::TemplateRepresentation,
                segment_path: descriptor.segment_path.clone(),
            },
            content_protection: descriptor.drm_id.clone().map(|drm_id| ContentProtection {
                encoding_id: encoding_id.clone(),
                muxing_id: descriptor.muxing_id.clone(),
                drm_id,
            }),
        };

        match kind {
            TrackKind::Audio => {
                plan.dash_audio.push(dash);
                plan.hls_audio.push(AudioMediaInfo {
                    name: "HLS Audio Media".to_string(),
                    group_id: AUDIO_GROUP.to_string(),
                    language: AUDIO_LANGUAGE.to_string(),
                    segment_path: descriptor.segment_path.clone(),
                    encoding_id: encoding_id.clone(),
                    stream_id: descriptor.stream_id.clone(),
                    muxing_id: descriptor.muxing_id.clone(),
                    drm_id: descriptor.drm_id.clone(),
                    uri: format!("audio_{}.m3u8", descriptor.bitrate),
                });
            }
            TrackKind::Video => {
                plan.dash_video.push(dash);
                plan.hls_video.push(StreamInfo {
                    audio: AUDIO_GROUP.to_string(),
                    closed_captions: "NONE".to_string(),
                    segment_path: descriptor.segment_path.clone(),
                    uri: format!("video_{}.m3u8", descriptor.bitrate),
                    encoding_id: encoding_id.clone(),
                    stream_id: descriptor.stream_id.clone(),
                    muxing_id: descriptor.muxing_id.clone(),
                    drm_id: descriptor.drm_id.clone(),
                });
            }
        }
    }

    plan
}
