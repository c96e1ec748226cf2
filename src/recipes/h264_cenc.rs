//! H.264/AAC ladder in CENC-protected fMP4, packaged as HLS and DASH after
//! the encoding finishes.

use super::presets::{self, kbps};
use super::{RunSummary, Session, INIT_SEGMENT_NAME, SEGMENT_LENGTH};
use crate::config::{self, CencConfig, Config};
use crate::manifest::{self, DrmLookup, ManifestTarget};
use anyhow::{Context, Result};
use vodforge_api::models::{
    CencDrm, CencFairPlay, CencPlayReady, CencWidevine, Encoding, EncodingOutput, Fmp4Muxing,
    HlsVersion, IngestInputStream, IvSize, MuxingStream, StartEncodingRequest, Stream,
    StreamInput, StreamMode, StreamSelectionMode,
};
use vodforge_api::{BitmovinClient, EncodingId, InputId, InputStreamId, MuxingId, StreamId};

pub async fn run(session: &Session, config: &Config) -> Result<RunSummary> {
    let (input, output, input_path, drm) = config::require_h264_cenc(config)?;
    let section = &config.h264_cenc;
    let client = &session.client;
    let base_path = output.base_path(&config.encoding.title);

    let input_id = super::create_input(client, input).await?;
    let output_id = super::create_output(client, &output.destination).await?;

    let encoding_id = client
        .create_encoding(&Encoding {
            name: format!("[{}] {}", config.encoding.title, input_path),
            cloud_region: config.encoding.cloud_region.clone(),
            encoder_version: config.encoding.encoder_version.clone(),
        })
        .await
        .context("Failed to create encoding")?;
    tracing::info!("Created encoding {}", encoding_id);

    let video_input = ingest(
        client,
        &encoding_id,
        &input_id,
        input_path,
        StreamSelectionMode::VideoRelative,
    )
    .await?;
    let audio_input = ingest(
        client,
        &encoding_id,
        &input_id,
        input_path,
        StreamSelectionMode::AudioRelative,
    )
    .await?;

    for rendition in &section.video {
        let codec_id = client
            .create_h264_configuration(&presets::h264_configuration(rendition))
            .await
            .with_context(|| {
                format!("Failed to create H264 configuration for {}p", rendition.height)
            })?;

        let stream_id = client
            .create_stream(
                &encoding_id,
                &Stream {
                    codec_config_id: codec_id,
                    input_streams: vec![StreamInput {
                        input_stream_id: video_input.clone(),
                    }],
                    name: format!("Stream H264 {}p", rendition.height),
                    mode: rendition.mode,
                },
            )
            .await
            .with_context(|| format!("Failed to create H264 stream for {}p", rendition.height))?;

        let muxing_id = create_muxing(
            client,
            &encoding_id,
            stream_id,
            &section.segment_naming,
            format!("Video FMP4 Muxing {}p", rendition.height),
        )
        .await?;

        let output_path = format!("{}video/{}p", base_path, rendition.height);
        let output = EncodingOutput::public(output_id.clone(), output_path);
        client
            .create_cenc_drm(
                &encoding_id,
                &muxing_id,
                &cenc_drm(drm, output, "Video FMP4 CENC"),
            )
            .await
            .with_context(|| format!("Failed to add CENC DRM to muxing {}", muxing_id))?;

        tracing::debug!("Video rendition {}p ready", rendition.height);
    }

    for rendition in &section.audio {
        let label = kbps(rendition.bitrate);

        let codec_id = client
            .create_aac_configuration(&presets::aac_configuration(rendition))
            .await
            .with_context(|| format!("Failed to create AAC configuration for {}", label))?;

        let stream_id = client
            .create_stream(
                &encoding_id,
                &Stream {
                    codec_config_id: codec_id,
                    input_streams: vec![StreamInput {
                        input_stream_id: audio_input.clone(),
                    }],
                    name: format!("Stream AAC {}", label),
                    mode: StreamMode::Standard,
                },
            )
            .await
            .with_context(|| format!("Failed to create AAC stream for {}", label))?;

        let muxing_id = create_muxing(
            client,
            &encoding_id,
            stream_id,
            &section.segment_naming,
            format!("Audio FMP4 Muxing {}", label),
        )
        .await?;

        let output_path = format!("{}audio/{}", base_path, rendition.bitrate);
        let output = EncodingOutput::public(output_id.clone(), output_path);
        client
            .create_cenc_drm(
                &encoding_id,
                &muxing_id,
                &cenc_drm(drm, output, "Audio FMP4 CENC"),
            )
            .await
            .with_context(|| format!("Failed to add CENC DRM to muxing {}", muxing_id))?;

        tracing::debug!("Audio rendition {} ready", label);
    }

    session
        .execute_encoding(&encoding_id, &StartEncodingRequest::default())
        .await?;

    let descriptors =
        manifest::collect_muxings(client, &encoding_id, &base_path, DrmLookup::Cenc).await?;
    let plan = manifest::plan(&encoding_id, &descriptors);
    let target = ManifestTarget {
        encoding_id: encoding_id.clone(),
        output_id,
        base_path,
    };

    let hls_manifest_id = manifest::hls::build(client, &target, &plan, HlsVersion::V6).await?;
    let dash_manifest_id = manifest::dash::build(client, &target, &plan).await?;

    session.execute_hls_manifest(&hls_manifest_id).await?;
    session.execute_dash_manifest(&dash_manifest_id).await?;

    Ok(RunSummary {
        encoding_id,
        dash_manifest_id,
        hls_manifest_id,
    })
}

async fn ingest(
    client: &BitmovinClient,
    encoding_id: &EncodingId,
    input_id: &InputId,
    input_path: &str,
    selection_mode: StreamSelectionMode,
) -> Result<InputStreamId> {
    client
        .create_ingest_input_stream(
            encoding_id,
            &IngestInputStream {
                input_id: input_id.clone(),
                input_path: input_path.to_string(),
                selection_mode,
                position: 0,
            },
        )
        .await
        .with_context(|| format!("Failed to create {:?} ingest input stream", selection_mode))
}

/// Muxings are created without outputs; the DRM configuration carries them.
async fn create_muxing(
    client: &BitmovinClient,
    encoding_id: &EncodingId,
    stream_id: StreamId,
    segment_naming: &str,
    name: String,
) -> Result<MuxingId> {
    client
        .create_fmp4_muxing(
            encoding_id,
            &Fmp4Muxing {
                segment_length: SEGMENT_LENGTH,
                segment_naming: segment_naming.to_string(),
                init_segment_name: INIT_SEGMENT_NAME.to_string(),
                streams: vec![MuxingStream { stream_id }],
                outputs: vec![],
                name: name.clone(),
            },
        )
        .await
        .with_context(|| format!("Failed to create muxing '{}'", name))
}

fn cenc_drm(drm: &CencConfig, output: EncodingOutput, name: &str) -> CencDrm {
    let fair_play = match (&drm.fairplay_iv, &drm.fairplay_uri) {
        (Some(iv), Some(uri)) => Some(CencFairPlay {
            iv: iv.clone(),
            uri: uri.clone(),
        }),
        _ => None,
    };

    CencDrm {
        key: drm.key.clone(),
        kid: drm.kid.clone(),
        encryption_mode: drm.encryption_mode,
        iv_size: IvSize::Iv16Bytes,
        widevine: drm
            .widevine_pssh
            .clone()
            .map(|pssh| CencWidevine { pssh }),
        play_ready: drm
            .playready_la_url
            .clone()
            .map(|la_url| CencPlayReady { la_url }),
        fair_play,
        outputs: vec![output],
        name: name.to_string(),
    }
}
