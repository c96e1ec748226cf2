//! Dolby Vision H.265 plus Dolby Atmos from an ADM BWF source. Manifests are
//! declared up front and generated by the platform as part of the encoding.

use super::{presets, RunSummary, Session, INIT_SEGMENT_NAME, SEGMENT_LENGTH};
use crate::config::{self, Config};
use crate::manifest::{self, DrmLookup, ManifestTarget};
use anyhow::{Context, Result};
use vodforge_api::models::{
    DolbyAtmosIngestInputStream, DolbyAtmosInputFormat, DolbyVisionInputStream, Encoding,
    EncodingOutput, Fmp4Muxing, HlsVersion, ManifestGenerator, ManifestResource, MuxingStream,
    StartEncodingRequest, Stream, StreamInput, StreamMode,
};
use vodforge_api::{BitmovinClient, EncodingId, OutputId, StreamId};

pub async fn run(session: &Session, config: &Config) -> Result<RunSummary> {
    let (input, output, sources) = config::require_dolby_vision_atmos(config)?;
    let section = &config.dolby_vision_atmos;
    let client = &session.client;
    let base_path = output.base_path(&config.encoding.title);

    let input_id = super::create_input(client, input).await?;
    let output_id = super::create_output(client, &output.destination).await?;

    let encoding_id = client
        .create_encoding(&Encoding {
            name: format!("[{}] DolbyVision / DolbyAtmos (ADM)", config.encoding.title),
            cloud_region: config.encoding.cloud_region.clone(),
            encoder_version: config.encoding.encoder_version.clone(),
        })
        .await
        .context("Failed to create encoding")?;
    tracing::info!("Created encoding {}", encoding_id);

    let video_input = client
        .create_dolby_vision_input_stream(
            &encoding_id,
            &DolbyVisionInputStream {
                input_id: input_id.clone(),
                video_input_path: sources.video.to_string(),
                metadata_input_path: sources.metadata.to_string(),
            },
        )
        .await
        .context("Failed to create Dolby Vision input stream")?;

    let audio_input = client
        .create_dolby_atmos_input_stream(
            &encoding_id,
            &DolbyAtmosIngestInputStream {
                input_id,
                input_path: sources.atmos.to_string(),
                input_format: DolbyAtmosInputFormat::Adm,
            },
        )
        .await
        .context("Failed to create Dolby Atmos input stream")?;

    // Codec configurations live outside the encoding.
    let mut video_codecs = Vec::with_capacity(section.video.len());
    for rendition in &section.video {
        let codec_id = client
            .create_h265_configuration(&presets::h265_configuration(rendition))
            .await
            .with_context(|| {
                format!("Failed to create H265 configuration for {}p", rendition.height)
            })?;
        video_codecs.push((rendition, codec_id));
    }

    let mut audio_codecs = Vec::with_capacity(section.audio.len());
    for rendition in &section.audio {
        let codec_id = client
            .create_dolby_atmos_configuration(&presets::dolby_atmos_configuration(rendition))
            .await
            .with_context(|| {
                format!("Failed to create Dolby Atmos configuration for {}bps", rendition.bitrate)
            })?;
        audio_codecs.push((rendition, codec_id));
    }

    let mut video_streams = Vec::with_capacity(video_codecs.len());
    for (rendition, codec_id) in video_codecs {
        let stream_id = client
            .create_stream(
                &encoding_id,
                &Stream {
                    codec_config_id: codec_id,
                    input_streams: vec![StreamInput {
                        input_stream_id: video_input.clone(),
                    }],
                    name: format!("Stream H265 {}p", rendition.height),
                    mode: rendition.mode,
                },
            )
            .await
            .with_context(|| format!("Failed to create H265 stream for {}p", rendition.height))?;
        video_streams.push((rendition, stream_id));
    }

    let mut audio_streams = Vec::with_capacity(audio_codecs.len());
    for (rendition, codec_id) in audio_codecs {
        let stream_id = client
            .create_stream(
                &encoding_id,
                &Stream {
                    codec_config_id: codec_id,
                    input_streams: vec![StreamInput {
                        input_stream_id: audio_input.clone(),
                    }],
                    name: format!("Stream Atmos {}bps", rendition.bitrate),
                    mode: StreamMode::Standard,
                },
            )
            .await
            .with_context(|| {
                format!("Failed to create Atmos stream for {}bps", rendition.bitrate)
            })?;
        audio_streams.push((rendition, stream_id));
    }

    let muxing = MuxingSettings {
        client,
        encoding_id: &encoding_id,
        output_id: &output_id,
        segment_naming: &section.segment_naming,
    };

    for (rendition, stream_id) in video_streams {
        muxing
            .create(
                stream_id,
                format!("{}video/{}", base_path, rendition.height),
                format!("Video FMP4 Muxing {}p", rendition.height),
            )
            .await?;
    }

    for (rendition, stream_id) in audio_streams {
        muxing
            .create(
                stream_id,
                format!("{}audio/{}", base_path, rendition.bitrate),
                format!("Audio FMP4 Muxing {}bps", rendition.bitrate),
            )
            .await?;
    }

    let descriptors =
        manifest::collect_muxings(client, &encoding_id, &base_path, DrmLookup::Disabled).await?;
    let plan = manifest::plan(&encoding_id, &descriptors);
    let target = ManifestTarget {
        encoding_id: encoding_id.clone(),
        output_id,
        base_path,
    };

    let dash_manifest_id = manifest::dash::build(client, &target, &plan).await?;
    let hls_manifest_id = manifest::hls::build(client, &target, &plan, HlsVersion::V8).await?;

    let request = StartEncodingRequest {
        vod_dash_manifests: vec![ManifestResource {
            manifest_id: dash_manifest_id.clone(),
        }],
        vod_hls_manifests: vec![ManifestResource {
            manifest_id: hls_manifest_id.clone(),
        }],
        manifest_generator: Some(ManifestGenerator::V2),
    };
    session.execute_encoding(&encoding_id, &request).await?;

    Ok(RunSummary {
        encoding_id,
        dash_manifest_id,
        hls_manifest_id,
    })
}

struct MuxingSettings<'a> {
    client: &'a BitmovinClient,
    encoding_id: &'a EncodingId,
    output_id: &'a OutputId,
    segment_naming: &'a str,
}

impl MuxingSettings<'_> {
    async fn create(&self, stream_id: StreamId, output_path: String, name: String) -> Result<()> {
        let muxing_id = self
            .client
            .create_fmp4_muxing(
                self.encoding_id,
                &Fmp4Muxing {
                    segment_length: SEGMENT_LENGTH,
                    segment_naming: self.segment_naming.to_string(),
                    init_segment_name: INIT_SEGMENT_NAME.to_string(),
                    streams: vec![MuxingStream { stream_id }],
                    outputs: vec![EncodingOutput::public(self.output_id.clone(), output_path)],
                    name: name.clone(),
                },
            )
            .await
            .with_context(|| format!("Failed to create muxing '{}'", name))?;

        tracing::debug!("Created muxing '{}' ({})", name, muxing_id);
        Ok(())
    }
}
