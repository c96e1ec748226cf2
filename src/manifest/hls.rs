use super::{ManifestPlan, ManifestTarget, HLS_MANIFEST_NAME};
use anyhow::{Context, Result};
use vodforge_api::models::{EncodingOutput, HlsManifest, HlsVersion};
use vodforge_api::{BitmovinClient, ManifestId};

/// Create an HLS manifest with one audio group and a variant per video
/// rendition. Master and media playlists share `version`.
pub async fn build(
    client: &BitmovinClient,
    target: &ManifestTarget,
    plan: &ManifestPlan,
    version: HlsVersion,
) -> Result<ManifestId> {
    let manifest_id = client
        .create_hls_manifest(&HlsManifest {
            manifest_name: HLS_MANIFEST_NAME.to_string(),
            outputs: vec![EncodingOutput::public(
                target.output_id.clone(),
                target.base_path.clone(),
            )],
            name: "HLS Manifest".to_string(),
            hls_master_playlist_version: version,
            hls_media_playlist_version: version,
        })
        .await
        .context("Failed to create HLS manifest")?;

    for media in &plan.hls_audio {
        client
            .create_hls_audio_media(&manifest_id, media)
            .await
            .with_context(|| format!("Failed to add HLS audio media {}", media.uri))?;
    }

    for stream in &plan.hls_video {
        client
            .create_hls_stream(&manifest_id, stream)
            .await
            .with_context(|| format!("Failed to add HLS variant {}", stream.uri))?;
    }

    tracing::info!(
        "HLS manifest {} (v{}) built with {} variants and {} audio renditions",
        manifest_id,
        version.number(),
        plan.hls_video.len(),
        plan.hls_audio.len()
    );

    Ok(manifest_id)
}
