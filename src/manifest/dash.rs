use super::{DashEntry, ManifestPlan, ManifestTarget, DASH_MANIFEST_NAME};
use anyhow::{Context, Result};
use vodforge_api::models::{
    AudioAdaptationSet, DashManifest, EncodingOutput, Period, VideoAdaptationSet,
};
use vodforge_api::{AdaptationSetId, BitmovinClient, ManifestId, PeriodId};

/// Create a single-period DASH manifest holding one video and one audio
/// adaptation set, filled from `plan`.
pub async fn build(
    client: &BitmovinClient,
    target: &ManifestTarget,
    plan: &ManifestPlan,
) -> Result<ManifestId> {
    let manifest_id = client
        .create_dash_manifest(&DashManifest {
            manifest_name: DASH_MANIFEST_NAME.to_string(),
            outputs: vec![EncodingOutput::public(
                target.output_id.clone(),
                target.base_path.clone(),
            )],
            name: "DASH Manifest".to_string(),
        })
        .await
        .context("Failed to create DASH manifest")?;

    let period_id = client
        .create_period(&manifest_id, &Period::default())
        .await
        .context("Failed to create DASH period")?;

    let video_set = client
        .create_video_adaptation_set(&manifest_id, &period_id, &VideoAdaptationSet::default())
        .await
        .context("Failed to create video adaptation set")?;

    let audio_set = client
        .create_audio_adaptation_set(
            &manifest_id,
            &period_id,
            &AudioAdaptationSet {
                lang: super::AUDIO_LANGUAGE.to_string(),
            },
        )
        .await
        .context("Failed to create audio adaptation set")?;

    for entry in &plan.dash_video {
        add_representation(client, &manifest_id, &period_id, &video_set, entry).await?;
    }
    for entry in &plan.dash_audio {
        add_representation(client, &manifest_id, &period_id, &audio_set, entry).await?;
    }

    tracing::info!(
        "DASH manifest {} built with {} video and {} audio representations",
        manifest_id,
        plan.dash_video.len(),
        plan.dash_audio.len()
    );

    Ok(manifest_id)
}

async fn add_representation(
    client: &BitmovinClient,
    manifest_id: &ManifestId,
    period_id: &PeriodId,
    adaptation_set_id: &AdaptationSetId,
    entry: &DashEntry,
) -> Result<()> {
    let representation_id = client
        .create_fmp4_representation(
            manifest_id,
            period_id,
            adaptation_set_id,
            &entry.representation,
        )
        .await
        .with_context(|| {
            format!(
                "Failed to add DASH representation for muxing {}",
                entry.representation.muxing_id
            )
        })?;

    if let Some(protection) = &entry.content_protection {
        client
            .create_content_protection(
                manifest_id,
                period_id,
                adaptation_set_id,
                &representation_id,
                protection,
            )
            .await
            .with_context(|| {
                format!("Failed to add content protection for DRM {}", protection.drm_id)
            })?;
    }

    Ok(())
}
