use crate::client::BitmovinClient;
use crate::error::Result;
use crate::ids::{
    AdaptationSetId, ContentProtectionId, HlsEntryId, ManifestId, PeriodId, RepresentationId,
};
use crate::models::{
    AudioAdaptationSet, AudioMediaInfo, ContentProtection, DashFmp4Representation, DashManifest,
    HlsManifest, Period, StreamInfo, Task, VideoAdaptationSet,
};
use serde::de::IgnoredAny;

// ---------------------------------------------------------------------------
// DASH
// ---------------------------------------------------------------------------

impl BitmovinClient {
    pub async fn create_dash_manifest(&self, manifest: &DashManifest) -> Result<ManifestId> {
        self.create("/encoding/manifests/dash", manifest).await
    }

    pub async fn create_period(
        &self,
        manifest_id: &ManifestId,
        period: &Period,
    ) -> Result<PeriodId> {
        let path = format!("/encoding/manifests/dash/{manifest_id}/periods");
        self.create(&path, period).await
    }

    pub async fn create_video_adaptation_set(
        &self,
        manifest_id: &ManifestId,
        period_id: &PeriodId,
        adaptation_set: &VideoAdaptationSet,
    ) -> Result<AdaptationSetId> {
        let path = format!(
            "/encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/video"
        );
        self.create(&path, adaptation_set).await
    }

    pub async fn create_audio_adaptation_set(
        &self,
        manifest_id: &ManifestId,
        period_id: &PeriodId,
        adaptation_set: &AudioAdaptationSet,
    ) -> Result<AdaptationSetId> {
        let path = format!(
            "/encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/audio"
        );
        self.create(&path, adaptation_set).await
    }

    pub async fn create_fmp4_representation(
        &self,
        manifest_id: &ManifestId,
        period_id: &PeriodId,
        adaptation_set_id: &AdaptationSetId,
        representation: &DashFmp4Representation,
    ) -> Result<RepresentationId> {
        let path = format!(
            "/encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/{adaptation_set_id}/representations/fmp4"
        );
        self.create(&path, representation).await
    }

    pub async fn create_content_protection(
        &self,
        manifest_id: &ManifestId,
        period_id: &PeriodId,
        adaptation_set_id: &AdaptationSetId,
        representation_id: &RepresentationId,
        protection: &ContentProtection,
    ) -> Result<ContentProtectionId> {
        let path = format!(
            "/encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/{adaptation_set_id}/representations/fmp4/{representation_id}/contentprotection"
        );
        self.create(&path, protection).await
    }

    pub async fn start_dash_manifest(&self, manifest_id: &ManifestId) -> Result<()> {
        let path = format!("/encoding/manifests/dash/{manifest_id}/start");
        let _: IgnoredAny = self.post_empty(&path).await?;
        Ok(())
    }

    pub async fn dash_manifest_status(&self, manifest_id: &ManifestId) -> Result<Task> {
        let path = format!("/encoding/manifests/dash/{manifest_id}/status");
        self.get(&path).await
    }
}

// ---------------------------------------------------------------------------
// HLS
// ---------------------------------------------------------------------------

impl BitmovinClient {
    pub async fn create_hls_manifest(&self, manifest: &HlsManifest) -> Result<ManifestId> {
        self.create("/encoding/manifests/hls", manifest).await
    }

    pub async fn create_hls_audio_media(
        &self,
        manifest_id: &ManifestId,
        media: &AudioMediaInfo,
    ) -> Result<HlsEntryId> {
        let path = format!("/encoding/manifests/hls/{manifest_id}/media/audio");
        self.create(&path, media).await
    }

    pub async fn create_hls_stream(
        &self,
        manifest_id: &ManifestId,
        stream: &StreamInfo,
    ) -> Result<HlsEntryId> {
        let path = format!("/encoding/manifests/hls/{manifest_id}/streams");
        self.create(&path, stream).await
    }

    pub async fn start_hls_manifest(&self, manifest_id: &ManifestId) -> Result<()> {
        let path = format!("/encoding/manifests/hls/{manifest_id}/start");
        let _: IgnoredAny = self.post_empty(&path).await?;
        Ok(())
    }

    pub async fn hls_manifest_status(&self, manifest_id: &ManifestId) -> Result<Task> {
        let path = format!("/encoding/manifests/hls/{manifest_id}/status");
        self.get(&path).await
    }
}
