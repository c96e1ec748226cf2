use crate::client::BitmovinClient;
use crate::error::Result;
use crate::ids::{DrmId, EncodingId, MuxingId};
use crate::models::{CencDrm, DrmDetails, Fmp4Muxing, MuxingDetails};

impl BitmovinClient {
    pub async fn create_fmp4_muxing(
        &self,
        encoding_id: &EncodingId,
        muxing: &Fmp4Muxing,
    ) -> Result<MuxingId> {
        let path = format!("/encoding/encodings/{encoding_id}/muxings/fmp4");
        self.create(&path, muxing).await
    }

    /// All fMP4 muxings of an encoding, across every page.
    pub async fn list_fmp4_muxings(&self, encoding_id: &EncodingId) -> Result<Vec<MuxingDetails>> {
        let path = format!("/encoding/encodings/{encoding_id}/muxings/fmp4");
        self.list_all(&path).await
    }

    pub async fn create_cenc_drm(
        &self,
        encoding_id: &EncodingId,
        muxing_id: &MuxingId,
        drm: &CencDrm,
    ) -> Result<DrmId> {
        let path = format!("/encoding/encodings/{encoding_id}/muxings/fmp4/{muxing_id}/drm/cenc");
        self.create(&path, drm).await
    }

    pub async fn list_cenc_drms(
        &self,
        encoding_id: &EncodingId,
        muxing_id: &MuxingId,
    ) -> Result<Vec<DrmDetails>> {
        let path = format!("/encoding/encodings/{encoding_id}/muxings/fmp4/{muxing_id}/drm/cenc");
        self.list_all(&path).await
    }
}
