use crate::client::BitmovinClient;
use crate::error::Result;
use crate::ids::{EncodingId, InputStreamId, StreamId};
use crate::models::{
    DolbyAtmosIngestInputStream, DolbyVisionInputStream, Encoding, IngestInputStream,
    StartEncodingRequest, Stream, StreamDetails, Task,
};
use serde::de::IgnoredAny;

impl BitmovinClient {
    pub async fn create_encoding(&self, encoding: &Encoding) -> Result<EncodingId> {
        self.create("/encoding/encodings", encoding).await
    }

    pub async fn create_ingest_input_stream(
        &self,
        encoding_id: &EncodingId,
        stream: &IngestInputStream,
    ) -> Result<InputStreamId> {
        let path = format!("/encoding/encodings/{encoding_id}/input-streams/ingest");
        self.create(&path, stream).await
    }

    pub async fn create_dolby_vision_input_stream(
        &self,
        encoding_id: &EncodingId,
        stream: &DolbyVisionInputStream,
    ) -> Result<InputStreamId> {
        let path = format!("/encoding/encodings/{encoding_id}/input-streams/dolby-vision");
        self.create(&path, stream).await
    }

    pub async fn create_dolby_atmos_input_stream(
        &self,
        encoding_id: &EncodingId,
        stream: &DolbyAtmosIngestInputStream,
    ) -> Result<InputStreamId> {
        let path = format!("/encoding/encodings/{encoding_id}/input-streams/dolby-atmos");
        self.create(&path, stream).await
    }

    pub async fn create_stream(
        &self,
        encoding_id: &EncodingId,
        stream: &Stream,
    ) -> Result<StreamId> {
        let path = format!("/encoding/encodings/{encoding_id}/streams");
        self.create(&path, stream).await
    }

    pub async fn get_stream(
        &self,
        encoding_id: &EncodingId,
        stream_id: &StreamId,
    ) -> Result<StreamDetails> {
        let path = format!("/encoding/encodings/{encoding_id}/streams/{stream_id}");
        self.get(&path).await
    }

    pub async fn start_encoding(
        &self,
        encoding_id: &EncodingId,
        request: &StartEncodingRequest,
    ) -> Result<()> {
        let path = format!("/encoding/encodings/{encoding_id}/start");
        let _: IgnoredAny = self.post(&path, request).await?;
        Ok(())
    }

    pub async fn encoding_status(&self, encoding_id: &EncodingId) -> Result<Task> {
        let path = format!("/encoding/encodings/{encoding_id}/status");
        self.get(&path).await
    }
}
