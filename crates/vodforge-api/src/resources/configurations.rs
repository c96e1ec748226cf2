use crate::client::BitmovinClient;
use crate::error::{Error, Result};
use crate::ids::CodecConfigId;
use crate::models::codec::CodecConfigTypeResponse;
use crate::models::{
    AacAudioConfiguration, CodecConfigDetails, CodecConfigType, DolbyAtmosAudioConfiguration,
    H264VideoConfiguration, H265VideoConfiguration,
};

/// Path segment under `/encoding/configurations` for a codec type.
fn configuration_path(codec_type: CodecConfigType) -> Option<&'static str> {
    match codec_type {
        CodecConfigType::Aac => Some("audio/aac"),
        CodecConfigType::DolbyAtmos => Some("audio/dolby-atmos"),
        CodecConfigType::Ac3 => Some("audio/ac3"),
        CodecConfigType::Eac3 => Some("audio/eac3"),
        CodecConfigType::H264 => Some("video/h264"),
        CodecConfigType::H265 => Some("video/h265"),
        CodecConfigType::Av1 => Some("video/av1"),
        CodecConfigType::Vp9 => Some("video/vp9"),
        CodecConfigType::Other => None,
    }
}

impl BitmovinClient {
    pub async fn create_h264_configuration(
        &self,
        config: &H264VideoConfiguration,
    ) -> Result<CodecConfigId> {
        self.create("/encoding/configurations/video/h264", config)
            .await
    }

    pub async fn create_h265_configuration(
        &self,
        config: &H265VideoConfiguration,
    ) -> Result<CodecConfigId> {
        self.create("/encoding/configurations/video/h265", config)
            .await
    }

    pub async fn create_aac_configuration(
        &self,
        config: &AacAudioConfiguration,
    ) -> Result<CodecConfigId> {
        self.create("/encoding/configurations/audio/aac", config)
            .await
    }

    pub async fn create_dolby_atmos_configuration(
        &self,
        config: &DolbyAtmosAudioConfiguration,
    ) -> Result<CodecConfigId> {
        self.create("/encoding/configurations/audio/dolby-atmos", config)
            .await
    }

    /// Look up which kind of codec configuration an id refers to.
    pub async fn codec_config_type(&self, config_id: &CodecConfigId) -> Result<CodecConfigType> {
        let path = format!("/encoding/configurations/{config_id}/type");
        let response: CodecConfigTypeResponse = self.get(&path).await?;
        Ok(response.codec_type)
    }

    /// Fetch a codec configuration of a known type.
    pub async fn get_codec_configuration(
        &self,
        codec_type: CodecConfigType,
        config_id: &CodecConfigId,
    ) -> Result<CodecConfigDetails> {
        let kind = configuration_path(codec_type).ok_or_else(|| {
            Error::invalid_argument(format!(
                "codec configuration {config_id} has an unsupported type"
            ))
        })?;
        let path = format!("/encoding/configurations/{kind}/{config_id}");
        self.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_paths() {
        assert_eq!(configuration_path(CodecConfigType::Aac), Some("audio/aac"));
        assert_eq!(
            configuration_path(CodecConfigType::DolbyAtmos),
            Some("audio/dolby-atmos")
        );
        assert_eq!(configuration_path(CodecConfigType::H265), Some("video/h265"));
        assert_eq!(configuration_path(CodecConfigType::Other), None);
    }
}
