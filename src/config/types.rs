use serde::{Deserialize, Serialize};
use std::time::Duration;
use vodforge_api::models::{
    EncryptionMode, H265DynamicRangeFormat, LevelH264, LevelH265, ProfileH264, S3AccessStyle,
    S3SignatureVersion, StreamMode,
};
use vodforge_api::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub encoding: EncodingConfig,

    /// Where source files are read from. Required by `run`.
    #[serde(default)]
    pub input: Option<InputConfig>,

    /// Where renditions and manifests are written. Required by `run`.
    #[serde(default)]
    pub output: Option<OutputConfig>,

    #[serde(default)]
    pub h264_cenc: H264CencConfig,

    #[serde(default)]
    pub dolby_vision_atmos: DolbyVisionAtmosConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub tenant_org_id: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            tenant_org_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_key.clone()).with_base_url(&self.base_url);
        if let Some(org) = &self.tenant_org_id {
            config = config.with_tenant_org_id(org.clone());
        }
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Seconds to sleep before every status query
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    5
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncodingConfig {
    /// Prefix used in encoding names and the default output base path
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_cloud_region")]
    pub cloud_region: String,

    #[serde(default = "default_encoder_version")]
    pub encoder_version: String,
}

fn default_title() -> String {
    "vodforge".to_string()
}

fn default_cloud_region() -> String {
    "AKAMAI_JP_OSA".to_string()
}

fn default_encoder_version() -> String {
    "STABLE".to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            cloud_region: default_cloud_region(),
            encoder_version: default_encoder_version(),
        }
    }
}

fn default_input_name() -> String {
    "Input".to_string()
}

fn default_output_name() -> String {
    "Output".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputConfig {
    S3 {
        access_key: String,
        secret_key: String,
        bucket_name: String,
        #[serde(default = "default_input_name")]
        name: String,
    },
    Https {
        host: String,
        #[serde(default = "default_input_name")]
        name: String,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Prefix for every output path. Defaults to `output/{title}/`.
    #[serde(default)]
    pub base_path: Option<String>,

    #[serde(flatten)]
    pub destination: OutputDestination,
}

impl OutputConfig {
    pub fn base_path(&self, title: &str) -> String {
        self.base_path
            .clone()
            .unwrap_or_else(|| format!("output/{}/", title))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutputDestination {
    AkamaiNetstorage {
        host: String,
        username: String,
        password: String,
        #[serde(default = "default_output_name")]
        name: String,
    },
    GenericS3 {
        access_key: String,
        secret_key: String,
        bucket_name: String,
        host: String,
        #[serde(default = "default_s3_port")]
        port: u16,
        #[serde(default = "default_true")]
        ssl: bool,
        #[serde(default = "default_access_style")]
        access_style: S3AccessStyle,
        #[serde(default = "default_signature_version")]
        signature_version: S3SignatureVersion,
        #[serde(default = "default_output_name")]
        name: String,
    },
    S3 {
        access_key: String,
        secret_key: String,
        bucket_name: String,
        #[serde(default = "default_output_name")]
        name: String,
    },
}

fn default_s3_port() -> u16 {
    443
}

fn default_true() -> bool {
    true
}

fn default_access_style() -> S3AccessStyle {
    S3AccessStyle::VirtualHosted
}

fn default_signature_version() -> S3SignatureVersion {
    S3SignatureVersion::V4
}

// ---------------------------------------------------------------------------
// h264-cenc recipe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct H264CencConfig {
    /// Source file path inside the input
    #[serde(default)]
    pub input_path: Option<String>,

    #[serde(default = "default_h264_segment_naming")]
    pub segment_naming: String,

    #[serde(default)]
    pub drm: Option<CencConfig>,

    #[serde(default = "default_h264_ladder")]
    pub video: Vec<H264Rendition>,

    #[serde(default = "default_aac_ladder")]
    pub audio: Vec<AacRendition>,
}

fn default_h264_segment_naming() -> String {
    "segment_%number%.m4s".to_string()
}

impl Default for H264CencConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            segment_naming: default_h264_segment_naming(),
            drm: None,
            video: default_h264_ladder(),
            audio: default_aac_ladder(),
        }
    }
}

/// CENC key material and per-system signalling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CencConfig {
    /// 16-byte content key, hex encoded
    pub key: String,

    /// 16-byte key id, hex encoded
    pub kid: String,

    #[serde(default = "default_encryption_mode")]
    pub encryption_mode: EncryptionMode,

    #[serde(default)]
    pub widevine_pssh: Option<String>,

    #[serde(default)]
    pub playready_la_url: Option<String>,

    #[serde(default)]
    pub fairplay_iv: Option<String>,

    #[serde(default)]
    pub fairplay_uri: Option<String>,
}

fn default_encryption_mode() -> EncryptionMode {
    EncryptionMode::Cbc
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct H264Rendition {
    pub height: u32,

    /// Target bitrate in bits per second
    pub bitrate: u64,

    #[serde(default = "default_h264_profile")]
    pub profile: ProfileH264,

    #[serde(default)]
    pub level: Option<LevelH264>,

    #[serde(default = "default_stream_mode")]
    pub mode: StreamMode,
}

fn default_h264_profile() -> ProfileH264 {
    ProfileH264::High
}

fn default_stream_mode() -> StreamMode {
    StreamMode::Standard
}

impl H264Rendition {
    fn high(height: u32, bitrate: u64) -> Self {
        Self {
            height,
            bitrate,
            profile: ProfileH264::High,
            level: None,
            mode: StreamMode::Standard,
        }
    }
}

fn default_h264_ladder() -> Vec<H264Rendition> {
    vec![
        H264Rendition::high(240, 300_000),
        H264Rendition::high(360, 800_000),
        H264Rendition::high(480, 1_200_000),
        H264Rendition::high(540, 2_000_000),
        H264Rendition::high(720, 4_000_000),
        H264Rendition {
            level: Some(LevelH264::L4),
            ..H264Rendition::high(1080, 6_000_000)
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AacRendition {
    pub bitrate: u64,

    /// Sample rate in Hz
    #[serde(default = "default_audio_rate")]
    pub rate: f64,
}

fn default_audio_rate() -> f64 {
    48_000.0
}

fn default_aac_ladder() -> Vec<AacRendition> {
    vec![
        AacRendition {
            bitrate: 128_000,
            rate: 48_000.0,
        },
        AacRendition {
            bitrate: 64_000,
            rate: 44_100.0,
        },
    ]
}

// ---------------------------------------------------------------------------
// dolby-vision-atmos recipe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DolbyVisionAtmosConfig {
    /// Dolby Vision mezzanine path inside the input
    #[serde(default)]
    pub video_input_path: Option<String>,

    /// Dolby Vision metadata XML path inside the input
    #[serde(default)]
    pub metadata_input_path: Option<String>,

    /// Dolby Atmos ADM BWF path inside the input
    #[serde(default)]
    pub atmos_input_path: Option<String>,

    #[serde(default = "default_dolby_segment_naming")]
    pub segment_naming: String,

    #[serde(default = "default_h265_ladder")]
    pub video: Vec<H265Rendition>,

    #[serde(default = "default_atmos_ladder")]
    pub audio: Vec<AtmosRendition>,
}

fn default_dolby_segment_naming() -> String {
    "seg_%number%.m4s".to_string()
}

impl Default for DolbyVisionAtmosConfig {
    fn default() -> Self {
        Self {
            video_input_path: None,
            metadata_input_path: None,
            atmos_input_path: None,
            segment_naming: default_dolby_segment_naming(),
            video: default_h265_ladder(),
            audio: default_atmos_ladder(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct H265Rendition {
    pub height: u32,

    pub bitrate: u64,

    #[serde(default)]
    pub level: Option<LevelH265>,

    #[serde(default = "default_aq_strength")]
    pub aq_strength: f64,

    #[serde(default = "default_dynamic_range")]
    pub dynamic_range: H265DynamicRangeFormat,

    #[serde(default = "default_stream_mode")]
    pub mode: StreamMode,
}

fn default_aq_strength() -> f64 {
    1.0
}

fn default_dynamic_range() -> H265DynamicRangeFormat {
    H265DynamicRangeFormat::DolbyVision
}

fn default_h265_ladder() -> Vec<H265Rendition> {
    vec![
        H265Rendition {
            height: 1080,
            bitrate: 2_000_000,
            level: None,
            aq_strength: 0.5,
            dynamic_range: H265DynamicRangeFormat::DolbyVision,
            mode: StreamMode::Standard,
        },
        H265Rendition {
            height: 540,
            bitrate: 1_000_000,
            level: None,
            aq_strength: 1.2,
            dynamic_range: H265DynamicRangeFormat::DolbyVision,
            mode: StreamMode::Standard,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AtmosRendition {
    pub bitrate: u64,

    #[serde(default = "default_audio_rate")]
    pub rate: f64,
}

fn default_atmos_ladder() -> Vec<AtmosRendition> {
    vec![AtmosRendition {
        bitrate: 448_000,
        rate: 48_000.0,
    }]
}
