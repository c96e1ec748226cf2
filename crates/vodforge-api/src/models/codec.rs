//! Codec configurations.
//!
//! A codec configuration is an immutable parameter set that streams point
//! at. Only the knobs vodforge actually sets are modelled; everything else is
//! left to the platform's defaults by omitting the field.

use crate::ids::CodecConfigId;
use serde::{Deserialize, Serialize};

/// Kind of a codec configuration as reported by the type lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodecConfigType {
    Aac,
    DolbyAtmos,
    Ac3,
    Eac3,
    H264,
    H265,
    Av1,
    Vp9,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CodecConfigTypeResponse {
    #[serde(rename = "type")]
    pub codec_type: CodecConfigType,
}

/// Fields read back from any codec configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfigDetails {
    pub id: CodecConfigId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

// ---------------------------------------------------------------------------
// H.264
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileH264 {
    Baseline,
    Main,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelH264 {
    #[serde(rename = "1")]
    L1,
    #[serde(rename = "1b")]
    L1b,
    #[serde(rename = "1.1")]
    L11,
    #[serde(rename = "1.2")]
    L12,
    #[serde(rename = "1.3")]
    L13,
    #[serde(rename = "2")]
    L2,
    #[serde(rename = "2.1")]
    L21,
    #[serde(rename = "2.2")]
    L22,
    #[serde(rename = "3")]
    L3,
    #[serde(rename = "3.1")]
    L31,
    #[serde(rename = "3.2")]
    L32,
    #[serde(rename = "4")]
    L4,
    #[serde(rename = "4.1")]
    L41,
    #[serde(rename = "4.2")]
    L42,
    #[serde(rename = "5")]
    L5,
    #[serde(rename = "5.1")]
    L51,
    #[serde(rename = "5.2")]
    L52,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightedPredictionPFrames {
    Disabled,
    Simple,
    Smart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetConfiguration {
    VodHighQuality,
    VodQuality,
    VodStandard,
    VodSpeed,
    VodHighSpeed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub copy_color_primaries_flag: bool,
    pub copy_color_transfer_flag: bool,
    pub copy_color_space_flag: bool,
}

impl ColorConfig {
    /// Carry the source colour description through unchanged.
    pub fn copy_all() -> Self {
        Self {
            copy_color_primaries_flag: true,
            copy_color_transfer_flag: true,
            copy_color_space_flag: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct H264VideoConfiguration {
    pub name: String,
    pub height: u32,
    pub bitrate: u64,
    pub max_bitrate: u64,
    pub bufsize: u64,
    pub profile: ProfileH264,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelH264>,
    pub min_keyframe_interval: f64,
    pub max_keyframe_interval: f64,
    pub color_config: ColorConfig,
    pub ref_frames: u32,
    pub bframes: u32,
    pub cabac: bool,
    pub adaptive_spatial_transform: bool,
    pub weighted_prediction_p_frames: WeightedPredictionPFrames,
    pub preset_configuration: PresetConfiguration,
}

// ---------------------------------------------------------------------------
// H.265
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelH265 {
    #[serde(rename = "1")]
    L1,
    #[serde(rename = "2")]
    L2,
    #[serde(rename = "2.1")]
    L21,
    #[serde(rename = "3")]
    L3,
    #[serde(rename = "3.1")]
    L31,
    #[serde(rename = "4")]
    L4,
    #[serde(rename = "4.1")]
    L41,
    #[serde(rename = "5")]
    L5,
    #[serde(rename = "5.1")]
    L51,
    #[serde(rename = "5.2")]
    L52,
    #[serde(rename = "6")]
    L6,
    #[serde(rename = "6.1")]
    L61,
    #[serde(rename = "6.2")]
    L62,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum H265DynamicRangeFormat {
    DolbyVision,
    Hdr10,
    Hlg,
    Sdr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxCtuSize {
    #[serde(rename = "16")]
    S16,
    #[serde(rename = "32")]
    S32,
    #[serde(rename = "64")]
    S64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MotionSearch {
    Dia,
    Hex,
    Umh,
    Star,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuDepth {
    #[serde(rename = "1")]
    D1,
    #[serde(rename = "2")]
    D2,
    #[serde(rename = "3")]
    D3,
    #[serde(rename = "4")]
    D4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdaptiveQuantMode {
    Disabled,
    Variance,
    AutoVariance,
    AutoVarianceDarkScenes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct H265VideoConfiguration {
    pub name: String,
    pub height: u32,
    pub bitrate: u64,
    pub max_bitrate: u64,
    pub bufsize: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelH265>,
    pub dynamic_range_format: H265DynamicRangeFormat,
    pub min_keyframe_interval: f64,
    pub max_keyframe_interval: f64,
    pub rc_lookahead: u32,
    pub sub_me: u32,
    #[serde(rename = "maxCTUSize")]
    pub max_ctu_size: MaxCtuSize,
    pub motion_search: MotionSearch,
    pub motion_search_range: u32,
    pub tu_intra_depth: TuDepth,
    pub tu_inter_depth: TuDepth,
    pub weight_prediction_on_p_slice: bool,
    pub weight_prediction_on_b_slice: bool,
    pub scene_cut_threshold: u32,
    pub adaptive_quantization_mode: AdaptiveQuantMode,
    pub adaptive_quantization_strength: f64,
    pub psy_rate_distortion_optimization: f64,
    pub psy_rate_distortion_optimized_quantization: f64,
    pub qp_min: u32,
    pub sao: bool,
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AacChannelLayout {
    #[serde(rename = "MONO")]
    Mono,
    #[serde(rename = "2.0")]
    Stereo,
    #[serde(rename = "5.1")]
    Surround51,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AacAudioConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub bitrate: u64,
    pub rate: f64,
    pub channel_layout: AacChannelLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DolbyAtmosMeteringMode {
    #[serde(rename = "ITU-R BS.1770-1")]
    ItuRBs1770_1,
    #[serde(rename = "ITU-R BS.1770-2")]
    ItuRBs1770_2,
    #[serde(rename = "ITU-R BS.1770-3")]
    ItuRBs1770_3,
    #[serde(rename = "ITU-R BS.1770-4")]
    ItuRBs1770_4,
    #[serde(rename = "Leq(A)")]
    LeqA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DolbyAtmosDialogueIntelligence {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DolbyAtmosLoudnessControl {
    pub metering_mode: DolbyAtmosMeteringMode,
    pub dialogue_intelligence: DolbyAtmosDialogueIntelligence,
    pub speech_threshold: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DolbyAtmosAudioConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub bitrate: u64,
    pub rate: f64,
    pub loudness_control: DolbyAtmosLoudnessControl,
}
