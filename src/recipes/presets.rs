//! Codec configuration presets derived from ladder renditions.

use crate::config::{AacRendition, AtmosRendition, H264Rendition, H265Rendition};
use vodforge_api::models::{
    AacAudioConfiguration, AacChannelLayout, AdaptiveQuantMode, ColorConfig,
    DolbyAtmosAudioConfiguration, DolbyAtmosDialogueIntelligence, DolbyAtmosLoudnessControl,
    DolbyAtmosMeteringMode, H264VideoConfiguration, H265VideoConfiguration, MaxCtuSize,
    MotionSearch, PresetConfiguration, ProfileH264, TuDepth, WeightedPredictionPFrames,
};

/// Keyframe interval in seconds, fixed so segments align across renditions.
const KEYFRAME_INTERVAL: f64 = 2.0;

/// Profile dependent H.264 encoder switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H264Tuning {
    pub adaptive_spatial_transform: bool,
    pub cabac: bool,
    pub ref_frames: u32,
    pub bframes: u32,
    pub weighted_prediction: WeightedPredictionPFrames,
}

impl H264Tuning {
    pub fn for_profile(profile: ProfileH264) -> Self {
        match profile {
            ProfileH264::High => Self {
                adaptive_spatial_transform: true,
                cabac: true,
                ref_frames: 4,
                bframes: 3,
                weighted_prediction: WeightedPredictionPFrames::Smart,
            },
            ProfileH264::Main => Self {
                adaptive_spatial_transform: false,
                ..Self::for_profile(ProfileH264::High)
            },
            ProfileH264::Baseline => Self {
                adaptive_spatial_transform: false,
                cabac: false,
                ref_frames: 4,
                bframes: 0,
                weighted_prediction: WeightedPredictionPFrames::Disabled,
            },
        }
    }
}

pub fn h264_configuration(rendition: &H264Rendition) -> H264VideoConfiguration {
    let tuning = H264Tuning::for_profile(rendition.profile);

    H264VideoConfiguration {
        name: format!("H264 {}p {}bps", rendition.height, rendition.bitrate),
        height: rendition.height,
        bitrate: rendition.bitrate,
        max_bitrate: rendition.bitrate * 6 / 5,
        bufsize: rendition.bitrate * 3 / 2,
        profile: rendition.profile,
        level: rendition.level,
        min_keyframe_interval: KEYFRAME_INTERVAL,
        max_keyframe_interval: KEYFRAME_INTERVAL,
        color_config: ColorConfig::copy_all(),
        ref_frames: tuning.ref_frames,
        bframes: tuning.bframes,
        cabac: tuning.cabac,
        adaptive_spatial_transform: tuning.adaptive_spatial_transform,
        weighted_prediction_p_frames: tuning.weighted_prediction,
        preset_configuration: PresetConfiguration::VodHighQuality,
    }
}

pub fn h265_configuration(rendition: &H265Rendition) -> H265VideoConfiguration {
    H265VideoConfiguration {
        name: format!("H265 {}p {}bps", rendition.height, rendition.bitrate),
        height: rendition.height,
        bitrate: rendition.bitrate,
        max_bitrate: rendition.bitrate * 2,
        bufsize: rendition.bitrate * 4,
        level: rendition.level,
        dynamic_range_format: rendition.dynamic_range,
        min_keyframe_interval: KEYFRAME_INTERVAL,
        max_keyframe_interval: KEYFRAME_INTERVAL,
        rc_lookahead: 60,
        sub_me: 5,
        max_ctu_size: MaxCtuSize::S64,
        motion_search: MotionSearch::Star,
        motion_search_range: 92,
        tu_intra_depth: TuDepth::D4,
        tu_inter_depth: TuDepth::D4,
        weight_prediction_on_p_slice: true,
        weight_prediction_on_b_slice: true,
        scene_cut_threshold: 40,
        adaptive_quantization_mode: AdaptiveQuantMode::AutoVarianceDarkScenes,
        adaptive_quantization_strength: rendition.aq_strength,
        psy_rate_distortion_optimization: 0.0,
        psy_rate_distortion_optimized_quantization: 0.0,
        qp_min: 15,
        sao: true,
    }
}

pub fn aac_configuration(rendition: &AacRendition) -> AacAudioConfiguration {
    AacAudioConfiguration {
        name: Some(format!("AAC {}", kbps(rendition.bitrate))),
        bitrate: rendition.bitrate,
        rate: rendition.rate,
        channel_layout: AacChannelLayout::Stereo,
    }
}

pub fn dolby_atmos_configuration(rendition: &AtmosRendition) -> DolbyAtmosAudioConfiguration {
    DolbyAtmosAudioConfiguration {
        name: Some(format!("Dolby Atmos {}bps", rendition.bitrate)),
        bitrate: rendition.bitrate,
        rate: rendition.rate,
        loudness_control: DolbyAtmosLoudnessControl {
            metering_mode: DolbyAtmosMeteringMode::ItuRBs1770_4,
            dialogue_intelligence: DolbyAtmosDialogueIntelligence::Enabled,
            speech_threshold: 15,
        },
    }
}

/// `128000` -> `128kbps`
pub fn kbps(bitrate: u64) -> String {
    format!("{:.0}kbps", bitrate as f64 / 1000.0)
}
