mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable that overrides `api.api_key`
pub const API_KEY_ENV: &str = "BITMOVIN_API_KEY";

/// Environment variable that overrides `api.tenant_org_id`
pub const TENANT_ORG_ENV: &str = "BITMOVIN_TENANT_ORG_ID";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    tracing::debug!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Load config from default locations or fall back to defaults plus environment
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./vodforge.toml",
        "./config.toml",
        "~/.config/vodforge/config.toml",
        "/etc/vodforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("No config file found, using defaults");
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Credentials from the environment win over the file.
fn apply_env_overrides(config: &mut Config) {
    if let Some(key) = non_empty_env(API_KEY_ENV) {
        config.api.api_key = key;
    }
    if let Some(org) = non_empty_env(TENANT_ORG_ENV) {
        config.api.tenant_org_id = Some(org);
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.api.api_key.trim().is_empty() {
        anyhow::bail!(
            "API key is empty (set api.api_key or the {} environment variable)",
            API_KEY_ENV
        );
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs cannot be 0");
    }

    if config.polling.interval_secs == 0 {
        anyhow::bail!("polling.interval_secs cannot be 0");
    }

    if let Some(output) = &config.output {
        if let Some(base) = &output.base_path {
            if !base.ends_with('/') {
                anyhow::bail!("output.base_path must end with '/': {}", base);
            }
        }
    }

    validate_h264_cenc(&config.h264_cenc)?;
    validate_dolby_vision_atmos(&config.dolby_vision_atmos)?;

    Ok(())
}

fn validate_h264_cenc(section: &H264CencConfig) -> Result<()> {
    if section.video.is_empty() {
        anyhow::bail!("h264_cenc.video ladder is empty");
    }
    if section.audio.is_empty() {
        anyhow::bail!("h264_cenc.audio ladder is empty");
    }

    for rendition in &section.video {
        if rendition.height == 0 || rendition.bitrate == 0 {
            anyhow::bail!(
                "h264_cenc.video rendition {}p/{} needs a non-zero height and bitrate",
                rendition.height,
                rendition.bitrate
            );
        }
    }
    for rendition in &section.audio {
        check_audio(rendition.bitrate, rendition.rate, "h264_cenc.audio")?;
    }

    if let Some(drm) = &section.drm {
        validate_cenc(drm)?;
    }

    Ok(())
}

fn validate_dolby_vision_atmos(section: &DolbyVisionAtmosConfig) -> Result<()> {
    if section.video.is_empty() {
        anyhow::bail!("dolby_vision_atmos.video ladder is empty");
    }
    if section.audio.is_empty() {
        anyhow::bail!("dolby_vision_atmos.audio ladder is empty");
    }

    for rendition in &section.video {
        if rendition.height == 0 || rendition.bitrate == 0 {
            anyhow::bail!(
                "dolby_vision_atmos.video rendition {}p/{} needs a non-zero height and bitrate",
                rendition.height,
                rendition.bitrate
            );
        }
        if rendition.aq_strength < 0.0 {
            anyhow::bail!(
                "dolby_vision_atmos.video rendition {}p has a negative aq_strength",
                rendition.height
            );
        }
    }
    for rendition in &section.audio {
        check_audio(rendition.bitrate, rendition.rate, "dolby_vision_atmos.audio")?;
    }

    Ok(())
}

fn check_audio(bitrate: u64, rate: f64, section: &str) -> Result<()> {
    if bitrate == 0 {
        anyhow::bail!("{} rendition has a zero bitrate", section);
    }
    if rate <= 0.0 {
        anyhow::bail!("{} rendition {} has a non-positive sample rate", section, bitrate);
    }
    Ok(())
}

fn validate_cenc(drm: &CencConfig) -> Result<()> {
    check_hex_16("h264_cenc.drm.key", &drm.key)?;
    check_hex_16("h264_cenc.drm.kid", &drm.kid)?;

    match (&drm.fairplay_iv, &drm.fairplay_uri) {
        (Some(iv), Some(_)) => check_hex_16("h264_cenc.drm.fairplay_iv", iv)?,
        (None, None) => {}
        _ => anyhow::bail!("h264_cenc.drm.fairplay_iv and fairplay_uri must be set together"),
    }

    Ok(())
}

fn check_hex_16(field: &str, value: &str) -> Result<()> {
    let bytes = hex::decode(value).with_context(|| format!("{} is not valid hex", field))?;
    if bytes.len() != 16 {
        anyhow::bail!("{} must be 16 bytes, got {}", field, bytes.len());
    }
    Ok(())
}

/// Checks that only matter once a recipe is about to run.
pub fn require_h264_cenc(
    config: &Config,
) -> Result<(&InputConfig, &OutputConfig, &str, &CencConfig)> {
    let input = config
        .input
        .as_ref()
        .context("Config has no [input] section")?;
    let output = config
        .output
        .as_ref()
        .context("Config has no [output] section")?;
    let input_path = config
        .h264_cenc
        .input_path
        .as_deref()
        .context("h264_cenc.input_path is not set")?;
    let drm = config
        .h264_cenc
        .drm
        .as_ref()
        .context("h264_cenc.drm is not set")?;
    Ok((input, output, input_path, drm))
}

/// Source paths of the Dolby Vision / Atmos recipe.
#[derive(Debug, Clone, Copy)]
pub struct DolbySources<'a> {
    pub video: &'a str,
    pub metadata: &'a str,
    pub atmos: &'a str,
}

pub fn require_dolby_vision_atmos(
    config: &Config,
) -> Result<(&InputConfig, &OutputConfig, DolbySources<'_>)> {
    let input = config
        .input
        .as_ref()
        .context("Config has no [input] section")?;
    let output = config
        .output
        .as_ref()
        .context("Config has no [output] section")?;
    let section = &config.dolby_vision_atmos;
    let sources = DolbySources {
        video: section
            .video_input_path
            .as_deref()
            .context("dolby_vision_atmos.video_input_path is not set")?,
        metadata: section
            .metadata_input_path
            .as_deref()
            .context("dolby_vision_atmos.metadata_input_path is not set")?,
        atmos: section
            .atmos_input_path
            .as_deref()
            .context("dolby_vision_atmos.atmos_input_path is not set")?,
    };
    Ok((input, output, sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use vodforge_api::models::{LevelH264, ProfileH264, S3AccessStyle, S3SignatureVersion};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn clear_env() {
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(TENANT_ORG_ENV);
    }

    #[test]
    #[serial]
    fn test_minimal_config_gets_defaults() {
        clear_env();
        let file = write_config("[api]\napi_key = \"abc\"\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://api.bitmovin.com/v1");
        assert_eq!(config.polling.interval_secs, 5);
        assert_eq!(config.encoding.cloud_region, "AKAMAI_JP_OSA");
        assert_eq!(config.encoding.encoder_version, "STABLE");
        assert!(config.input.is_none());

        let ladder = &config.h264_cenc.video;
        let heights: Vec<u32> = ladder.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![240, 360, 480, 540, 720, 1080]);
        assert!(ladder.iter().all(|r| r.profile == ProfileH264::High));
        assert_eq!(ladder[5].level, Some(LevelH264::L4));
        assert_eq!(ladder[0].level, None);
        assert_eq!(config.h264_cenc.audio.len(), 2);
        assert_eq!(config.h264_cenc.segment_naming, "segment_%number%.m4s");

        assert_eq!(config.dolby_vision_atmos.video[0].aq_strength, 0.5);
        assert_eq!(config.dolby_vision_atmos.video[1].aq_strength, 1.2);
        assert_eq!(config.dolby_vision_atmos.audio[0].bitrate, 448_000);
        assert_eq!(config.dolby_vision_atmos.segment_naming, "seg_%number%.m4s");
    }

    #[test]
    #[serial]
    fn test_tagged_input_and_output() {
        clear_env();
        let file = write_config(
            r#"
[api]
api_key = "abc"

[input]
type = "https"
host = "media.example.com"

[output]
type = "generic-s3"
base_path = "output/dv/"
access_key = "ak"
secret_key = "sk"
bucket_name = "bucket"
host = "us-east-1.linodeobjects.com"
"#,
        );
        let config = load_config(file.path()).unwrap();

        match config.input.unwrap() {
            InputConfig::Https { host, name } => {
                assert_eq!(host, "media.example.com");
                assert_eq!(name, "Input");
            }
            other => panic!("unexpected input {:?}", other),
        }

        let output = config.output.unwrap();
        assert_eq!(output.base_path("ignored"), "output/dv/");
        match output.destination {
            OutputDestination::GenericS3 {
                port,
                ssl,
                access_style,
                signature_version,
                ..
            } => {
                assert_eq!(port, 443);
                assert!(ssl);
                assert_eq!(access_style, S3AccessStyle::VirtualHosted);
                assert_eq!(signature_version, S3SignatureVersion::V4);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_default_base_path_uses_title() {
        let output = OutputConfig {
            base_path: None,
            destination: OutputDestination::S3 {
                access_key: "a".into(),
                secret_key: "s".into(),
                bucket_name: "b".into(),
                name: "Output".into(),
            },
        };
        assert_eq!(output.base_path("movie"), "output/movie/");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_credentials() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "from-env");
        std::env::set_var(TENANT_ORG_ENV, "org-env");

        let file = write_config("[api]\napi_key = \"from-file\"\n");
        let config = load_config(file.path()).unwrap();
        clear_env();

        assert_eq!(config.api.api_key, "from-env");
        assert_eq!(config.api.tenant_org_id.as_deref(), Some("org-env"));
    }

    #[test]
    #[serial]
    fn test_empty_api_key_is_rejected() {
        clear_env();
        let file = write_config("[polling]\ninterval_secs = 1\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("API key is empty"));
    }

    #[test]
    #[serial]
    fn test_zero_poll_interval_is_rejected() {
        clear_env();
        let file = write_config("[api]\napi_key = \"k\"\n[polling]\ninterval_secs = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn test_base_path_needs_trailing_slash() {
        let mut config = Config::default();
        config.api.api_key = "k".into();
        config.output = Some(OutputConfig {
            base_path: Some("output/movie".into()),
            destination: OutputDestination::S3 {
                access_key: "a".into(),
                secret_key: "s".into(),
                bucket_name: "b".into(),
                name: "Output".into(),
            },
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must end with '/'"));
    }

    #[test]
    fn test_ladder_validation() {
        let mut config = Config::default();
        config.api.api_key = "k".into();
        config.h264_cenc.video.clear();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.api.api_key = "k".into();
        config.dolby_vision_atmos.video[0].bitrate = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.api.api_key = "k".into();
        config.h264_cenc.audio[0].bitrate = 0;
        assert!(validate_config(&config).is_err());
    }

    fn drm(key: &str) -> CencConfig {
        CencConfig {
            key: key.into(),
            kid: "43214321432143214321432143214321".into(),
            encryption_mode: vodforge_api::models::EncryptionMode::Cbc,
            widevine_pssh: None,
            playready_la_url: None,
            fairplay_iv: Some("00000000000000000000000000000000".into()),
            fairplay_uri: Some("skd://key".into()),
        }
    }

    #[test]
    fn test_cenc_key_material() {
        assert!(validate_cenc(&drm("12341234123412341234123412341234")).is_ok());

        let err = validate_cenc(&drm("1234")).unwrap_err();
        assert!(err.to_string().contains("16 bytes"));

        let err = validate_cenc(&drm("zz341234123412341234123412341234")).unwrap_err();
        assert!(err.to_string().contains("not valid hex"));

        let mut half_fairplay = drm("12341234123412341234123412341234");
        half_fairplay.fairplay_uri = None;
        assert!(validate_cenc(&half_fairplay).is_err());
    }

    #[test]
    fn test_recipe_requirements() {
        let mut config = Config::default();
        config.api.api_key = "k".into();
        let err = require_h264_cenc(&config).unwrap_err();
        assert!(err.to_string().contains("[input]"));

        config.input = Some(InputConfig::Https {
            host: "h".into(),
            name: "Input".into(),
        });
        config.output = Some(OutputConfig {
            base_path: None,
            destination: OutputDestination::S3 {
                access_key: "a".into(),
                secret_key: "s".into(),
                bucket_name: "b".into(),
                name: "Output".into(),
            },
        });
        config.dolby_vision_atmos.video_input_path = Some("in/dv.mp4".into());
        config.dolby_vision_atmos.metadata_input_path = Some("in/dv.xml".into());
        let err = require_dolby_vision_atmos(&config).unwrap_err();
        assert!(err.to_string().contains("atmos_input_path"));

        config.dolby_vision_atmos.atmos_input_path = Some("in/atmos.wav".into());
        let (_, _, sources) = require_dolby_vision_atmos(&config).unwrap();
        assert_eq!(sources.metadata, "in/dv.xml");
    }
}
