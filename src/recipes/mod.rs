//! End-to-end encoding workflows.
//!
//! A recipe declares every remote resource in dependency order (storage,
//! encoding, input streams, codec configurations, streams, muxings, DRM,
//! manifests), starts the encoding and waits for it. Each step is a single
//! awaited call; the first failure aborts the run and nothing is rolled back.

pub mod dolby_vision_atmos;
pub mod h264_cenc;
pub mod presets;

use crate::config::{Config, InputConfig, OutputDestination};
use crate::poller::{Poller, RemoteTask, TaskTarget};
use anyhow::{Context, Result};
use std::fmt;
use vodforge_api::models::{
    AkamaiNetStorageOutput, GenericS3Output, HttpsInput, S3Input, S3Output, StartEncodingRequest,
    Task,
};
use vodforge_api::{BitmovinClient, EncodingId, InputId, ManifestId, OutputId};

/// Segment duration of every fMP4 muxing, in seconds.
pub const SEGMENT_LENGTH: f64 = 6.0;

pub const INIT_SEGMENT_NAME: &str = "init.mp4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Recipe {
    /// H.264/AAC ladder, fMP4 with CENC (CBC) DRM, HLS v6 and DASH
    H264Cenc,
    /// Dolby Vision H.265 with Dolby Atmos (ADM), HLS v8 and DASH
    DolbyVisionAtmos,
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H264Cenc => f.write_str("h264-cenc"),
            Self::DolbyVisionAtmos => f.write_str("dolby-vision-atmos"),
        }
    }
}

/// Identifiers produced by a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub encoding_id: EncodingId,
    pub dash_manifest_id: ManifestId,
    pub hls_manifest_id: ManifestId,
}

/// Client plus poller shared by every step of a run.
pub struct Session {
    pub client: BitmovinClient,
    pub poller: Poller,
}

impl Session {
    pub fn new(client: BitmovinClient, poller: Poller) -> Self {
        Self { client, poller }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = BitmovinClient::new(&config.api.client_config())
            .context("Failed to create API client")?;
        Ok(Self::new(client, Poller::new(config.polling.interval())))
    }

    pub async fn wait_for(&self, target: TaskTarget) -> Result<Task> {
        self.poller
            .wait_for(&RemoteTask::new(&self.client, target))
            .await
    }

    /// Start an encoding and block until it is terminal.
    pub async fn execute_encoding(
        &self,
        encoding_id: &EncodingId,
        request: &StartEncodingRequest,
    ) -> Result<Task> {
        self.client
            .start_encoding(encoding_id, request)
            .await
            .with_context(|| format!("Failed to start encoding {}", encoding_id))?;
        tracing::info!("Started encoding {}", encoding_id);

        self.wait_for(TaskTarget::Encoding(encoding_id.clone())).await
    }

    pub async fn execute_dash_manifest(&self, manifest_id: &ManifestId) -> Result<Task> {
        self.client
            .start_dash_manifest(manifest_id)
            .await
            .with_context(|| format!("Failed to start DASH manifest {}", manifest_id))?;
        tracing::info!("Started DASH manifest generation {}", manifest_id);

        self.wait_for(TaskTarget::DashManifest(manifest_id.clone()))
            .await
    }

    pub async fn execute_hls_manifest(&self, manifest_id: &ManifestId) -> Result<Task> {
        self.client
            .start_hls_manifest(manifest_id)
            .await
            .with_context(|| format!("Failed to start HLS manifest {}", manifest_id))?;
        tracing::info!("Started HLS manifest generation {}", manifest_id);

        self.wait_for(TaskTarget::HlsManifest(manifest_id.clone()))
            .await
    }
}

/// Run `recipe` to completion.
pub async fn run(session: &Session, recipe: Recipe, config: &Config) -> Result<RunSummary> {
    tracing::info!("Running recipe {}", recipe);

    let summary = match recipe {
        Recipe::H264Cenc => h264_cenc::run(session, config).await?,
        Recipe::DolbyVisionAtmos => dolby_vision_atmos::run(session, config).await?,
    };

    tracing::info!("Recipe {} finished, encoding {}", recipe, summary.encoding_id);
    Ok(summary)
}

pub(crate) async fn create_input(client: &BitmovinClient, input: &InputConfig) -> Result<InputId> {
    let id = match input {
        InputConfig::S3 {
            access_key,
            secret_key,
            bucket_name,
            name,
        } => client
            .create_s3_input(&S3Input {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
                bucket_name: bucket_name.clone(),
                name: name.clone(),
            })
            .await
            .context("Failed to create S3 input")?,
        InputConfig::Https { host, name } => client
            .create_https_input(&HttpsInput {
                host: host.clone(),
                name: name.clone(),
            })
            .await
            .context("Failed to create HTTPS input")?,
    };

    tracing::info!("Created input {}", id);
    Ok(id)
}

pub(crate) async fn create_output(
    client: &BitmovinClient,
    destination: &OutputDestination,
) -> Result<OutputId> {
    let id = match destination {
        OutputDestination::AkamaiNetstorage {
            host,
            username,
            password,
            name,
        } => client
            .create_akamai_netstorage_output(&AkamaiNetStorageOutput {
                host: host.clone(),
                username: username.clone(),
                password: password.clone(),
                name: name.clone(),
            })
            .await
            .context("Failed to create Akamai NetStorage output")?,
        OutputDestination::GenericS3 {
            access_key,
            secret_key,
            bucket_name,
            host,
            port,
            ssl,
            access_style,
            signature_version,
            name,
        } => client
            .create_generic_s3_output(&GenericS3Output {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
                bucket_name: bucket_name.clone(),
                host: host.clone(),
                port: *port,
                ssl: *ssl,
                access_style: *access_style,
                signature_version: *signature_version,
                name: name.clone(),
            })
            .await
            .context("Failed to create generic S3 output")?,
        OutputDestination::S3 {
            access_key,
            secret_key,
            bucket_name,
            name,
        } => client
            .create_s3_output(&S3Output {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
                bucket_name: bucket_name.clone(),
                name: name.clone(),
            })
            .await
            .context("Failed to create S3 output")?,
    };

    tracing::info!("Created output {}", id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_recipe_names_match_cli_values() {
        for recipe in Recipe::value_variants() {
            let value = recipe.to_possible_value().unwrap();
            assert_eq!(value.get_name(), recipe.to_string());
        }
    }

    #[test]
    fn test_session_requires_api_key() {
        let config = Config::default();
        assert!(Session::from_config(&config).is_err());
    }
}
