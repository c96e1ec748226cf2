//! Inputs (where source media is read from) and outputs (where results go).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsInput {
    pub host: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Input {
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AkamaiNetStorageOutput {
    pub host: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum S3AccessStyle {
    VirtualHosted,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum S3SignatureVersion {
    #[serde(rename = "S3_V2", alias = "V2")]
    V2,
    #[serde(rename = "S3_V4", alias = "V4")]
    V4,
}

/// Any S3-compatible object storage (Linode, MinIO, Wasabi, ...).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericS3Output {
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub host: String,
    pub port: u16,
    pub ssl: bool,
    pub access_style: S3AccessStyle,
    pub signature_version: S3SignatureVersion,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Output {
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub name: String,
}
