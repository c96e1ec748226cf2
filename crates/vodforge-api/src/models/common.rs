//! Types shared by several resource kinds.

use crate::ids::OutputId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPermission {
    PublicRead,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub permission: AclPermission,
}

impl AclEntry {
    pub fn public_read() -> Self {
        Self {
            permission: AclPermission::PublicRead,
        }
    }
}

/// Reference from a muxing, DRM configuration or manifest to an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOutput {
    pub output_id: OutputId,
    pub output_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<AclEntry>,
}

impl EncodingOutput {
    /// Output reference readable by anyone, which is what players need.
    pub fn public(output_id: OutputId, output_path: impl Into<String>) -> Self {
        Self {
            output_id,
            output_path: output_path.into(),
            acl: vec![AclEntry::public_read()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_output_serialization() {
        let output = EncodingOutput::public(OutputId::from("out-1"), "output/video/240p");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outputId": "out-1",
                "outputPath": "output/video/240p",
                "acl": [{"permission": "PUBLIC_READ"}]
            })
        );
    }

    #[test]
    fn test_output_without_acl_decodes() {
        let output: EncodingOutput =
            serde_json::from_str(r#"{"outputId": "o", "outputPath": "p"}"#).unwrap();
        assert!(output.acl.is_empty());
    }
}
