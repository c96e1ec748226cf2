//! Response envelopes wrapped around every platform result.

use serde::Deserialize;

/// `{"requestId": ..., "status": "SUCCESS", "data": {"result": ...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseEnvelope<T> {
    #[allow(dead_code)]
    pub request_id: Option<String>,
    pub data: ResponseData<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseData<T> {
    pub result: T,
}

/// One page of a list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total_count: Option<u64>,
}

/// Minimal view of a freshly created resource.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResource {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes_with_missing_items() {
        let page: Page<CreatedResource> =
            serde_json::from_str(r#"{"offset": 0, "limit": 25}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_envelope_extracts_result() {
        let json = r#"{
            "requestId": "abc",
            "status": "SUCCESS",
            "data": {"result": {"id": "in-1", "name": "ignored"}}
        }"#;
        let env: ResponseEnvelope<CreatedResource> = serde_json::from_str(json).unwrap();
        assert_eq!(env.data.result.id, "in-1");
        assert_eq!(env.request_id.as_deref(), Some("abc"));
    }
}
