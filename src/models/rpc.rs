//! JSON-RPC 2.0 envelope types and request validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only protocol version the proxy accepts.
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    /// Invalid JSON was received by the server
    ParseError = -32700,
    /// The JSON sent is not a valid Request object
    InvalidRequest = -32600,
    /// The method does not exist / is not available
    MethodNotFound = -32601,
    /// Invalid method parameter(s)
    InvalidParams = -32602,
    /// Internal JSON-RPC error
    InternalError = -32603,
}

impl JsonRpcErrorCode {
    pub const fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Builds a request with a millisecond-timestamp id, mirroring what the
    /// browser SDK sends.
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(Value::from(chrono::Utc::now().timestamp_millis())),
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Error envelope with the given code and message. Exactly one of
    /// `result`/`error` is ever set on a fabricated response.
    pub fn error(code: JsonRpcErrorCode, message: impl Into<String>, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code.code(),
                message: message.into(),
            }),
        }
    }
}

/// Shape check for an inbound JSON-RPC request.
///
/// Passes only when the body is a non-null object, `jsonrpc` equals the
/// literal `"2.0"` and `method` is a non-empty string. `params` contents and
/// method legality are the backend's responsibility.
pub fn is_valid_request(body: &Value) -> bool {
    let Some(obj) = body.as_object() else {
        return false;
    };
    if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return false;
    }
    matches!(obj.get("method").and_then(Value::as_str), Some(method) if !method.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_values() {
        assert_eq!(JsonRpcErrorCode::ParseError.code(), -32700);
        assert_eq!(JsonRpcErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(JsonRpcErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(JsonRpcErrorCode::InvalidParams.code(), -32602);
        assert_eq!(JsonRpcErrorCode::InternalError.code(), -32603);
    }

    #[test]
    fn test_valid_request() {
        assert!(is_valid_request(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getHealth",
            "params": []
        })));
    }

    #[test]
    fn test_valid_request_without_id_or_params() {
        // id and params are not part of the shape check
        assert!(is_valid_request(&json!({"jsonrpc": "2.0", "method": "getSlot"})));
    }

    #[test]
    fn test_rejects_non_object_bodies() {
        assert!(!is_valid_request(&json!(null)));
        assert!(!is_valid_request(&json!("getHealth")));
        assert!(!is_valid_request(&json!([1, 2, 3])));
        assert!(!is_valid_request(&json!(42)));
    }

    #[test]
    fn test_rejects_wrong_version() {
        assert!(!is_valid_request(&json!({"jsonrpc": "1.0", "method": "getHealth"})));
        assert!(!is_valid_request(&json!({"jsonrpc": 2.0, "method": "getHealth"})));
        assert!(!is_valid_request(&json!({"method": "getHealth"})));
    }

    #[test]
    fn test_rejects_missing_or_empty_method() {
        assert!(!is_valid_request(&json!({"jsonrpc": "2.0"})));
        assert!(!is_valid_request(&json!({"jsonrpc": "2.0", "method": ""})));
        assert!(!is_valid_request(&json!({"jsonrpc": "2.0", "method": 7})));
    }

    #[test]
    fn test_error_response_shape() {
        let response =
            JsonRpcResponse::error(JsonRpcErrorCode::InvalidRequest, "Invalid Request", json!(5));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "error": {"code": -32600, "message": "Invalid Request"}
            })
        );
    }

    #[test]
    fn test_request_serializes_params() {
        let request = JsonRpcRequest::new("sendTransaction", json!(["deadbeef"]));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "sendTransaction");
        assert_eq!(value["params"], json!(["deadbeef"]));
        assert!(value["id"].is_i64());
    }
}
