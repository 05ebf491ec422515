use serde_json::{Value, json};

/// Cross-origin headers attached to every response, the pre-flight case
/// and errors included.
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Credentials", "true"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Methods",
        "GET,OPTIONS,PATCH,DELETE,POST,PUT",
    ),
    (
        "Access-Control-Allow-Headers",
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub target: String,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn get(target: &str) -> Self {
        Self {
            method: "GET".to_string(),
            target: target.to_string(),
            body: Vec::new(),
        }
    }

    pub fn post(target: &str, body: &str) -> Self {
        Self {
            method: "POST".to_string(),
            target: target.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn options(target: &str) -> Self {
        Self {
            method: "OPTIONS".to_string(),
            target: target.to_string(),
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: &Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn created(body: &Value) -> Self {
        Self {
            status: 201,
            body: body.to_string(),
        }
    }

    /// Pre-flight success: empty body, status only.
    pub fn preflight_ok() -> Self {
        Self {
            status: 200,
            body: String::new(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: 404,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self {
            status: 500,
            body: json!({ "error": "Internal server error", "message": message }).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies_are_well_formed_json() {
        let response = HttpResponse::bad_request("crop and price are required");
        assert_eq!(response.status, 400);
        let parsed: Value = serde_json::from_str(&response.body).expect("valid json");
        assert_eq!(parsed["error"], "crop and price are required");
    }

    #[test]
    fn internal_error_carries_generic_error_and_message() {
        let response = HttpResponse::internal_server_error("store connection failed: boom");
        let parsed: Value = serde_json::from_str(&response.body).expect("valid json");
        assert_eq!(parsed["error"], "Internal server error");
        assert_eq!(parsed["message"], "store connection failed: boom");
    }

    #[test]
    fn cors_header_set_is_fixed() {
        assert_eq!(CORS_HEADERS.len(), 4);
        assert!(
            CORS_HEADERS
                .iter()
                .any(|(name, value)| *name == "Access-Control-Allow-Origin" && *value == "*")
        );
    }
}
