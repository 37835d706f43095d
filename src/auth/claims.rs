use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names the server always computes itself.
pub const RESERVED_CLAIMS: [&str; 4] = ["exp", "iat", "iss", "aud"];

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // user email
    pub exp: i64,            // expires at (unix timestamp)
    pub iat: i64,            // issued at (unix timestamp)
    pub iss: String,
    pub aud: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
