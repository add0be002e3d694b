use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JWT payload carried by bearer tokens.
///
/// `user_id` and `exp` are loosely typed so that a signed token with a
/// missing or mistyped claim is reported as malformed, not as a bad signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>, // user UUID, hyphenated string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,       // expires at (unix timestamp)
    #[serde(default)]
    pub iat: Option<u64>,       // issued at (unix timestamp)
    #[serde(default)]
    pub jti: Option<String>,    // random token id
}
