use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload: the caller's identity plus issuance and expiry times.
/// Tokens are self-contained; nothing here is looked up server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String, // user email, echoed into task handlers
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
}
