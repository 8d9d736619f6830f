//! Application Configuration
//!
//! Configuration for the Auth application layer. Fixed at process start;
//! changing the signing secret invalidates all outstanding tokens, which is
//! acceptable (there is no rotation mechanism).

use std::time::Duration;

pub use jsonwebtoken::Algorithm;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret
    pub token_secret: String,
    /// Token signing algorithm
    pub token_algorithm: Algorithm,
    /// Token lifetime
    pub token_expiry: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_algorithm: Algorithm::HS256,
            token_expiry: Duration::from_secs(60 * 60), // 60 minutes
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let secret = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get token lifetime in whole seconds
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
