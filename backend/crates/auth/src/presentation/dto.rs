//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub email: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying the issued bearer token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{"email":"a@test.com","password":"secret1"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "a@test.com");
        assert_eq!(request.password, "secret1");
    }

    #[test]
    fn test_register_response_serialization() {
        let response = RegisterResponse {
            user_id: 7,
            email: "a@test.com".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""userId":7"#));
        assert!(json.contains(r#""email":"a@test.com""#));
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse::bearer("abc.def.ghi".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""accessToken":"abc.def.ghi""#));
        assert!(json.contains(r#""tokenType":"bearer""#));
    }
}
