//! Request and response bodies for the `/auth` routes
//!
//! Request fields default to empty so that a missing field reaches the
//! handler and is reported with the route's own "required" message.

use serde::{Deserialize, Serialize};

use sp_core::domain::entities::user::User;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendOtpRequest {
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub phone: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Account fields returned after registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Account fields returned after login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub salary: Option<f64>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            salary: user.salary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    /// `sms` for gateway delivery, `console` when the code was only logged
    pub provider: String,
}

/// Plain acknowledgement used by verify-otp and reset-password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_reset_request_reads_camel_case_password() {
        let request: ResetPasswordRequest =
            serde_json::from_str(r#"{"phone":"9876543210","newPassword":"hunter22"}"#).unwrap();
        assert_eq!(request.phone, "9876543210");
        assert_eq!(request.new_password, "hunter22");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: VerifyOtpRequest = serde_json::from_str(r#"{"phone":"9876543210"}"#).unwrap();
        assert!(request.otp.is_empty());

        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_empty());
        assert!(request.name.is_none());
    }

    #[test]
    fn test_profile_carries_salary() {
        let user = User {
            id: 7,
            email: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            password_hash: "$2b$04$digest".to_string(),
            salary: Some(52000.0),
            created_at: Utc::now(),
        };

        let profile = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(profile["salary"], 52000.0);
        assert!(profile.get("password_hash").is_none());

        let summary = serde_json::to_value(UserSummary::from(&user)).unwrap();
        assert!(summary.get("salary").is_none());
    }
}
