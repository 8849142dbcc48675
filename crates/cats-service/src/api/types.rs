//! API request and response types.

use crate::error::ServiceError;
use crate::registration::AccountRegistrationRequest;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Signup request body.
///
/// Fields are optional so that a missing field is reported through the
/// regular error envelope instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,

    /// Display name
    pub name: Option<String>,

    pub password: Option<SecretString>,
}

impl SignUpRequest {
    /// Convert into a registration request, naming every missing field.
    pub fn into_registration(self) -> Result<AccountRegistrationRequest, ServiceError> {
        let mut missing = Vec::new();
        if self.email.is_none() {
            missing.push("email");
        }
        if self.name.is_none() {
            missing.push("name");
        }
        if self.password.is_none() {
            missing.push("password");
        }

        match (self.email, self.name, self.password) {
            (Some(email), Some(name), Some(password)) => Ok(AccountRegistrationRequest {
                email,
                display_name: name,
                raw_password: password,
            }),
            _ => Err(ServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub accounts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_into_registration() {
        let body: SignUpRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "name": "A", "password": "pw1"}"#)
                .unwrap();

        let request = body.into_registration().unwrap();
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.display_name, "A");
        assert_eq!(request.raw_password.expose_secret(), "pw1");
    }

    #[test]
    fn test_missing_fields_are_named() {
        let body: SignUpRequest = serde_json::from_str(r#"{"name": "A"}"#).unwrap();

        match body.into_registration() {
            Err(ServiceError::Validation(msg)) => {
                assert_eq!(msg, "missing required fields: email, password");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
