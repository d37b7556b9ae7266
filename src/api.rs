//! Request and response bodies for the SalesForecast HTTP API.
//!
//! Nothing in this crate talks to the network. These types fix the JSON shape
//! a backend is expected to accept, and the CLI prints them so they can be
//! piped to one.

use serde::{Deserialize, Serialize};

use crate::forms::{LoginForm, RegistrationForm};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub const CHATBOT_ENDPOINT: &str = "/api/chatbot";
pub const DASHBOARD_ENDPOINT: &str = "/api/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<&LoginForm> for LoginRequest {
    fn from(form: &LoginForm) -> Self {
        Self {
            email: form.email.clone(),
            password: form.password.clone(),
        }
    }
}

/// Registration body. The confirmation field and terms checkbox stay client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub business_name: String,
    pub location: String,
}

impl From<&RegistrationForm> for RegisterRequest {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            business_name: form.business_name.clone(),
            location: form.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn register_request_uses_camel_case_and_drops_client_fields() {
        let form = RegistrationForm {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            business_name: "Doe Retail".into(),
            location: "Austin, TX".into(),
            agree_to_terms: true,
        };
        let body = serde_json::to_value(RegisterRequest::from(&form)).unwrap();
        assert_eq!(
            body,
            json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "password": "password1",
                "businessName": "Doe Retail",
                "location": "Austin, TX"
            })
        );
    }

    #[test]
    fn chat_request_parses_message_body() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "pricing?"}"#).unwrap();
        assert_eq!(request.message, "pricing?");
    }
}
