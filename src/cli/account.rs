use std::io::Write;

use color_print::cformat;
use eyre::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::{LOGIN_ENDPOINT, LoginRequest, REGISTER_ENDPOINT, RegisterRequest};
use crate::forms::{FormErrors, LoginForm, RegistrationForm};

/// Validate a registration and print either the field errors or the request
/// that would be submitted. Returns whether the form was accepted.
pub fn register(output: &mut dyn Write, form: &RegistrationForm, json: bool) -> Result<bool> {
    if let Err(errors) = form.validate() {
        print_errors(output, &errors)?;
        return Ok(false);
    }

    info!("Registration for {} passed validation", form.email);
    let request = RegisterRequest::from(form);
    print_request(output, REGISTER_ENDPOINT, &request, json)?;
    if !json {
        writeln!(output, "Registration successful! Redirecting to dashboard...")?;
    }
    Ok(true)
}

pub fn login(output: &mut dyn Write, form: &LoginForm, json: bool) -> Result<bool> {
    if let Err(errors) = form.validate() {
        print_errors(output, &errors)?;
        return Ok(false);
    }

    info!("Login for {} passed validation", form.email);
    print_request(output, LOGIN_ENDPOINT, &LoginRequest::from(form), json)?;
    Ok(true)
}

fn print_errors(output: &mut dyn Write, errors: &FormErrors) -> Result<()> {
    debug!("Form rejected with {} errors", errors.len());
    for (field, error) in errors.iter() {
        writeln!(output, "{}", cformat!("<red>{}:</> {}", field, error))?;
    }
    Ok(())
}

fn print_request<T: Serialize>(
    output: &mut dyn Write,
    endpoint: &str,
    request: &T,
    json: bool,
) -> Result<()> {
    let body = serde_json::to_string_pretty(request)?;
    if json {
        writeln!(output, "{}", body)?;
    } else {
        writeln!(output, "POST {}", endpoint)?;
        writeln!(output, "{}", body)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            business_name: "Doe Retail".into(),
            location: "Austin, TX".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn valid_registration_prints_request_body() {
        let mut out = Vec::new();
        assert!(register(&mut out, &form(), true).unwrap());

        let body: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(body["businessName"], "Doe Retail");
        assert!(body.get("confirmPassword").is_none());
    }

    #[test]
    fn invalid_registration_lists_field_errors() {
        let bad = RegistrationForm {
            password: "password1".into(),
            confirm_password: "password2".into(),
            ..form()
        };
        let mut out = Vec::new();
        assert!(!register(&mut out, &bad, false).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Passwords do not match"));
        assert!(!text.contains("POST"));
    }

    #[test]
    fn login_prints_endpoint() {
        let form = LoginForm {
            email: "owner@shop.com".into(),
            password: "secret".into(),
        };
        let mut out = Vec::new();
        assert!(login(&mut out, &form, false).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("POST /api/auth/login"));
    }
}
