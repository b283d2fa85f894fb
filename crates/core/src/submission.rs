//! Inbound payloads for the two write endpoints and their validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{Error, Result};
use crate::limits::{LEAD_REQUIRED_MESSAGE, MAX_FIELD_BYTES, MAX_IP_LEN, MAX_USER_AGENT_LEN};
use crate::records::{NewLead, NewPageView};

/// Waitlist form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LeadSubmission {
    #[validate(custom(function = "validate_field_bytes"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_field_bytes"))]
    pub email: Option<String>,
    /// Headline the client was bucketed into, stored as `ab_variant`
    #[validate(custom(function = "validate_field_bytes"))]
    pub ab_headline_variant: Option<String>,
}

impl LeadSubmission {
    /// Validates the submission and converts it into an insert payload.
    ///
    /// Name and email must be present and contain something other than
    /// whitespace. Values are kept exactly as received.
    pub fn into_new_lead(self) -> Result<NewLead> {
        let (Some(name), Some(email)) = (
            self.name.as_deref().filter(|s| !s.trim().is_empty()),
            self.email.as_deref().filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(Error::validation(LEAD_REQUIRED_MESSAGE));
        };

        self.validate().map_err(too_long)?;

        Ok(NewLead {
            name: name.to_string(),
            email: email.to_string(),
            ab_variant: self.ab_headline_variant,
        })
    }
}

/// Tracking beacon body. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PageViewSubmission {
    #[validate(custom(function = "validate_field_bytes"))]
    pub referrer: Option<String>,
    #[validate(custom(function = "validate_field_bytes"))]
    pub utm_source: Option<String>,
    #[validate(custom(function = "validate_field_bytes"))]
    pub utm_medium: Option<String>,
    #[validate(custom(function = "validate_field_bytes"))]
    pub utm_campaign: Option<String>,
    #[validate(custom(function = "validate_field_bytes"))]
    pub page_url: Option<String>,
}

impl PageViewSubmission {
    /// Combines the body with the request-derived client context.
    pub fn into_new_page_view(self, client: ClientContext) -> Result<NewPageView> {
        self.validate().map_err(too_long)?;

        Ok(NewPageView {
            ip_address: client.ip,
            user_agent: client.user_agent,
            referrer: self.referrer,
            utm_source: self.utm_source,
            utm_medium: self.utm_medium,
            utm_campaign: self.utm_campaign,
            page_url: self.page_url,
        })
    }
}

/// Request metadata resolved at the HTTP boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientContext {
    /// Header values are not client-validated, so oversized ones are cut
    /// rather than failing the beacon.
    pub fn new(ip: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip: ip.map(|v| truncate_chars(v, MAX_IP_LEN)),
            user_agent: user_agent.map(|v| truncate_chars(v, MAX_USER_AGENT_LEN)),
        }
    }
}

/// Caps a client text field at [`MAX_FIELD_BYTES`] of UTF-8.
fn validate_field_bytes(value: &str) -> std::result::Result<(), ValidationError> {
    if value.len() > MAX_FIELD_BYTES {
        let mut err = ValidationError::new("field_too_long");
        err.message = Some(
            format!(
                "{} bytes exceeds {} byte limit",
                value.len(),
                MAX_FIELD_BYTES
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

fn truncate_chars(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value,
    }
}

fn too_long(errors: ValidationErrors) -> Error {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    Error::validation(format!("Field too long: {}", fields.join(", ")))
}
