//! Lead forms and the payloads forwarded to the lead API

use crate::{
    config::LeadConfig,
    error::AppError,
    validation::{ValidatedData, ValidationSchema, CONTACT_SCHEMA, ESTIMATE_SCHEMA, MORTGAGE_SCHEMA},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Contact,
    Estimate,
    Mortgage,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Estimate, FormKind::Mortgage];

    pub fn schema(self) -> &'static ValidationSchema {
        match self {
            FormKind::Contact => &CONTACT_SCHEMA,
            FormKind::Estimate => &ESTIMATE_SCHEMA,
            FormKind::Mortgage => &MORTGAGE_SCHEMA,
        }
    }

    pub fn endpoint(self, config: &LeadConfig) -> String {
        let path = match self {
            FormKind::Contact => &config.contact_path,
            FormKind::Estimate => &config.estimate_path,
            FormKind::Mortgage => &config.mortgage_path,
        };
        format!("{}{}", config.base_url.trim_end_matches('/'), path)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Estimate => "estimate",
            FormKind::Mortgage => "mortgage",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contact" => Ok(FormKind::Contact),
            "estimate" => Ok(FormKind::Estimate),
            "mortgage" | "calculator" => Ok(FormKind::Mortgage),
            other => Err(AppError::NotFound(format!("Unknown form '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub message: String,
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: String,
    pub number: String,
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgagePayload {
    pub price: String,
    pub interest: String,
    pub years: String,
    pub down_payment: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub subscribed: bool,
}

/// JSON body of one lead submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Contact(ContactPayload),
    Estimate(EstimatePayload),
    Mortgage(MortgagePayload),
}

impl SubmissionPayload {
    pub fn build(kind: FormKind, data: &ValidatedData) -> Self {
        let field = |name: &str| data.get(name).to_string();
        match kind {
            FormKind::Contact => SubmissionPayload::Contact(ContactPayload {
                first_name: field("firstName"),
                last_name: field("lastName"),
                email: field("email"),
                number: field("phoneNumber"),
                message: field("message"),
                subscribed: true,
            }),
            FormKind::Estimate => SubmissionPayload::Estimate(EstimatePayload {
                name: field("name"),
                address: field("address"),
                city: field("city"),
                state: field("state"),
                email: field("email"),
                number: field("number"),
                subscribed: true,
            }),
            FormKind::Mortgage => SubmissionPayload::Mortgage(MortgagePayload {
                price: field("price"),
                interest: field("interest"),
                years: field("term"),
                down_payment: field("downPayment"),
                first_name: field("firstName"),
                last_name: field("lastName"),
                email: field("email"),
                number: field("phoneNumber"),
                subscribed: true,
            }),
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            SubmissionPayload::Contact(_) => FormKind::Contact,
            SubmissionPayload::Estimate(_) => FormKind::Estimate,
            SubmissionPayload::Mortgage(_) => FormKind::Mortgage,
        }
    }
}

/// Body returned by the lead API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate, FormInput};
    use serde_json::json;

    #[test]
    fn test_contact_payload_renames_phone() {
        let input = FormInput::new()
            .with("firstName", "Jane")
            .with("lastName", "Doe")
            .with("email", "jane@example.com")
            .with("phoneNumber", "224-497-2554")
            .with("message", "Looking in Naperville");
        let data = validate(&input, FormKind::Contact.schema()).unwrap();

        let body = serde_json::to_value(SubmissionPayload::build(FormKind::Contact, &data)).unwrap();
        assert_eq!(
            body,
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "number": "224-497-2554",
                "message": "Looking in Naperville",
                "subscribed": true,
            })
        );
    }

    #[test]
    fn test_contact_payload_sends_blank_message_as_empty_string() {
        let input = FormInput::new()
            .with("firstName", "Jane")
            .with("lastName", "Doe")
            .with("email", "jane@example.com")
            .with("phoneNumber", "224-497-2554");
        let data = validate(&input, FormKind::Contact.schema()).unwrap();

        let body = serde_json::to_value(SubmissionPayload::build(FormKind::Contact, &data)).unwrap();
        assert_eq!(body["message"], "");
    }

    #[test]
    fn test_mortgage_payload_renames_term() {
        let input = FormInput::new()
            .with("firstName", "Jane")
            .with("lastName", "Doe")
            .with("price", "450,000")
            .with("downPayment", "90,000")
            .with("interest", "6.5")
            .with("term", "30")
            .with("email", "jane@example.com")
            .with("phoneNumber", "+1 2244972554");
        let data = validate(&input, FormKind::Mortgage.schema()).unwrap();

        let body = serde_json::to_value(SubmissionPayload::build(FormKind::Mortgage, &data)).unwrap();
        assert_eq!(body["years"], "30");
        assert_eq!(body["downPayment"], "90,000");
        assert_eq!(body["number"], "+1 2244972554");
        assert_eq!(body["subscribed"], true);
        assert!(body.get("term").is_none());
        assert!(body.get("phoneNumber").is_none());
    }

    #[test]
    fn test_form_kind_parsing_and_endpoints() {
        assert_eq!("Contact".parse::<FormKind>().unwrap(), FormKind::Contact);
        assert_eq!("calculator".parse::<FormKind>().unwrap(), FormKind::Mortgage);
        assert!("newsletter".parse::<FormKind>().is_err());

        let config = LeadConfig::default();
        assert_eq!(
            FormKind::Estimate.endpoint(&config),
            "https://api.soldbyghost.com/api/submit/estimate"
        );
        assert_eq!(
            FormKind::Mortgage.endpoint(&config),
            "https://api.soldbyghost.com/api/calculator"
        );
    }

    #[test]
    fn test_lead_response_defaults() {
        let response: LeadResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);
    }
}
