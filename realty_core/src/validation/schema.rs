//! Per-form validation schemas

use super::rules::{FieldRule, Rule};
use lazy_static::lazy_static;

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field: &'static str,
    pub optional: bool,
    pub rules: Vec<FieldRule>,
}

impl FieldSchema {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// An optional field skips its rules when left empty.
    pub fn optional(field: &'static str) -> Self {
        Self {
            field,
            optional: true,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule, message: &'static str) -> Self {
        self.rules.push(FieldRule::new(rule, message));
        self
    }

    /// Every rule is checked; when several break, the last one's message is shown.
    pub fn failure(&self, value: &str) -> Option<&'static str> {
        if self.optional && value.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .rev()
            .find(|field_rule| field_rule.rule.check(value).is_err())
            .map(|field_rule| field_rule.message)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
}

impl ValidationSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.field == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }
}

fn first_name() -> FieldSchema {
    FieldSchema::required("firstName").rule(Rule::MinLength(2), "First name is required")
}

fn last_name() -> FieldSchema {
    FieldSchema::required("lastName").rule(Rule::MinLength(2), "Last name is required")
}

fn email() -> FieldSchema {
    FieldSchema::required("email").rule(Rule::Email, "Invalid email address")
}

fn phone(field: &'static str) -> FieldSchema {
    FieldSchema::required(field).rule(Rule::Phone, "Invalid phone number")
}

fn amount(field: &'static str, required: &'static str, invalid: &'static str) -> FieldSchema {
    FieldSchema::required(field)
        .rule(Rule::NonEmpty, required)
        .rule(Rule::Numeric, invalid)
}

lazy_static! {
    pub static ref CONTACT_SCHEMA: ValidationSchema = ValidationSchema {
        name: "contact",
        fields: vec![
            first_name(),
            last_name(),
            email(),
            phone("phoneNumber"),
            FieldSchema::optional("message"),
        ],
    };

    pub static ref ESTIMATE_SCHEMA: ValidationSchema = ValidationSchema {
        name: "estimate",
        fields: vec![
            FieldSchema::required("name").rule(Rule::MinLength(2), "Name is required"),
            FieldSchema::required("address").rule(Rule::MinLength(4), "Address is required"),
            FieldSchema::required("city").rule(Rule::MinLength(2), "City is required"),
            FieldSchema::required("state")
                .rule(Rule::MinLength(2), "State is required")
                .rule(Rule::MaxLength(2), "Invalid state"),
            phone("number"),
            email(),
        ],
    };

    pub static ref MORTGAGE_SCHEMA: ValidationSchema = ValidationSchema {
        name: "mortgage",
        fields: vec![
            first_name(),
            last_name(),
            FieldSchema::required("price")
                .rule(Rule::MinLength(5), "Price is required")
                .rule(Rule::Numeric, "Invalid price"),
            amount("downPayment", "Down payment is required", "Invalid down payment"),
            amount("interest", "Interest rate is required", "Invalid interest rate"),
            amount("term", "Loan term is required", "Invalid loan term"),
            email(),
            phone("phoneNumber"),
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_broken_rule_wins_within_field() {
        let price = MORTGAGE_SCHEMA.field("price").unwrap();
        assert_eq!(price.failure(""), Some("Invalid price"));
        assert_eq!(price.failure("1.00"), Some("Price is required"));
        assert_eq!(price.failure("12,5x0"), Some("Invalid price"));
        assert_eq!(price.failure("450,000"), None);

        let down_payment = MORTGAGE_SCHEMA.field("downPayment").unwrap();
        assert_eq!(down_payment.failure(""), Some("Invalid down payment"));

        let state = ESTIMATE_SCHEMA.field("state").unwrap();
        assert_eq!(state.failure("I"), Some("State is required"));
        assert_eq!(state.failure("Ill"), Some("Invalid state"));
        assert_eq!(state.failure("IL"), None);
    }

    #[test]
    fn test_optional_field_accepts_empty() {
        let message = CONTACT_SCHEMA.field("message").unwrap();
        assert!(message.optional);
        assert_eq!(message.failure(""), None);
    }

    #[test]
    fn test_schema_field_sets() {
        let contact: Vec<_> = CONTACT_SCHEMA.field_names().collect();
        assert_eq!(contact, vec!["firstName", "lastName", "email", "phoneNumber", "message"]);

        let estimate: Vec<_> = ESTIMATE_SCHEMA.field_names().collect();
        assert_eq!(estimate, vec!["name", "address", "city", "state", "number", "email"]);

        assert_eq!(MORTGAGE_SCHEMA.fields.len(), 8);
    }
}
