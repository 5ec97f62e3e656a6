//! Lead-capture pipeline: validate, build the payload, submit once, report.

pub mod client;
pub mod registry;
pub mod session;

pub use client::{HttpLeadClient, LeadSubmitter};
pub use registry::FormRegistry;
pub use session::{
    FormSession, FormState, SessionView, SubmissionResult, REJECTED_MESSAGE, SUCCESS_MESSAGE,
    TRANSPORT_MESSAGE,
};

use crate::{
    models::{FormKind, SubmissionPayload},
    validation::{validate, FormInput},
};

/// Validates and submits without a session; used by plain form posts.
pub async fn submit_once(
    kind: FormKind,
    input: &FormInput,
    submitter: &dyn LeadSubmitter,
) -> SubmissionResult {
    match validate(input, kind.schema()) {
        Ok(data) => {
            let payload = SubmissionPayload::build(kind, &data);
            SubmissionResult::from_response(kind, submitter.submit(&payload).await)
        }
        Err(errors) => SubmissionResult::FieldErrors { errors },
    }
}
