//! Application handlers.
//!
//! Command handlers that orchestrate ports to produce a Term of Reference.

pub mod draft_justification;
pub mod generate_terms;
pub mod request_budget;

pub use draft_justification::{
    justification_prompt, DraftFailure, DraftJustificationCommand, DraftJustificationHandler,
    DraftSettings, JustificationDraft, SYSTEM_PROMPT,
};
pub use generate_terms::{
    GenerateTermsCommand, GenerateTermsError, GenerateTermsHandler, GenerateTermsResult,
    JustificationStatus,
};
pub use request_budget::{BudgetDecision, RequestBudget};
