//! Request module - what the user asks the generator for.
//!
//! - `ContractRequest` - the typed form record
//! - `RequestingUnit` - fixed catalog of municipal units
//! - `TermMonths` - bounded contract term

mod contract_request;
mod requesting_unit;
mod term_months;

pub use contract_request::ContractRequest;
pub use requesting_unit::{join_labels, RequestingUnit};
pub use term_months::TermMonths;
