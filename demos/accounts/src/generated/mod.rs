//! GraphQL client for `crate::generated`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
pub mod types;
mod generated_service;
pub use generated_service::GeneratedService;
mod user_field_selection;
pub use user_field_selection::UserFieldSelection;
