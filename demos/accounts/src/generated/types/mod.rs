//! `crate::generated::types`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
mod new_user;
pub use new_user::NewUser;
mod role;
pub use role::Role;
mod user;
pub use user::User;
