//! GraphQL enum for `Role`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
use gqlforge_client::{GraphQLEnum, InputValue, ToInputValue};
/// Access level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Can manage other accounts
    Admin,
    Member,
}
impl Role {
    pub const ADMIN: &'static str = "ADMIN";
    pub const MEMBER: &'static str = "MEMBER";
    pub fn admin() -> Self {
        Self::Admin
    }
    pub fn member() -> Self {
        Self::Member
    }
    /// Every value, in declaration order.
    pub fn options() -> &'static [Self] {
        &[Self::Admin, Self::Member]
    }
}
impl GraphQLEnum for Role {
    const TYPE_NAME: &'static str = "Role";
    fn as_str(&self) -> &'static str {
        match *self {
            Self::Admin => Self::ADMIN,
            Self::Member => Self::MEMBER,
        }
    }
    fn from_wire(value: &str) -> Option<Self> {
        match value {
            Self::ADMIN => Some(Self::Admin),
            Self::MEMBER => Some(Self::Member),
            _ => None,
        }
    }
    fn options() -> &'static [Self] {
        Self::options()
    }
}
impl ToInputValue for Role {
    fn to_input_value(&self) -> InputValue {
        InputValue::Enum(GraphQLEnum::as_str(self).to_string())
    }
}
