//! GraphQL input object for `NewUser`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
use gqlforge_client::{Arguments, InputValue, ToInputValue};
use crate::generated::types::Role;
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    data: Arguments,
}
impl NewUser {
    pub const NAME: &'static str = "name";
    pub const ROLE: &'static str = "role";
    pub const TAG: &'static str = "tag";
    pub fn new(name: String, role: Option<Role>, tag: Option<String>) -> Self {
        Self {
            data: Arguments::from([(Self::NAME, name.to_input_value())]),
        }
            .with_role(role)
            .with_tag(tag)
    }
    pub fn with_role(mut self, role: Option<Role>) -> Self {
        let Some(role) = role else {
            return self;
        };
        self.data.insert(Self::ROLE, role.to_input_value());
        self
    }
    /// Initial tag
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        let Some(tag) = tag else {
            return self;
        };
        self.data.insert(Self::TAG, tag.to_input_value());
        self
    }
}
impl ToInputValue for NewUser {
    fn to_input_value(&self) -> InputValue {
        InputValue::Object(self.data.clone())
    }
}
