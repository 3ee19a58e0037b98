//! GraphQL object for `User`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
use gqlforge_client::{ClientError, decode, Hydrated, Map, OutputObject, Value};
use crate::generated::types::Role;
/// A registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Hydrated<String>,
    name: Hydrated<Option<String>>,
    role: Hydrated<Role>,
    tags: Hydrated<Vec<String>>,
    /// Who this user reports to
    manager: Hydrated<Option<Box<User>>>,
}
impl User {
    fn unhydrated() -> Self {
        Self {
            id: Hydrated::Unset,
            name: Hydrated::Unset,
            role: Hydrated::Unset,
            tags: Hydrated::Unset,
            manager: Hydrated::Unset,
        }
    }
    pub fn id(&self) -> Result<&str, ClientError> {
        self.id.get("id").map(String::as_str)
    }
    pub fn name(&self) -> Result<Option<&str>, ClientError> {
        self.name.get("name").map(Option::as_deref)
    }
    pub fn role(&self) -> Result<&Role, ClientError> {
        self.role.get("role")
    }
    pub fn tags(&self) -> Result<&[String], ClientError> {
        self.tags.get("tags").map(Vec::as_slice)
    }
    /// Who this user reports to
    pub fn manager(&self) -> Result<Option<&User>, ClientError> {
        self.manager.get("manager").map(Option::as_deref)
    }
    /// Hydrates a `User` from a response map. Keys absent from `fields` stay unhydrated.
    pub fn from_map(fields: &Map<String, Value>) -> Result<Self, ClientError> {
        let mut object = Self::unhydrated();
        object.id = decode::field(fields, "id", decode::scalar::<String>)?;
        object.name = decode::field(
            fields,
            "name",
            |value: &Value| decode::nullable(value, decode::scalar::<String>),
        )?;
        object.role = decode::field(fields, "role", decode::enumeration::<Role>)?;
        object.tags = decode::field(
            fields,
            "tags",
            |value: &Value| decode::list(value, decode::scalar::<String>),
        )?;
        object.manager = decode::field(
            fields,
            "manager",
            |value: &Value| decode::nullable(
                value,
                |value: &Value| decode::object::<User>(value).map(Box::new),
            ),
        )?;
        Ok(object)
    }
}
impl OutputObject for User {
    const TYPE_NAME: &'static str = "User";
    fn from_map(fields: &Map<String, Value>) -> Result<Self, ClientError> {
        Self::from_map(fields)
    }
}
