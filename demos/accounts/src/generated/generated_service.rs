//! Service for `crate::generated`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
use gqlforge_client::{
    Arguments, ClientError, decode, Request, ToInputValue, Transport, Value,
};
use crate::generated::UserFieldSelection;
use crate::generated::types::NewUser;
use crate::generated::types::User;
/// Typed entry points for every query and mutation of the schema.
#[derive(Debug, Clone)]
pub struct GeneratedService<T> {
    transport: T,
}
impl<T: Transport> GeneratedService<T> {
    /// Creates a service sending every request through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
    /// Looks up one user by id
    pub fn query_user(
        &self,
        selection: UserFieldSelection,
        id: String,
    ) -> Result<Option<User>, ClientError> {
        let request = Request::query(
            "user",
            Arguments::from([("id", id.to_input_value())]),
            Some(selection.into_selection()),
        )?;
        let response = self.transport.send(&request)?;
        decode::required(
            &response,
            "user",
            |value: &Value| decode::nullable(value, decode::object::<User>),
        )
    }
    pub fn query_users(
        &self,
        selection: UserFieldSelection,
        first: Option<i32>,
    ) -> Result<Vec<User>, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(first) = first {
            arguments.insert("first", first.to_input_value());
        }
        let request = Request::query("users", arguments, Some(selection.into_selection()))?;
        let response = self.transport.send(&request)?;
        decode::required(
            &response,
            "users",
            |value: &Value| decode::list(value, decode::object::<User>),
        )
    }
    pub fn mutation_create_user(
        &self,
        selection: UserFieldSelection,
        input: NewUser,
    ) -> Result<User, ClientError> {
        let request = Request::mutation(
            "createUser",
            Arguments::from([("input", input.to_input_value())]),
            Some(selection.into_selection()),
        )?;
        let response = self.transport.send(&request)?;
        decode::required(&response, "createUser", decode::object::<User>)
    }
}
