//! Accounts client
//!
//! The `generated` tree is checked in. It is what `gqlforge-codegen --config
//! gqlforge.toml` writes for `schema.graphql`, and the generator's test suite
//! fails when the two drift apart.

pub mod generated;

pub use generated::types::{NewUser, Role, User};
pub use generated::{GeneratedService, UserFieldSelection};

#[cfg(test)]
mod tests {
    use super::*;
    use gqlforge_client::{ClientError, InputValue, OutputObject, Request, ToInputValue};
    use serde_json::{json, Map, Value};
    use std::cell::RefCell;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_from_map_hydrates_every_getter() {
        let user = User::from_map(&object(json!({
            "id": "7",
            "name": null,
            "role": "ADMIN",
            "tags": ["ops", "oncall"],
            "manager": {"id": "1", "name": "Grace", "manager": null}
        })))
        .unwrap();

        assert_eq!(user.id().unwrap(), "7");
        assert_eq!(user.name().unwrap(), None);
        assert_eq!(user.role().unwrap(), &Role::Admin);
        assert_eq!(user.tags().unwrap(), ["ops".to_string(), "oncall".to_string()]);

        let manager = user.manager().unwrap().unwrap();
        assert_eq!(manager.id().unwrap(), "1");
        assert_eq!(manager.name().unwrap(), Some("Grace"));
        assert_eq!(manager.manager().unwrap(), None);
        assert_eq!(
            manager.role(),
            Err(ClientError::Unhydrated { field: "role" })
        );
    }

    #[test]
    fn test_output_object_capability() {
        assert_eq!(<User as OutputObject>::TYPE_NAME, "User");
        let user = <User as OutputObject>::from_map(&object(json!({"role": "MEMBER"}))).unwrap();
        assert_eq!(user.role().unwrap(), &Role::Member);
        assert_eq!(user.id(), Err(ClientError::Unhydrated { field: "id" }));
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let err = User::from_map(&object(json!({"role": "OWNER"}))).unwrap_err();
        assert_eq!(
            err,
            ClientError::UnknownEnumValue {
                enum_name: "Role",
                value: "OWNER".to_string()
            }
        );
    }

    #[test]
    fn test_absent_optional_input_fields_are_omitted() {
        let input = NewUser::new("Ada".to_string(), Some(Role::Admin), None).with_tag(None);
        let InputValue::Object(data) = input.to_input_value() else {
            panic!("expected an input object");
        };

        assert!(!data.contains_key(NewUser::TAG));
        assert_eq!(data.get(NewUser::NAME), Some(&InputValue::String("Ada".to_string())));
        assert_eq!(data.get(NewUser::ROLE), Some(&InputValue::Enum("ADMIN".to_string())));

        let tagged = input.with_tag(Some("new".to_string()));
        let InputValue::Object(data) = tagged.to_input_value() else {
            panic!("expected an input object");
        };
        assert_eq!(data.get(NewUser::TAG), Some(&InputValue::String("new".to_string())));
    }

    #[test]
    fn test_query_user_through_closure_transport() {
        let documents = RefCell::new(Vec::new());
        let transport = |request: &Request| -> Result<Map<String, Value>, ClientError> {
            documents.borrow_mut().push(request.to_document());
            Ok(object(json!({
                "user": {"id": "7", "name": "Ada", "manager": {"id": "1"}}
            })))
        };
        let service = GeneratedService::new(transport);

        let selection = UserFieldSelection::new()
            .with_id()
            .with_name()
            .with_manager(UserFieldSelection::new().with_id());
        let user = service
            .query_user(selection, "7".to_string())
            .unwrap()
            .unwrap();

        assert_eq!(
            documents.borrow().as_slice(),
            [r#"query { user(id: "7") { id name manager { id } } }"#.to_string()]
        );
        assert_eq!(user.name().unwrap(), Some("Ada"));
        assert_eq!(user.manager().unwrap().unwrap().id().unwrap(), "1");
        assert_eq!(user.tags(), Err(ClientError::Unhydrated { field: "tags" }));
    }

    #[test]
    fn test_null_root_field_decodes_to_none() {
        let service = GeneratedService::new(|_: &Request| -> Result<Map<String, Value>, ClientError> {
            Ok(object(json!({"user": null})))
        });
        let user = service
            .query_user(UserFieldSelection::new().with_id(), "404".to_string())
            .unwrap();
        assert_eq!(user, None);
    }

    #[test]
    fn test_optional_arguments_are_only_sent_when_present() {
        let documents = RefCell::new(Vec::new());
        let transport = |request: &Request| -> Result<Map<String, Value>, ClientError> {
            documents.borrow_mut().push(request.to_document());
            Ok(object(json!({"users": [{"id": "1"}, {"id": "2"}]})))
        };
        let service = GeneratedService::new(transport);

        let users = service
            .query_users(UserFieldSelection::new().with_id(), None)
            .unwrap();
        service
            .query_users(UserFieldSelection::new().with_id(), Some(2))
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id().unwrap(), "2");
        assert_eq!(
            documents.borrow().as_slice(),
            [
                "query { users { id } }".to_string(),
                "query { users(first: 2) { id } }".to_string(),
            ]
        );
    }

    #[test]
    fn test_mutation_sends_input_object() {
        let documents = RefCell::new(Vec::new());
        let transport = |request: &Request| -> Result<Map<String, Value>, ClientError> {
            documents.borrow_mut().push(request.to_document());
            Ok(object(json!({"createUser": {"id": "9", "role": "MEMBER"}})))
        };
        let service = GeneratedService::new(transport);

        let input = NewUser::new("Ada".to_string(), None, Some("new".to_string()));
        let user = service
            .mutation_create_user(UserFieldSelection::new().with_id().with_role(), input)
            .unwrap();

        assert_eq!(user.id().unwrap(), "9");
        assert_eq!(user.role().unwrap(), &Role::Member);
        assert_eq!(
            documents.borrow().as_slice(),
            [r#"mutation { createUser(input: {name: "Ada", tag: "new"}) { id role } }"#.to_string()]
        );
    }

    #[test]
    fn test_empty_selection_never_reaches_transport() {
        let calls = RefCell::new(0);
        let service = GeneratedService::new(|_: &Request| -> Result<Map<String, Value>, ClientError> {
            *calls.borrow_mut() += 1;
            Ok(Map::new())
        });

        let err = service
            .query_user(UserFieldSelection::new(), "7".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::EmptySelection {
                action: "user".to_string()
            }
        );
        assert_eq!(*calls.borrow(), 0);
    }
}
