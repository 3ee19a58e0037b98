//! Request payloads built by generated service methods

use crate::{Arguments, ClientError, FieldSelection};
use serde::Serialize;
use std::fmt;

/// Root operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// A `query` operation
    Query,
    /// A `mutation` operation
    Mutation,
}

impl OperationKind {
    /// The GraphQL keyword for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-field GraphQL operation
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Operation kind
    pub kind: OperationKind,
    /// Root field being invoked
    pub action: String,
    /// Arguments passed to the root field
    pub arguments: Arguments,
    /// Selection for object-returning fields
    pub selection: Option<FieldSelection>,
}

impl Request {
    /// Builds a query request.
    pub fn query(
        action: impl Into<String>,
        arguments: Arguments,
        selection: Option<FieldSelection>,
    ) -> Result<Self, ClientError> {
        Self::with_action(OperationKind::Query, action, arguments, selection)
    }

    /// Builds a mutation request.
    pub fn mutation(
        action: impl Into<String>,
        arguments: Arguments,
        selection: Option<FieldSelection>,
    ) -> Result<Self, ClientError> {
        Self::with_action(OperationKind::Mutation, action, arguments, selection)
    }

    /// Builds a request of the given kind.
    ///
    /// A selection with no fields would render `{ }`, which no server
    /// accepts, so it is rejected with [`ClientError::EmptySelection`].
    pub fn with_action(
        kind: OperationKind,
        action: impl Into<String>,
        arguments: Arguments,
        selection: Option<FieldSelection>,
    ) -> Result<Self, ClientError> {
        let action = action.into();
        if selection.as_ref().is_some_and(FieldSelection::is_empty) {
            return Err(ClientError::EmptySelection { action });
        }
        Ok(Self {
            kind,
            action,
            arguments,
            selection,
        })
    }

    /// Renders the GraphQL document, e.g. `query { user(id: "1") { id } }`.
    #[must_use]
    pub fn to_document(&self) -> String {
        match &self.selection {
            Some(selection) => format!(
                "{} {{ {}{} {} }}",
                self.kind, self.action, self.arguments, selection
            ),
            None => format!("{} {{ {}{} }}", self.kind, self.action, self.arguments),
        }
    }

    /// The JSON body expected by GraphQL-over-HTTP servers.
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "query": self.to_document() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputValue, ToInputValue};

    #[test]
    fn test_query_document() {
        let mut selection = FieldSelection::new();
        selection.select("id", Arguments::new(), None);
        selection.select("name", Arguments::new(), None);

        let request = Request::query(
            "user",
            Arguments::from([("id", "42".to_input_value())]),
            Some(selection),
        )
        .unwrap();

        assert_eq!(request.kind, OperationKind::Query);
        assert_eq!(request.to_document(), r#"query { user(id: "42") { id name } }"#);
        assert_eq!(
            request.to_payload(),
            serde_json::json!({"query": r#"query { user(id: "42") { id name } }"#})
        );
    }

    #[test]
    fn test_scalar_mutation_document() {
        let request = Request::mutation(
            "setStatus",
            Arguments::from([("status", InputValue::Enum("AWAY".to_string()))]),
            None,
        )
        .unwrap();
        assert_eq!(request.to_document(), "mutation { setStatus(status: AWAY) }");
    }

    #[test]
    fn test_no_arguments() {
        let request = Request::query("serverTime", Arguments::new(), None).unwrap();
        assert_eq!(request.to_document(), "query { serverTime }");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let result = Request::query(
            "user",
            Arguments::from([("id", "42".to_input_value())]),
            Some(FieldSelection::new()),
        );
        assert_eq!(
            result,
            Err(ClientError::EmptySelection {
                action: "user".to_string()
            })
        );
    }
}
