//! Selection sets
//!
//! Generated `<Type>FieldSelection` builders record into a [`FieldSelection`],
//! which renders to GraphQL selection-set syntax.

use crate::Arguments;
use std::fmt;

/// One selected field with its arguments and optional nested selection
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedField {
    /// Wire name of the field
    pub name: String,
    /// Arguments supplied for the field
    pub arguments: Arguments,
    /// Nested selection for object-typed fields
    pub selection: Option<FieldSelection>,
}

/// An ordered set of selected fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSelection {
    fields: Vec<SelectedField>,
}

impl FieldSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a field. Selecting the same field twice replaces the earlier entry in place.
    pub fn select(
        &mut self,
        name: impl Into<String>,
        arguments: Arguments,
        selection: Option<FieldSelection>,
    ) {
        let field = SelectedField {
            name: name.into(),
            arguments,
            selection,
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Returns the entry for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SelectedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` was selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Selected fields in selection order.
    #[must_use]
    pub fn fields(&self) -> &[SelectedField] {
        &self.fields
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for FieldSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for field in &self.fields {
            write!(f, " {}{}", field.name, field.arguments)?;
            if let Some(nested) = &field.selection {
                write!(f, " {nested}")?;
            }
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputValue, ToInputValue};

    #[test]
    fn test_render_nested_selection() {
        let mut friends = FieldSelection::new();
        friends.select("id", Arguments::new(), None);

        let mut user = FieldSelection::new();
        user.select("id", Arguments::new(), None);
        user.select("name", Arguments::new(), None);
        user.select(
            "friends",
            Arguments::from([("first", 2i32.to_input_value())]),
            Some(friends),
        );

        assert_eq!(user.to_string(), "{ id name friends(first: 2) { id } }");
    }

    #[test]
    fn test_reselecting_replaces_arguments() {
        let mut selection = FieldSelection::new();
        selection.select("avatar", Arguments::from([("size", InputValue::Int(16))]), None);
        selection.select("avatar", Arguments::from([("size", InputValue::Int(64))]), None);

        assert_eq!(selection.fields().len(), 1);
        assert_eq!(
            selection.get("avatar").unwrap().arguments.get("size"),
            Some(&InputValue::Int(64))
        );
    }
}
