//! Field selection for `User`
//! @generated
#![allow(missing_docs)]
#![allow(unused_imports)]
use gqlforge_client::{Arguments, FieldSelection};
/// Selects fields of `User` for a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFieldSelection {
    selection: FieldSelection,
}
impl UserFieldSelection {
    pub const ID: &'static str = "id";
    pub const NAME: &'static str = "name";
    pub const ROLE: &'static str = "role";
    pub const TAGS: &'static str = "tags";
    pub const MANAGER: &'static str = "manager";
    /// Creates a builder with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self) -> Self {
        self.selection.select(Self::ID, Arguments::new(), None);
        self
    }
    pub fn with_name(mut self) -> Self {
        self.selection.select(Self::NAME, Arguments::new(), None);
        self
    }
    pub fn with_role(mut self) -> Self {
        self.selection.select(Self::ROLE, Arguments::new(), None);
        self
    }
    pub fn with_tags(mut self) -> Self {
        self.selection.select(Self::TAGS, Arguments::new(), None);
        self
    }
    /// Who this user reports to
    pub fn with_manager(mut self, selection: UserFieldSelection) -> Self {
        self.selection
            .select(Self::MANAGER, Arguments::new(), Some(selection.into_selection()));
        self
    }
    /// The recorded selection set.
    pub fn into_selection(self) -> FieldSelection {
        self.selection
    }
}
