//! Intermediate Representation (IR) for code generation
//!
//! The IR is a backend-agnostic model of one generated artifact. Generators
//! decide *what* an artifact contains; a [`Backend`](crate::backends::Backend)
//! decides how it is spelled in the target language.

use crate::registry::{OperationKind, Primitive};
use std::collections::BTreeSet;

/// One generated artifact
#[derive(Debug, Clone, PartialEq)]
pub struct CodeModel {
    /// Module segments below the root namespace (`["types"]` or empty)
    pub module: Vec<String>,
    /// Artifact name, e.g. `User` or `UserFieldSelection`
    pub name: String,
    /// GraphQL name the artifact was generated from
    pub graphql_name: String,
    /// Doc text carried over from the SDL description
    pub docs: Option<String>,
    /// Items the artifact refers to
    pub dependencies: BTreeSet<Dependency>,
    /// Category-specific content
    pub artifact: Artifact,
}

impl CodeModel {
    /// Creates a model with no docs and no dependencies.
    pub fn new(
        module: Vec<String>,
        name: impl Into<String>,
        graphql_name: impl Into<String>,
        artifact: Artifact,
    ) -> Self {
        Self {
            module,
            name: name.into(),
            graphql_name: graphql_name.into(),
            docs: None,
            dependencies: BTreeSet::new(),
            artifact,
        }
    }

    /// Attaches doc text.
    pub fn with_docs(mut self, docs: Option<&str>) -> Self {
        self.docs = docs.map(str::to_string);
        self
    }

    /// Records a dependency.
    pub fn depend(&mut self, dependency: Dependency) {
        self.dependencies.insert(dependency);
    }

    /// Records every runtime item in `items`.
    pub fn depend_on_runtime(&mut self, items: &[RuntimeItem]) {
        for item in items {
            self.dependencies.insert(Dependency::Runtime(*item));
        }
    }
}

/// Something a generated artifact refers to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dependency {
    /// An item of the client runtime
    Runtime(RuntimeItem),
    /// Another artifact, by full path
    Artifact(String),
}

/// Client runtime items generated code uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeItem {
    /// `Arguments`
    Arguments,
    /// `ClientError`
    ClientError,
    /// `decode`
    Decode,
    /// `FieldSelection`
    FieldSelection,
    /// `GraphQLEnum`
    GraphQLEnum,
    /// `Hydrated`
    Hydrated,
    /// `InputValue`
    InputValue,
    /// `Map`
    Map,
    /// `OutputObject`
    OutputObject,
    /// `Request`
    Request,
    /// `Scalar`
    Scalar,
    /// `ScalarTag`
    ScalarTag,
    /// `ToInputValue`
    ToInputValue,
    /// `Transport`
    Transport,
    /// `Value`
    Value,
}

impl RuntimeItem {
    /// Name of the item inside the runtime crate.
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeItem::Arguments => "Arguments",
            RuntimeItem::ClientError => "ClientError",
            RuntimeItem::Decode => "decode",
            RuntimeItem::FieldSelection => "FieldSelection",
            RuntimeItem::GraphQLEnum => "GraphQLEnum",
            RuntimeItem::Hydrated => "Hydrated",
            RuntimeItem::InputValue => "InputValue",
            RuntimeItem::Map => "Map",
            RuntimeItem::OutputObject => "OutputObject",
            RuntimeItem::Request => "Request",
            RuntimeItem::Scalar => "Scalar",
            RuntimeItem::ScalarTag => "ScalarTag",
            RuntimeItem::ToInputValue => "ToInputValue",
            RuntimeItem::Transport => "Transport",
            RuntimeItem::Value => "Value",
        }
    }
}

/// Category-specific artifact content
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Marker for a custom scalar
    CustomScalar,
    /// Enum with constants and accessors
    Enum(EnumModel),
    /// Input object backed by an argument map
    InputObject(ClassModel),
    /// Output object with hydrated properties
    OutputObject(OutputModel),
    /// Read-only accessor contract
    Interface(InterfaceModel),
    /// Selection builder
    FieldSelection(ClassModel),
    /// Aggregate service
    Service(ClassModel),
}

/// A value of a generated enum
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueModel {
    /// Constant name, e.g. `IN_PROGRESS`
    pub constant: String,
    /// Verbatim wire string
    pub wire: String,
    /// Variant name, e.g. `InProgress`
    pub variant: String,
    /// Static accessor name, e.g. `in_progress`
    pub accessor: String,
    /// Doc text
    pub docs: Option<String>,
}

/// Content of a generated enum
#[derive(Debug, Clone, PartialEq)]
pub struct EnumModel {
    /// Values in declaration order
    pub values: Vec<EnumValueModel>,
}

/// A string constant
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    /// Constant name
    pub name: String,
    /// Constant value
    pub value: String,
}

/// A stored property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Member name
    pub name: String,
    /// Wire name of the backing GraphQL field
    pub wire_name: String,
    /// Value type
    pub ty: TypeExpr,
    /// Doc text
    pub docs: Option<String>,
}

/// Artifact made of constants and methods over backend-owned state
///
/// Input objects store their payload in [`INPUT_STORE`], selection builders
/// store their selection set in [`SELECTION_STORE`] and services hold their
/// transport in [`TRANSPORT`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassModel {
    /// Public string constants
    pub constants: Vec<Constant>,
    /// Methods in emission order
    pub methods: Vec<Method>,
}

/// Name of an input object's argument map
pub const INPUT_STORE: &str = "data";

/// Name of a selection builder's selection set
pub const SELECTION_STORE: &str = "selection";

/// Name of a service's transport
pub const TRANSPORT: &str = "transport";

/// Content of a generated output object
#[derive(Debug, Clone, PartialEq)]
pub struct OutputModel {
    /// Hydrated properties in declaration order
    pub properties: Vec<Property>,
    /// Initializer and getters, then the factory
    pub methods: Vec<Method>,
    /// Interfaces the object conforms to
    pub implements: Vec<Conformance>,
}

/// Conformance of an object to an interface
#[derive(Debug, Clone, PartialEq)]
pub struct Conformance {
    /// Interface artifact path
    pub interface: String,
    /// Accessor implementations
    pub methods: Vec<Method>,
}

/// Content of a generated interface
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceModel {
    /// Read-only accessors; bodies are empty
    pub accessors: Vec<Method>,
}

/// How a method receives its instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Associated function
    Static,
    /// Shared borrow
    Borrowed,
    /// Consumed and returned, for fluent builders
    Owned,
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Callable by generated-code users
    Public,
    /// Internal to the artifact
    Private,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeExpr,
}

impl Param {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// What a method returns
#[derive(Debug, Clone, PartialEq)]
pub enum Returns {
    /// A plain value
    Value(TypeExpr),
    /// `Result<T, ClientError>`
    Fallible(TypeExpr),
    /// A borrowed view of a hydrated property, fallible
    Borrowed(TypeExpr),
}

/// A method of a generated artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// Member name
    pub name: String,
    /// Doc text
    pub docs: Option<String>,
    /// Visibility
    pub visibility: Visibility,
    /// Receiver
    pub receiver: Receiver,
    /// Parameters after the receiver
    pub params: Vec<Param>,
    /// Return type
    pub returns: Returns,
    /// Statements; the last `Return` is the tail expression
    pub body: Vec<Stmt>,
}

/// A type as it appears in a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Built-in scalar
    Builtin(Primitive),
    /// Artifact by full path
    Named(String),
    /// List container
    List(Box<TypeExpr>),
    /// May be null
    Nullable(Box<TypeExpr>),
    /// Slot that may not be hydrated yet
    Hydrated(Box<TypeExpr>),
    /// Heap-allocated value, for objects that contain themselves
    Boxed(Box<TypeExpr>),
    /// The artifact's own type
    SelfType,
    /// A borrowed response map
    ResponseMap,
}

impl TypeExpr {
    /// `[inner]`
    pub fn list(inner: TypeExpr) -> Self {
        TypeExpr::List(Box::new(inner))
    }

    /// `inner?`
    pub fn nullable(inner: TypeExpr) -> Self {
        TypeExpr::Nullable(Box::new(inner))
    }

    /// Strips one outer `Nullable`, if any.
    pub fn non_null(&self) -> &TypeExpr {
        match self {
            TypeExpr::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Boxes the value below an outer `Nullable`: `T?` becomes `Box<T>?`.
    pub fn boxed(self) -> Self {
        match self {
            TypeExpr::Nullable(inner) => TypeExpr::Nullable(Box::new(TypeExpr::Boxed(inner))),
            other => TypeExpr::Boxed(Box::new(other)),
        }
    }
}

/// How a single response value is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoder {
    /// Copy a built-in scalar
    Scalar(Primitive),
    /// Look up an enum by wire string
    Enum(String),
    /// Recurse into an output object's factory
    Object(String),
    /// Parse through a custom scalar's routine
    CustomScalar(String),
    /// Element-wise
    List(Box<Decoder>),
    /// Null maps to null
    Nullable(Box<Decoder>),
    /// Moves the decoded value to the heap
    Boxed(Box<Decoder>),
}

impl Decoder {
    /// Boxes the value below an outer `Nullable`, matching [`TypeExpr::boxed`].
    pub fn boxed(self) -> Self {
        match self {
            Decoder::Nullable(inner) => Decoder::Nullable(Box::new(Decoder::Boxed(inner))),
            other => Decoder::Boxed(Box::new(other)),
        }
    }
}

/// A statement in a method body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Local binding
    Let {
        /// Local name
        name: String,
        /// Whether the binding is mutated later
        mutable: bool,
        /// Initial value
        value: Expr,
    },
    /// `target = value`
    Assign {
        /// Place being assigned
        target: Expr,
        /// New value
        value: Expr,
    },
    /// Inserts `value` into an argument map
    Insert {
        /// The map
        map: Expr,
        /// Key expression
        key: Expr,
        /// Value expression
        value: Expr,
    },
    /// Inserts an optional parameter only when it is present
    InsertIfPresent {
        /// The map
        map: Expr,
        /// Key expression
        key: Expr,
        /// Optional parameter
        param: String,
    },
    /// Returns the instance unchanged when the optional parameter is absent
    ReturnSelfIfAbsent {
        /// Optional parameter, rebound as present afterwards
        param: String,
    },
    /// Records a field in a selection set
    Select {
        /// The selection set
        selection: Expr,
        /// Wire name expression
        field: Expr,
        /// Arguments expression
        arguments: Expr,
        /// Nested selection builder parameter
        nested: Option<String>,
    },
    /// Tail expression
    Return(Expr),
}

/// An expression in a method body
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A local or parameter
    Local(String),
    /// The instance
    SelfValue,
    /// `base.name`
    Field {
        /// Owner expression
        base: Box<Expr>,
        /// Field name
        name: String,
    },
    /// An associated constant of the artifact
    Constant(String),
    /// A string literal
    Str(String),
    /// Argument map literal; empty means a fresh empty map
    Arguments(Vec<(Expr, Expr)>),
    /// Converts a parameter to a GraphQL input literal
    ToInput(Box<Expr>),
    /// Calls a method on `receiver`
    MethodCall {
        /// Receiver expression
        receiver: Box<Expr>,
        /// Method name
        method: String,
        /// Arguments
        args: Vec<Expr>,
    },
    /// Calls an associated function of the artifact
    AssociatedCall {
        /// Function name
        function: String,
        /// Arguments
        args: Vec<Expr>,
    },
    /// Constructs the artifact from field initializers
    Construct(Vec<(String, Expr)>),
    /// The never-hydrated sentinel
    Unset,
    /// Builds a request payload
    Request {
        /// Operation kind
        kind: OperationKind,
        /// Root field name
        action: String,
        /// Argument map expression
        arguments: Box<Expr>,
        /// Selection builder parameter, for object-returning fields
        selection: Option<String>,
    },
    /// Sends a request through the transport
    Send(Box<Expr>),
    /// Propagates the failure of a fallible expression
    Try(Box<Expr>),
    /// Shared borrow of a value
    Borrow(Box<Expr>),
    /// Decodes an entry of a response map
    Decode {
        /// Borrowed map expression
        source: Box<Expr>,
        /// Entry key
        key: String,
        /// Per-value decoder
        decoder: Decoder,
        /// Whether the entry must be present
        presence: Presence,
    },
    /// Borrows a hydrated property, failing when unset
    ReadHydrated {
        /// Property name
        property: String,
        /// Wire name reported on failure
        wire_name: String,
        /// Property value type
        ty: TypeExpr,
    },
    /// Calls the artifact's own getter, optionally widening to nullable
    Delegate {
        /// Getter name
        getter: String,
        /// Whether the result is wrapped as present
        widen: bool,
    },
    /// Wraps a value in success
    Ok(Box<Expr>),
}

/// Whether a decoded response entry may be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing leaves the slot unhydrated
    Optional,
    /// Missing is an error
    Required,
}
