//! Declaration-level syntax nodes.
//!
//! Only what name resolution needs is modelled: headers, members and nesting.
//! Method bodies and expressions are not part of this model.

use super::access::AccessSpecifier;
use super::type_ref::TypeRef;
use crate::error::{ApiError, ApiResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of a type declaration
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct TypeParameterNode {
    pub name: String,
    /// Upper bounds in written order (`T extends A & B`)
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameterNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

/// A formal parameter, or a record component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParameterNode {
    pub name: String,
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_varargs: bool,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_varargs: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FieldNode {
    pub name: String,
    pub type_ref: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodNode {
    pub name: String,
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl MethodNode {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            throws: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterNode>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct ConstructorNode {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Record compact form: `Point { ... }` with no parameter list.
    #[serde(default)]
    pub is_compact: bool,
}

impl ConstructorNode {
    pub fn new(parameters: Vec<ParameterNode>) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    pub fn compact() -> Self {
        Self {
            is_compact: true,
            ..Self::default()
        }
    }

    pub fn with_throws(mut self, throws: Vec<TypeRef>) -> Self {
        self.throws = throws;
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// A class, interface, enum or record declaration with its nested types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct TypeDeclNode {
    pub kind: TypeDeclKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Annotation names as written, without `@`
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    /// `extends` clause of a class
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    /// `implements` clause, or `extends` clause of an interface
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Record header components in declared order
    #[serde(default)]
    pub components: Vec<ParameterNode>,
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
    #[serde(default)]
    pub constructors: Vec<ConstructorNode>,
    /// Member types declared in the body
    #[serde(default)]
    pub members: Vec<TypeDeclNode>,
}

impl TypeDeclNode {
    pub fn new(kind: TypeDeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            components: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Enum, name)
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Record, name)
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_type_parameter(mut self, param: TypeParameterNode) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_component(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.components.push(ParameterNode::new(name, type_ref));
        self
    }

    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorNode) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_member(mut self, member: TypeDeclNode) -> Self {
        self.members.push(member);
        self
    }

    pub fn access_specifier(&self) -> AccessSpecifier {
        AccessSpecifier::from_modifiers(&self.modifiers)
    }

    pub fn member(&self, name: &str) -> Option<(usize, &TypeDeclNode)> {
        self.members.iter().enumerate().find(|(_, m)| m.name == name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ImportNode {
    /// Imported name without the trailing `.*`
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_wildcard: bool,
}

impl ImportNode {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_wildcard: false,
        }
    }

    pub fn on_demand(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_wildcard: true,
        }
    }

    /// Last segment of a single-type import.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// One source file worth of declarations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct CompilationUnit {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportNode>,
    #[serde(default)]
    pub types: Vec<TypeDeclNode>,
}

impl CompilationUnit {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.map(|p| p.to_string()),
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: ImportNode) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_type(mut self, decl: TypeDeclNode) -> Self {
        self.types.push(decl);
        self
    }

    /// Qualified name prefix for top-level types of this unit.
    pub fn qualify(&self, name: &str) -> String {
        match self.package.as_deref() {
            Some(pkg) if !pkg.is_empty() => format!("{}.{}", pkg, name),
            _ => name.to_string(),
        }
    }

    /// Reads a unit produced by an out-of-process front end.
    pub fn from_json(json: &str) -> ApiResult<Self> {
        let unit: CompilationUnit = serde_json::from_str(json)?;
        unit.validate()?;
        Ok(unit)
    }

    /// JSON Schema of the unit format accepted by [`CompilationUnit::from_json`],
    /// for front ends that emit units from another process.
    pub fn json_schema() -> ApiResult<serde_json::Value> {
        Ok(serde_json::to_value(schemars::schema_for!(CompilationUnit))?)
    }

    /// Rejects nodes the resolver cannot index: empty names and records
    /// declaring a superclass.
    pub fn validate(&self) -> ApiResult<()> {
        fn check(node: &TypeDeclNode) -> ApiResult<()> {
            if node.name.is_empty() {
                return Err(ApiError::InvalidArgument(
                    "type declaration without a name".to_string(),
                ));
            }
            if node.kind == TypeDeclKind::Record && node.superclass.is_some() {
                return Err(ApiError::InvalidArgument(format!(
                    "record {} cannot declare a superclass",
                    node.name
                )));
            }
            node.members.iter().try_for_each(check)
        }
        self.types.iter().try_for_each(check)
    }
}
