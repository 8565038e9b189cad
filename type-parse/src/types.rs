use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use itertools::Itertools;

use crate::{ast::Lit, builtins, namespace::Module};

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct TypeVar(Arc<VarData>);

#[derive(Debug)]
struct VarData {
    id: u64,
    name: String,
    lower: Type,
    upper: Type,
}

impl TypeVar {
    pub fn new(name: impl Into<String>, lower: Type, upper: Type) -> Self {
        Self(Arc::new(VarData {
            id: NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            lower,
            upper,
        }))
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, Type::Bottom, builtins::any())
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn lower(&self) -> &Type {
        &self.0.lower
    }

    pub fn upper(&self) -> &Type {
        &self.0.upper
    }
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for TypeVar {}

#[derive(Debug, Clone)]
pub enum TypeBody {
    Abstract,
    Primitive { bits: usize },
    Struct { fields: Vec<(String, Type)>, mutable: bool },
    Opaque, // no fixed plain-data layout
    Tuple,
    Union,
}

#[derive(Debug)]
pub struct TypeName {
    pub module: String,
    pub name: String,
    pub params: Vec<TypeVar>,
    pub body: TypeBody,
}

impl TypeName {
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        params: Vec<TypeVar>,
        body: TypeBody,
    ) -> Arc<Self> {
        Arc::new(Self {
            module: module.into(),
            name: name.into(),
            params,
            body,
        })
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.body, TypeBody::Tuple | TypeBody::Union)
    }
}

impl PartialEq for TypeName {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub name: Arc<TypeName>,
    pub params: Vec<Value>,
}

impl DataType {
    pub fn new(name: Arc<TypeName>, params: Vec<Value>) -> Self {
        Self { name, params }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bottom,                       // Union{}
    Variadic(Arc<TypeName>),      // Tuple, Union (not yet applied)
    DataType(DataType),           // Name{P1, ..., Pn}
    Union(Vec<Type>),             // Union{A, B}
    Var(TypeVar),                 // T
    UnionAll(TypeVar, Box<Type>), // Body where T
}

pub fn wrapper(name: &Arc<TypeName>) -> Type {
    if name.is_variadic() {
        return Type::Variadic(Arc::clone(name));
    }
    let params = name
        .params
        .iter()
        .map(|var| Value::Type(Type::Var(var.clone())))
        .collect();
    let body = Type::DataType(DataType::new(Arc::clone(name), params));
    Type::quantify(body, name.params.clone())
}

impl Type {
    // Last variable innermost.
    pub fn quantify(body: Type, vars: Vec<TypeVar>) -> Type {
        vars.into_iter()
            .rev()
            .fold(body, |body, var| Type::UnionAll(var, Box::new(body)))
    }

    pub fn union(members: Vec<Type>) -> Type {
        let mut flat: Vec<Type> = Vec::new();
        for member in members {
            let parts = match member {
                Type::Bottom => vec![],
                Type::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !flat.contains(&part) {
                    flat.push(part);
                }
            }
        }
        match flat.len() {
            0 => Type::Bottom,
            1 => flat.remove(0),
            _ => Type::Union(flat),
        }
    }

    pub fn as_datatype(&self) -> Option<&DataType> {
        match self {
            Type::DataType(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn alpha_eq(&self, other: &Type) -> bool {
        Self::alpha_eq_in(self, other, &mut Vec::new())
    }

    fn alpha_eq_in(t1: &Type, t2: &Type, bound: &mut Vec<(TypeVar, TypeVar)>) -> bool {
        match (t1, t2) {
            (Type::Bottom, Type::Bottom) => true,
            (Type::Variadic(n1), Type::Variadic(n2)) => n1 == n2,
            (Type::Var(v1), Type::Var(v2)) => bound
                .iter()
                .rev()
                .find(|(l, r)| l == v1 || r == v2)
                .map_or(v1 == v2, |(l, r)| l == v1 && r == v2),
            (Type::DataType(d1), Type::DataType(d2)) => {
                d1.name == d2.name
                    && d1.params.len() == d2.params.len()
                    && d1
                        .params
                        .iter()
                        .zip(&d2.params)
                        .all(|(p1, p2)| Self::alpha_eq_value(p1, p2, bound))
            }
            (Type::Union(m1), Type::Union(m2)) => {
                m1.len() == m2.len()
                    && m1
                        .iter()
                        .zip(m2)
                        .all(|(a, b)| Self::alpha_eq_in(a, b, bound))
            }
            (Type::UnionAll(v1, b1), Type::UnionAll(v2, b2)) => {
                if !Self::alpha_eq_in(v1.lower(), v2.lower(), bound)
                    || !Self::alpha_eq_in(v1.upper(), v2.upper(), bound)
                {
                    return false;
                }
                bound.push((v1.clone(), v2.clone()));
                let result = Self::alpha_eq_in(b1, b2, bound);
                bound.pop();
                result
            }
            _ => false,
        }
    }

    fn alpha_eq_value(v1: &Value, v2: &Value, bound: &mut Vec<(TypeVar, TypeVar)>) -> bool {
        match (v1, v2) {
            (Value::Type(t1), Value::Type(t2)) => Self::alpha_eq_in(t1, t2, bound),
            _ => v1 == v2,
        }
    }

    pub fn has_free_vars(&self) -> bool {
        self.has_free_vars_in(&mut Vec::new())
    }

    fn has_free_vars_in(&self, bound: &mut Vec<TypeVar>) -> bool {
        match self {
            Type::Bottom | Type::Variadic(_) => false,
            Type::Var(var) => !bound.contains(var),
            Type::DataType(dt) => dt.params.iter().any(|param| match param {
                Value::Type(ty) => ty.has_free_vars_in(bound),
                _ => false,
            }),
            Type::Union(members) => members.iter().any(|m| m.has_free_vars_in(bound)),
            Type::UnionAll(var, body) => {
                if var.lower().has_free_vars_in(bound) || var.upper().has_free_vars_in(bound) {
                    return true;
                }
                bound.push(var.clone());
                let result = body.has_free_vars_in(bound);
                bound.pop();
                result
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub ty: DataType,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Type(Type),
    Module(Arc<Module>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Symbol(String),
    Const(Constant),
}

impl Value {
    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn type_of(&self) -> Type {
        match self {
            Value::Type(Type::Bottom) => builtins::typeof_bottom(),
            Value::Type(Type::Variadic(_)) => builtins::datatype(),
            Value::Type(Type::DataType(_)) => builtins::datatype(),
            Value::Type(Type::Union(_)) => builtins::union_type(),
            Value::Type(Type::Var(_)) => builtins::typevar(),
            Value::Type(Type::UnionAll(..)) => builtins::unionall(),
            Value::Module(_) => builtins::module(),
            Value::Int(_) => builtins::int64(),
            Value::Float(_) => builtins::float64(),
            Value::Bool(_) => builtins::bool(),
            Value::Char(_) => builtins::char(),
            Value::Str(_) => builtins::string(),
            Value::Symbol(_) => builtins::symbol(),
            Value::Const(constant) => Type::DataType(constant.ty.clone()),
        }
    }
}

impl From<Lit> for Value {
    fn from(lit: Lit) -> Self {
        match lit {
            Lit::Int(n) => Value::Int(n),
            Lit::Float(x) => Value::Float(x),
            Lit::Bool(b) => Value::Bool(b),
            Lit::Char(c) => Value::Char(c),
            Lit::Str(s) => Value::Str(s),
            Lit::Symbol(s) => Value::Symbol(s),
        }
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::Type(ty)
    }
}

impl std::fmt::Display for TypeVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// `T`, `T<:U`, `T>:L` or `L<:T<:U`, omitting default bounds.
struct VarDecl<'a>(&'a TypeVar);

impl std::fmt::Display for VarDecl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let var = self.0;
        let has_lower = var.lower() != &Type::Bottom;
        let has_upper = var.upper() != &builtins::any();
        match (has_lower, has_upper) {
            (false, false) => write!(f, "{}", var),
            (false, true) => write!(f, "{}<:{}", var, Bound(var.upper())),
            (true, false) => write!(f, "{}>:{}", var, Bound(var.lower())),
            (true, true) => write!(
                f,
                "{}<:{}<:{}",
                Bound(var.lower()),
                var,
                Bound(var.upper())
            ),
        }
    }
}

struct Bound<'a>(&'a Type);

impl std::fmt::Display for Bound<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Type::UnionAll(..) => write!(f, "({})", self.0),
            other => write!(f, "{}", other),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() && !self.name.is_variadic() {
            write!(f, "{}", self.name.name)
        } else {
            write!(f, "{}{{{}}}", self.name.name, self.params.iter().format(", "))
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bottom => write!(f, "Union{{}}"),
            Type::Variadic(name) => write!(f, "{}", name.name),
            Type::DataType(dt) => write!(f, "{}", dt),
            Type::Union(members) => write!(f, "Union{{{}}}", members.iter().format(", ")),
            Type::Var(var) => write!(f, "{}", var),
            Type::UnionAll(var, body) => write!(f, "{} where {}", body, VarDecl(var)),
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bytes.is_empty() {
            write!(f, "{}()", self.ty)
        } else {
            let hex = self.bytes.iter().map(|b| format!("{:02x}", b)).join("");
            write!(f, "{}(0x{})", self.ty, hex)
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Type(ty) => write!(f, "{}", ty),
            Value::Module(module) => write!(f, "{}", module.name()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Const(constant) => write!(f, "{}", constant),
        }
    }
}
