use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{
    namespace::Module,
    types::{wrapper, DataType, Type, TypeBody, TypeName, TypeVar, Value},
};

fn core_type(name: &str, body: TypeBody) -> Arc<TypeName> {
    TypeName::new("Core", name, vec![], body)
}

fn primitive(name: &str, bits: usize) -> Arc<TypeName> {
    core_type(name, TypeBody::Primitive { bits })
}

pub static ANY: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Any", TypeBody::Abstract));
pub static NUMBER: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Number", TypeBody::Abstract));
pub static REAL: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Real", TypeBody::Abstract));
pub static INTEGER: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Integer", TypeBody::Abstract));
pub static SIGNED: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Signed", TypeBody::Abstract));
pub static UNSIGNED: Lazy<Arc<TypeName>> =
    Lazy::new(|| core_type("Unsigned", TypeBody::Abstract));
pub static ABSTRACT_FLOAT: Lazy<Arc<TypeName>> =
    Lazy::new(|| core_type("AbstractFloat", TypeBody::Abstract));

pub static INT8: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Int8", 8));
pub static INT16: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Int16", 16));
pub static INT32: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Int32", 32));
pub static INT64: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Int64", 64));
pub static UINT8: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("UInt8", 8));
pub static UINT16: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("UInt16", 16));
pub static UINT32: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("UInt32", 32));
pub static UINT64: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("UInt64", 64));
pub static FLOAT32: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Float32", 32));
pub static FLOAT64: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Float64", 64));
pub static BOOL: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Bool", 8));
pub static CHAR: Lazy<Arc<TypeName>> = Lazy::new(|| primitive("Char", 32));

pub static STRING: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("String", TypeBody::Opaque));
pub static SYMBOL: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Symbol", TypeBody::Opaque));
pub static NOTHING: Lazy<Arc<TypeName>> = Lazy::new(|| {
    core_type(
        "Nothing",
        TypeBody::Struct {
            fields: vec![],
            mutable: false,
        },
    )
});

pub static DATATYPE: Lazy<Arc<TypeName>> =
    Lazy::new(|| core_type("DataType", TypeBody::Opaque));
pub static UNIONALL: Lazy<Arc<TypeName>> =
    Lazy::new(|| core_type("UnionAll", TypeBody::Opaque));
pub static TYPEVAR: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("TypeVar", TypeBody::Opaque));
pub static MODULE: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Module", TypeBody::Opaque));
pub static TYPEOF_BOTTOM: Lazy<Arc<TypeName>> =
    Lazy::new(|| core_type("TypeofBottom", TypeBody::Opaque));

pub static TUPLE: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Tuple", TypeBody::Tuple));
pub static UNION: Lazy<Arc<TypeName>> = Lazy::new(|| core_type("Union", TypeBody::Union));

pub static VAL: Lazy<Arc<TypeName>> = Lazy::new(|| {
    TypeName::new(
        "Core",
        "Val",
        vec![TypeVar::unbounded("x")],
        TypeBody::Struct {
            fields: vec![],
            mutable: false,
        },
    )
});

pub static REF: Lazy<Arc<TypeName>> =
    Lazy::new(|| TypeName::new("Core", "Ref", vec![TypeVar::unbounded("T")], TypeBody::Opaque));

pub static ARRAY: Lazy<Arc<TypeName>> = Lazy::new(|| {
    TypeName::new(
        "Core",
        "Array",
        vec![TypeVar::unbounded("T"), TypeVar::unbounded("N")],
        TypeBody::Opaque,
    )
});

pub static COMPLEX: Lazy<Arc<TypeName>> = Lazy::new(|| {
    let t = TypeVar::new("T", Type::Bottom, real());
    let fields = vec![
        ("re".to_string(), Type::Var(t.clone())),
        ("im".to_string(), Type::Var(t.clone())),
    ];
    TypeName::new(
        "Base",
        "Complex",
        vec![t],
        TypeBody::Struct {
            fields,
            mutable: false,
        },
    )
});

static VECTOR: Lazy<Type> = Lazy::new(|| array_alias(1));
static MATRIX: Lazy<Type> = Lazy::new(|| array_alias(2));

fn array_alias(dims: i64) -> Type {
    let t = TypeVar::unbounded("T");
    let body = Type::DataType(DataType::new(
        Arc::clone(&ARRAY),
        vec![Value::Type(Type::Var(t.clone())), Value::Int(dims)],
    ));
    Type::quantify(body, vec![t])
}

pub fn any() -> Type {
    wrapper(&ANY)
}

pub fn number() -> Type {
    wrapper(&NUMBER)
}

pub fn real() -> Type {
    wrapper(&REAL)
}

pub fn int32() -> Type {
    wrapper(&INT32)
}

pub fn int64() -> Type {
    wrapper(&INT64)
}

pub fn float64() -> Type {
    wrapper(&FLOAT64)
}

pub fn bool() -> Type {
    wrapper(&BOOL)
}

pub fn char() -> Type {
    wrapper(&CHAR)
}

pub fn string() -> Type {
    wrapper(&STRING)
}

pub fn symbol() -> Type {
    wrapper(&SYMBOL)
}

pub fn datatype() -> Type {
    wrapper(&DATATYPE)
}

pub fn unionall() -> Type {
    wrapper(&UNIONALL)
}

pub fn typevar() -> Type {
    wrapper(&TYPEVAR)
}

pub fn module() -> Type {
    wrapper(&MODULE)
}

pub fn typeof_bottom() -> Type {
    wrapper(&TYPEOF_BOTTOM)
}

pub fn union_type() -> Type {
    wrapper(&UNION)
}

pub fn tuple() -> Type {
    wrapper(&TUPLE)
}

pub fn val() -> Type {
    wrapper(&VAL)
}

pub fn array() -> Type {
    wrapper(&ARRAY)
}

pub fn complex() -> Type {
    wrapper(&COMPLEX)
}

pub fn vector() -> Type {
    VECTOR.clone()
}

pub fn matrix() -> Type {
    MATRIX.clone()
}

fn core_type_names() -> Vec<&'static Arc<TypeName>> {
    vec![
        &*ANY,
        &*NUMBER,
        &*REAL,
        &*INTEGER,
        &*SIGNED,
        &*UNSIGNED,
        &*ABSTRACT_FLOAT,
        &*INT8,
        &*INT16,
        &*INT32,
        &*INT64,
        &*UINT8,
        &*UINT16,
        &*UINT32,
        &*UINT64,
        &*FLOAT32,
        &*FLOAT64,
        &*BOOL,
        &*CHAR,
        &*STRING,
        &*SYMBOL,
        &*NOTHING,
        &*DATATYPE,
        &*UNIONALL,
        &*TYPEVAR,
        &*MODULE,
        &*TYPEOF_BOTTOM,
        &*TUPLE,
        &*UNION,
        &*VAL,
        &*REF,
        &*ARRAY,
    ]
}

pub fn core_module() -> Module {
    let mut core = Module::new("Core");
    for name in core_type_names() {
        core.insert(name.name.clone(), wrapper(name));
    }
    core.insert("Int", int64());
    core.insert("UInt", wrapper(&UINT64));
    core
}

pub fn base_module() -> Module {
    let mut base = Module::new("Base");
    base.insert("Complex", complex());
    base.insert("Vector", vector());
    base.insert("Matrix", matrix());
    base
}

pub fn main_module() -> Module {
    let core = core_module();
    let base = base_module();
    let mut main = Module::new("Main");
    for (name, value) in core.bindings().chain(base.bindings()) {
        main.insert(name.clone(), value.clone());
    }
    main.insert("Core", Value::Module(Arc::new(core)));
    main.insert("Base", Value::Module(Arc::new(base)));
    main
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;

    #[test]
    fn int_is_an_alias() {
        let core = core_module();
        assert_eq!(core.lookup("Int"), Some(Value::Type(int64())));
    }

    #[test]
    fn main_exposes_nested_modules() {
        let main = main_module();
        let Some(Value::Module(base)) = main.lookup("Base") else {
            panic!("Base is not a module");
        };
        assert_eq!(base.lookup("Vector"), Some(Value::Type(vector())));
        assert_eq!(main.lookup("Vector"), Some(Value::Type(vector())));
    }

    #[test]
    fn generic_wrapper_quantifies_every_param() {
        // Array = Array{T, N} where N where T
        let Type::UnionAll(t, inner) = array() else {
            panic!("Array is not quantified");
        };
        let Type::UnionAll(n, _) = *inner else {
            panic!("Array is quantified once");
        };
        assert_eq!(t.name(), "T");
        assert_eq!(n.name(), "N");
    }

    #[test]
    fn aliases_are_stable() {
        assert_eq!(vector(), vector());
    }
}
