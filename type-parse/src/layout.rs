use crate::{
    builtins,
    types::{Constant, DataType, Type, TypeBody, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub size: usize,
    pub align: usize,
}

impl Layout {
    fn primitive(bits: usize) -> Self {
        let size = bits.div_ceil(8);
        Self {
            size,
            align: size.next_power_of_two().min(8),
        }
    }

    fn empty() -> Self {
        Self { size: 0, align: 1 }
    }
}

fn align_to(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

// C struct layout
fn aggregate(fields: impl IntoIterator<Item = Layout>) -> Layout {
    let mut size = 0;
    let mut align = 1;
    for field in fields {
        size = align_to(size, field.align) + field.size;
        align = align.max(field.align);
    }
    Layout {
        size: align_to(size, align),
        align,
    }
}

pub fn layout_of(dt: &DataType) -> Option<Layout> {
    if Type::DataType(dt.clone()).has_free_vars() {
        return None;
    }
    match &dt.name.body {
        TypeBody::Primitive { bits } => Some(Layout::primitive(*bits)),
        TypeBody::Struct { mutable: false, .. } => {
            let fields = dt.field_types().ok()?;
            if fields.is_empty() {
                return Some(Layout::empty());
            }
            fields
                .iter()
                .map(|field| field.as_datatype().and_then(layout_of))
                .collect::<Option<Vec<_>>>()
                .map(aggregate)
        }
        TypeBody::Tuple => dt
            .params
            .iter()
            .map(|param| match param {
                Value::Type(Type::DataType(field)) => layout_of(field),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(aggregate),
        TypeBody::Struct { mutable: true, .. }
        | TypeBody::Abstract
        | TypeBody::Opaque
        | TypeBody::Union => None,
    }
}

pub fn encode(value: &Value) -> Option<(Layout, Vec<u8>)> {
    match value {
        Value::Int(n) => Some((Layout::primitive(64), n.to_le_bytes().to_vec())),
        Value::Float(x) => Some((Layout::primitive(64), x.to_le_bytes().to_vec())),
        Value::Bool(b) => Some((Layout::primitive(8), vec![u8::from(*b)])),
        Value::Char(c) => Some((Layout::primitive(32), u32::from(*c).to_le_bytes().to_vec())),
        Value::Const(constant) => {
            layout_of(&constant.ty).map(|layout| (layout, constant.bytes.clone()))
        }
        Value::Type(_) | Value::Module(_) | Value::Str(_) | Value::Symbol(_) => None,
    }
}

pub fn pack(values: &[Value]) -> Option<(Layout, Vec<u8>)> {
    let encoded = values.iter().map(encode).collect::<Option<Vec<_>>>()?;
    let layout = aggregate(encoded.iter().map(|(layout, _)| *layout));
    let mut bytes = Vec::with_capacity(layout.size);
    for (field, field_bytes) in &encoded {
        bytes.resize(align_to(bytes.len(), field.align), 0);
        bytes.extend_from_slice(field_bytes);
    }
    bytes.resize(layout.size, 0);
    Some((layout, bytes))
}

pub fn normalize(constant: Constant) -> Value {
    let name = &constant.ty.name;
    let bytes = constant.bytes.as_slice();
    let literal = if **name == **builtins::INT64 {
        bytes.try_into().ok().map(i64::from_le_bytes).map(Value::Int)
    } else if **name == **builtins::FLOAT64 {
        bytes.try_into().ok().map(f64::from_le_bytes).map(Value::Float)
    } else if **name == **builtins::BOOL {
        match bytes {
            [0] => Some(Value::Bool(false)),
            [1] => Some(Value::Bool(true)),
            _ => None,
        }
    } else if **name == **builtins::CHAR {
        bytes
            .try_into()
            .ok()
            .map(u32::from_le_bytes)
            .and_then(char::from_u32)
            .map(Value::Char)
    } else {
        None
    };
    literal.unwrap_or(Value::Const(constant))
}
