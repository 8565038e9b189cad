use std::sync::Arc;

use itertools::Itertools;

use crate::{
    error::{Result, TypeParseError},
    types::{DataType, Type, TypeBody, TypeVar, Value},
};

impl Type {
    // A nested quantifier whose bounds mention `var` is rebuilt around a fresh variable.
    pub fn subst(&self, var: &TypeVar, replacement: &Value) -> Result<Type> {
        match self {
            Type::Var(v) if v == var => match replacement {
                Value::Type(ty) => Ok(ty.clone()),
                other => Err(TypeParseError::InvalidTypeParameter {
                    var: var.to_string(),
                    value: other.to_string(),
                }),
            },
            Type::Var(_) | Type::Bottom | Type::Variadic(_) => Ok(self.clone()),
            Type::DataType(dt) => Ok(Type::DataType(dt.subst(var, replacement)?)),
            Type::Union(members) => members
                .iter()
                .map(|member| member.subst(var, replacement))
                .collect::<Result<Vec<_>>>()
                .map(Type::Union),
            Type::UnionAll(bound_var, body) => {
                if bound_var == var {
                    return Ok(self.clone());
                }
                let lower = bound_var.lower().subst(var, replacement)?;
                let upper = bound_var.upper().subst(var, replacement)?;
                if &lower == bound_var.lower() && &upper == bound_var.upper() {
                    return Ok(Type::UnionAll(
                        bound_var.clone(),
                        Box::new(body.subst(var, replacement)?),
                    ));
                }
                let renamed = TypeVar::new(bound_var.name(), lower, upper);
                let body = body
                    .subst(bound_var, &Value::Type(Type::Var(renamed.clone())))?
                    .subst(var, replacement)?;
                Ok(Type::UnionAll(renamed, Box::new(body)))
            }
        }
    }
}

impl DataType {
    pub fn subst(&self, var: &TypeVar, replacement: &Value) -> Result<DataType> {
        let params = self
            .params
            .iter()
            .map(|param| param.subst(var, replacement))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataType::new(Arc::clone(&self.name), params))
    }

    pub fn field_types(&self) -> Result<Vec<Type>> {
        let TypeBody::Struct { fields, .. } = &self.name.body else {
            return Ok(vec![]);
        };
        fields
            .iter()
            .map(|(_, declared)| {
                self.name
                    .params
                    .iter()
                    .zip(&self.params)
                    .try_fold(declared.clone(), |ty, (var, param)| ty.subst(var, param))
            })
            .collect()
    }
}

impl Value {
    pub fn subst(&self, var: &TypeVar, replacement: &Value) -> Result<Value> {
        match self {
            Value::Type(Type::Var(v)) if v == var => Ok(replacement.clone()),
            Value::Type(ty) => Ok(Value::Type(ty.subst(var, replacement)?)),
            other => Ok(other.clone()),
        }
    }
}

// One quantifier per parameter, outermost first. Only the unapplied `Tuple` and `Union` take
// their parameters directly.
pub fn apply_type(base: &Type, params: &[Value]) -> Result<Type> {
    if let Type::Variadic(name) = base {
        let members = params
            .iter()
            .map(|param| {
                param.as_type().cloned().ok_or_else(|| {
                    TypeParseError::InvalidTypeParameter {
                        var: name.name.clone(),
                        value: param.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(match name.body {
            TypeBody::Union => Type::union(members),
            _ => Type::DataType(DataType::new(
                Arc::clone(name),
                members.into_iter().map(Value::Type).collect(),
            )),
        });
    }

    params.iter().try_fold(base.clone(), |current, param| match current {
        Type::UnionAll(var, body) => body.subst(&var, param),
        _ => Err(TypeParseError::InvalidApplication {
            base: base.to_string(),
            params: params.iter().format(", ").to_string(),
        }),
    })
}
