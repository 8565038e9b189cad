use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    apply::apply_type,
    ast::Expr,
    builtins,
    error::{Result, TypeParseError},
    namespace::Namespace,
    types::{Type, TypeVar, Value},
};

mod bounds;
mod isbits;
mod resolve;

// Inner quantifiers shadow outer ones.
pub type Scope = BTreeMap<String, TypeVar>;

pub struct TypeEvaluator<'ns> {
    namespace: &'ns dyn Namespace,
    counter: usize,
}

impl<'ns> TypeEvaluator<'ns> {
    pub fn new(namespace: &'ns dyn Namespace) -> Self {
        Self {
            namespace,
            counter: 0,
        }
    }

    fn fresh_var_name(&mut self) -> String {
        self.counter += 1;
        format!("#s{}", self.counter)
    }

    pub fn eval(&mut self, scope: &Scope, expr: &Expr) -> Result<Value> {
        trace!(%expr, "evaluating");
        match expr {
            Expr::Curly(base, params) => self.eval_curly(scope, base, params),
            Expr::Where(body, decls) => self.eval_where(scope, body, decls),
            Expr::Call(callee, args) => match (callee.as_ref(), args.as_slice()) {
                (Expr::Ident(name), [arg]) if name == "typeof" => self.eval_typeof(scope, arg),
                _ => self.construct_isbits(scope, callee, args),
            },
            Expr::Dot(..) => self.resolve_qualified(scope, expr),
            Expr::Ident(name) => self.resolve_ident(scope, name),
            Expr::Lit(lit) => Ok(Value::from(lit.clone())),
            Expr::UpperBound(_) | Expr::LowerBound(_) | Expr::Compare(..) => {
                Err(TypeParseError::MalformedBound {
                    text: expr.to_string(),
                })
            }
        }
    }

    pub fn eval_type(&mut self, scope: &Scope, expr: &Expr) -> Result<Type> {
        match self.eval(scope, expr)? {
            Value::Type(ty) => Ok(ty),
            other => Err(TypeParseError::NotAType {
                found: other.to_string(),
            }),
        }
    }

    // Base{P1, ..., Pn}, where each bare `<:X` / `>:X` becomes an anonymous variable
    // quantified around the applied type, last one innermost.
    fn eval_curly(&mut self, scope: &Scope, base: &Expr, params: &[Expr]) -> Result<Value> {
        let base_type = self.eval_type(scope, base)?;

        let mut implicit = Vec::new();
        let mut values = Vec::with_capacity(params.len());
        for param in params {
            let value = match param {
                Expr::UpperBound(upper) => {
                    let upper = self.eval_type(scope, upper)?;
                    let var = TypeVar::new(self.fresh_var_name(), Type::Bottom, upper);
                    implicit.push(var.clone());
                    Value::Type(Type::Var(var))
                }
                Expr::LowerBound(lower) => {
                    let lower = self.eval_type(scope, lower)?;
                    let var = TypeVar::new(self.fresh_var_name(), lower, builtins::any());
                    implicit.push(var.clone());
                    Value::Type(Type::Var(var))
                }
                _ => self.eval(scope, param)?,
            };
            values.push(value);
        }

        let applied = apply_type(&base_type, &values)?;
        if !implicit.is_empty() {
            debug!(base = %base_type, count = implicit.len(), "quantifying implicit variables");
        }
        Ok(Value::Type(Type::quantify(applied, implicit)))
    }

    // Body where {V1, ..., Vn}: each declaration sees the ones before it.
    fn eval_where(&mut self, scope: &Scope, body: &Expr, decls: &[Expr]) -> Result<Value> {
        let mut inner = scope.clone();
        let mut vars = Vec::with_capacity(decls.len());
        for decl in decls {
            let var = self.parse_bounded_var(&inner, decl)?;
            inner.insert(var.name().to_string(), var.clone());
            vars.push(var);
        }

        let body = self.eval_type(&inner, body)?;
        debug!(
            vars = %vars.iter().map(TypeVar::name).collect::<Vec<_>>().join(", "),
            "quantifying declared variables"
        );
        Ok(Value::Type(Type::quantify(body, vars)))
    }

    fn eval_typeof(&mut self, scope: &Scope, arg: &Expr) -> Result<Value> {
        let value = self.eval(scope, arg)?;
        Ok(Value::Type(value.type_of()))
    }
}
