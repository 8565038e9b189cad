use lalrpop_util::lalrpop_mod;
use tracing::debug;

pub mod apply;
pub mod ast;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod layout;
pub mod namespace;
pub mod types;

lalrpop_mod!(
    #[allow(clippy::all)]
    pub parser
);

use crate::{
    ast::Expr,
    error::{Result, TypeParseError},
    eval::{Scope, TypeEvaluator},
    namespace::Namespace,
    types::{Type, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expect {
    Type, // anything else is `NotAType`
    #[default]
    Any,
}

pub fn parse_expr(source: &str) -> Result<Expr> {
    parser::ExprParser::new()
        .parse(source)
        .map_err(|e| TypeParseError::Syntax {
            message: e.to_string(),
        })
}

pub fn parse(expect: Expect, source: &str, namespace: &dyn Namespace) -> Result<Value> {
    let expr = parse_expr(source)?;
    debug!(%expr, ?expect, "parsed type expression");

    let mut evaluator = TypeEvaluator::new(namespace);
    let scope = Scope::new();
    match expect {
        Expect::Type => evaluator.eval_type(&scope, &expr).map(Value::Type),
        Expect::Any => evaluator.eval(&scope, &expr),
    }
}

pub fn parse_type(source: &str, namespace: &dyn Namespace) -> Result<Type> {
    let expr = parse_expr(source)?;
    TypeEvaluator::new(namespace).eval_type(&Scope::new(), &expr)
}
