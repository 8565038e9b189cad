use crate::{
    ast::{Expr, Rel},
    builtins,
    error::{Result, TypeParseError},
    types::{Type, TypeVar},
};

use super::{Scope, TypeEvaluator};

impl TypeEvaluator<'_> {
    // One `where` declaration. Bounds see `scope`, never the variable being declared.
    //
    //   T               Union{} <: T <: Any
    //   T <: U          Union{} <: T <: U
    //   T >: L          L <: T <: Any
    //   L <: T <: U     L <: T <: U
    //   U >: T >: L     L <: T <: U
    pub(super) fn parse_bounded_var(&mut self, scope: &Scope, decl: &Expr) -> Result<TypeVar> {
        let malformed = || TypeParseError::MalformedBound {
            text: decl.to_string(),
        };

        match decl {
            Expr::Ident(name) => Ok(TypeVar::unbounded(name.as_str())),
            Expr::Compare(first, rest) => match (first.as_ref(), rest.as_slice()) {
                (Expr::Ident(name), [(Rel::Sub, upper)]) => {
                    let upper = self.eval_type(scope, upper)?;
                    Ok(TypeVar::new(name.as_str(), Type::Bottom, upper))
                }
                (Expr::Ident(name), [(Rel::Super, lower)]) => {
                    let lower = self.eval_type(scope, lower)?;
                    Ok(TypeVar::new(name.as_str(), lower, builtins::any()))
                }
                (lower, [(Rel::Sub, Expr::Ident(name)), (Rel::Sub, upper)]) => {
                    self.two_sided(scope, name, lower, upper)
                }
                (upper, [(Rel::Super, Expr::Ident(name)), (Rel::Super, lower)]) => {
                    self.two_sided(scope, name, lower, upper)
                }
                _ => Err(malformed()),
            },
            _ => Err(malformed()),
        }
    }

    fn two_sided(
        &mut self,
        scope: &Scope,
        name: &str,
        lower: &Expr,
        upper: &Expr,
    ) -> Result<TypeVar> {
        let lower = self.eval_type(scope, lower)?;
        let upper = self.eval_type(scope, upper)?;
        Ok(TypeVar::new(name, lower, upper))
    }
}
