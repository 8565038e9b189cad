use crate::{
    ast::Expr,
    error::{Result, TypeParseError},
    namespace::Namespace,
    types::{Type, Value},
};

use super::{Scope, TypeEvaluator};

impl TypeEvaluator<'_> {
    // A name in scope is always its type variable, even when the namespace binds it too.
    pub(super) fn resolve_ident(&self, scope: &Scope, name: &str) -> Result<Value> {
        if let Some(var) = scope.get(name) {
            return Ok(Value::Type(Type::Var(var.clone())));
        }
        self.namespace
            .lookup(name)
            .ok_or_else(|| TypeParseError::UnresolvedName {
                name: name.to_string(),
            })
    }

    // A.B.C: the root through the scope and namespace, every later segment as a module member.
    pub(super) fn resolve_qualified(&self, scope: &Scope, expr: &Expr) -> Result<Value> {
        let path = Self::qualified_path(expr).ok_or_else(|| {
            TypeParseError::MalformedQualifiedType {
                text: expr.to_string(),
            }
        })?;
        let (root, members) = path.split_first().ok_or_else(|| {
            TypeParseError::MalformedQualifiedType {
                text: expr.to_string(),
            }
        })?;

        let mut current = self.resolve_ident(scope, root)?;
        for (depth, member) in members.iter().enumerate() {
            let module = match current {
                Value::Module(module) => module,
                _ => {
                    return Err(TypeParseError::NotAModule {
                        text: path[..=depth].join("."),
                    })
                }
            };
            current = module
                .lookup(member)
                .ok_or_else(|| TypeParseError::UnresolvedName {
                    name: path[..=depth + 1].join("."),
                })?;
        }
        Ok(current)
    }

    fn qualified_path(expr: &Expr) -> Option<Vec<&str>> {
        match expr {
            Expr::Ident(name) => Some(vec![name.as_str()]),
            Expr::Dot(parent, member) => match member.as_ref() {
                Expr::Ident(name) => {
                    let mut path = Self::qualified_path(parent)?;
                    path.push(name.as_str());
                    Some(path)
                }
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{ast::Lit, builtins, namespace::Module, types::TypeVar};

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    fn dot(parent: Expr, member: Expr) -> Expr {
        Expr::Dot(Box::new(parent), Box::new(member))
    }

    fn nested() -> HashMap<String, Value> {
        let c = Module::new("B").with("C", builtins::int32());
        let b = Module::new("A").with("B", c).with("X", Value::Int(3));
        HashMap::from([("A".to_string(), Value::from(b))])
    }

    mod identifiers {
        use super::*;

        #[test]
        fn scope_wins_over_namespace() {
            let ns = HashMap::from([("T".to_string(), Value::Type(builtins::int64()))]);
            let evaluator = TypeEvaluator::new(&ns);
            let var = TypeVar::unbounded("T");
            let scope = Scope::from([("T".to_string(), var.clone())]);
            let actual = evaluator.resolve_ident(&scope, "T").unwrap();
            assert_eq!(actual, Value::Type(Type::Var(var)));
        }

        #[test]
        fn falls_back_to_namespace() {
            let ns = HashMap::from([("T".to_string(), Value::Type(builtins::int64()))]);
            let evaluator = TypeEvaluator::new(&ns);
            let actual = evaluator.resolve_ident(&Scope::new(), "T").unwrap();
            assert_eq!(actual, Value::Type(builtins::int64()));
        }

        #[test]
        fn unknown_name() {
            let ns: HashMap<String, Value> = HashMap::new();
            let evaluator = TypeEvaluator::new(&ns);
            assert!(matches!(
                evaluator.resolve_ident(&Scope::new(), "Nope"),
                Err(TypeParseError::UnresolvedName { name }) if name == "Nope"
            ));
        }
    }

    mod qualified {
        use super::*;

        #[test]
        fn two_levels() {
            let ns = nested();
            let evaluator = TypeEvaluator::new(&ns);
            let expr = dot(dot(ident("A"), ident("B")), ident("C"));
            let actual = evaluator.resolve_qualified(&Scope::new(), &expr).unwrap();
            assert_eq!(actual, Value::Type(builtins::int32()));
        }

        #[test]
        fn missing_member_reports_path() {
            let ns = nested();
            let evaluator = TypeEvaluator::new(&ns);
            let expr = dot(dot(ident("A"), ident("B")), ident("D"));
            assert!(matches!(
                evaluator.resolve_qualified(&Scope::new(), &expr),
                Err(TypeParseError::UnresolvedName { name }) if name == "A.B.D"
            ));
        }

        #[test]
        fn member_of_non_module() {
            let ns = nested();
            let evaluator = TypeEvaluator::new(&ns);
            let expr = dot(dot(ident("A"), ident("X")), ident("Y"));
            assert!(matches!(
                evaluator.resolve_qualified(&Scope::new(), &expr),
                Err(TypeParseError::NotAModule { text }) if text == "A.X"
            ));
        }

        #[test]
        fn non_name_member_is_malformed() {
            let ns = nested();
            let evaluator = TypeEvaluator::new(&ns);
            let expr = dot(ident("A"), Expr::Lit(Lit::Int(1)));
            assert!(matches!(
                evaluator.resolve_qualified(&Scope::new(), &expr),
                Err(TypeParseError::MalformedQualifiedType { text }) if text == "A.1"
            ));
        }

        #[test]
        fn non_name_parent_is_malformed() {
            let ns = nested();
            let evaluator = TypeEvaluator::new(&ns);
            let expr = dot(Expr::Curly(Box::new(ident("A")), vec![]), ident("B"));
            assert!(matches!(
                evaluator.resolve_qualified(&Scope::new(), &expr),
                Err(TypeParseError::MalformedQualifiedType { text }) if text == "A{}.B"
            ));
        }
    }
}
