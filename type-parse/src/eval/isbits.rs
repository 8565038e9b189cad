use itertools::Itertools;
use tracing::debug;

use crate::{
    ast::Expr,
    error::{Result, TypeParseError},
    layout,
    types::{Constant, Type, Value},
};

use super::{Scope, TypeEvaluator};

impl TypeEvaluator<'_> {
    // Ctor(A1, ..., An) becomes a constant whose bytes are the packed argument tuple.
    // The constructor itself never runs, so only plain-data targets are accepted.
    pub(super) fn construct_isbits(
        &mut self,
        scope: &Scope,
        callee: &Expr,
        args: &[Expr],
    ) -> Result<Value> {
        let target = match self.eval(scope, callee)? {
            Value::Type(Type::DataType(dt)) => dt,
            other => {
                return Err(TypeParseError::UnsupportedConstructorTarget {
                    target: other.to_string(),
                    reason: "not a concrete data type".to_string(),
                })
            }
        };
        let unsupported = |reason: String| TypeParseError::UnsupportedConstructorTarget {
            target: target.to_string(),
            reason,
        };

        let target_layout = layout::layout_of(&target)
            .ok_or_else(|| unsupported("not a fixed-layout type".to_string()))?;

        let values = args
            .iter()
            .map(|arg| self.eval(scope, arg))
            .collect::<Result<Vec<_>>>()?;
        let (args_layout, bytes) = layout::pack(&values).ok_or_else(|| {
            unsupported(format!(
                "arguments ({}) are not all plain data",
                values.iter().format(", ")
            ))
        })?;
        if args_layout.size != target_layout.size {
            return Err(unsupported(format!(
                "arguments pack into {} bytes, the type needs {}",
                args_layout.size, target_layout.size
            )));
        }

        debug!(%target, size = bytes.len(), "constructing constant");
        Ok(layout::normalize(Constant { ty: target, bytes }))
    }
}
