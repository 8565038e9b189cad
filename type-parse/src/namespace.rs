use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use crate::{builtins, types::Value};

pub trait Namespace {
    fn lookup(&self, name: &str) -> Option<Value>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    name: String,
    bindings: BTreeMap<String, Value>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: BTreeMap::new(),
        }
    }

    pub fn prelude() -> Self {
        builtins::main_module()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }
}

impl Namespace for Module {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }
}

impl Namespace for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl From<Module> for Value {
    fn from(module: Module) -> Self {
        Value::Module(Arc::new(module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_binding_replaces_earlier() {
        let module = Module::new("M")
            .with("x", Value::Int(1))
            .with("x", Value::Int(2));
        assert_eq!(module.lookup("x"), Some(Value::Int(2)));
        assert_eq!(module.lookup("y"), None);
    }

    #[test]
    fn nested_module_binding() {
        let inner = Module::new("Inner").with("y", Value::Bool(true));
        let outer = Module::new("Outer").with("Inner", inner);
        let Some(Value::Module(found)) = outer.lookup("Inner") else {
            panic!("Inner is not a module");
        };
        assert_eq!(found.name(), "Inner");
        assert_eq!(found.lookup("y"), Some(Value::Bool(true)));
    }

    #[test]
    fn hash_map_namespace() {
        let ns = HashMap::from([("T".to_string(), Value::Symbol("t".to_string()))]);
        assert_eq!(ns.lookup("T"), Some(Value::Symbol("t".to_string())));
    }
}
