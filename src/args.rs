use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Flag,
    Value(String),
}

/// Parsed command line: named options keyed by the spelling they were
/// recorded under, plus positionals in order.
#[derive(Debug, Clone, Default)]
pub struct ArgBag {
    named: BTreeMap<String, ArgValue>,
    positionals: Vec<String>,
}

impl ArgBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.named.insert(name.into(), ArgValue::Flag);
        self
    }

    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), ArgValue::Value(value.into()));
        self
    }

    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.positionals.push(value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.named.get(name)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn is_passed(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.get(alias).is_some())
    }

    /// First non-empty value across `aliases`, in alias order.
    pub fn first_value(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| match self.named.get(*alias) {
            Some(ArgValue::Value(v)) if !v.is_empty() => Some(v.as_str()),
            _ => None,
        })
    }

    /// True when any alias was passed as a bare flag or with a truthy value.
    pub fn any_set(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| match self.named.get(*alias) {
            Some(ArgValue::Flag) => true,
            Some(ArgValue::Value(v)) => !matches!(v.as_str(), "" | "false" | "0"),
            None => false,
        })
    }

    /// True when the first truthy alias was passed without a value.
    pub fn first_is_bare(&self, aliases: &[&str]) -> bool {
        aliases
            .iter()
            .filter_map(|alias| self.named.get(*alias))
            .find(|v| !matches!(v, ArgValue::Value(s) if s.is_empty()))
            .is_some_and(|v| *v == ArgValue::Flag)
    }
}
