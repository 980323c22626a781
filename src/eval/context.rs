use std::collections::{BTreeMap, BTreeSet};

/// Answers and pruning state of one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationContext {
    values: BTreeMap<String, bool>,
    blacklist: BTreeSet<String>,
    whitelist: BTreeSet<String>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, code: impl Into<String>, value: bool) {
        self.values.insert(code.into(), value);
    }

    pub fn value(&self, code: &str) -> Option<bool> {
        self.values.get(code).copied()
    }

    pub fn is_blacklisted(&self, code: &str) -> bool {
        self.blacklist.contains(code)
    }

    pub fn is_whitelisted(&self, code: &str) -> bool {
        self.whitelist.contains(code)
    }

    pub fn blacklist(&self) -> &BTreeSet<String> {
        &self.blacklist
    }

    pub fn whitelist(&self) -> &BTreeSet<String> {
        &self.whitelist
    }

    /// Blacklists `code` unless it is whitelisted.
    pub(crate) fn prune(&mut self, code: &str) {
        if !self.whitelist.contains(code) {
            self.blacklist.insert(code.to_string());
        }
    }

    /// Removes `code` from the blacklist for the rest of the run.
    pub(crate) fn keep(&mut self, code: &str) {
        self.blacklist.remove(code);
        self.whitelist.insert(code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelisted_code_is_never_pruned() {
        let mut context = EvaluationContext::new();
        context.prune("A1");
        assert!(context.is_blacklisted("A1"));
        context.keep("A1");
        assert!(!context.is_blacklisted("A1"));
        context.prune("A1");
        assert!(!context.is_blacklisted("A1"));
        assert!(context.is_whitelisted("A1"));
    }
}
