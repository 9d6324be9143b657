use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summary of one dispatch run over a create operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Entities inspected, in batch order.
    pub entities: u64,
    /// Values generated and written back.
    pub generated: u64,
    /// Generator invocations that declined via the skip sentinel.
    pub skipped: u64,
    /// Tagged fields whose tag had no registered generator.
    pub unregistered: u64,
    /// Generator invocations that failed.
    pub failed: u64,
    /// Setter failures absorbed by the best-effort write policy.
    pub set_failures: u64,
    /// Values generated per tag.
    pub usage_by_tag: BTreeMap<String, u64>,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_entity(&mut self) {
        self.entities += 1;
    }

    pub fn record_generated(&mut self, tag: &str) {
        self.generated += 1;
        *self.usage_by_tag.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_unregistered(&mut self) {
        self.unregistered += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record_set_failure(&mut self) {
        self.set_failures += 1;
    }

    /// Whether any reportable failure was recorded.
    pub fn has_failures(&self) -> bool {
        self.unregistered > 0 || self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_usage_per_tag() {
        let mut report = DispatchReport::new();
        report.record_entity();
        report.record_generated("snowflake");
        report.record_generated("snowflake");
        report.record_generated("display_id");
        report.record_skip();

        assert_eq!(report.generated, 3);
        assert_eq!(report.usage_by_tag.get("snowflake"), Some(&2));
        assert_eq!(report.usage_by_tag.get("display_id"), Some(&1));
        assert!(!report.has_failures());
    }

    #[test]
    fn serializes_deterministically() {
        let mut report = DispatchReport::new();
        report.record_entity();
        report.record_generated("snowflake");

        let json = serde_json::to_string_pretty(&report).expect("serialize report");
        let expected = r#"{
  "entities": 1,
  "generated": 1,
  "skipped": 0,
  "unregistered": 0,
  "failed": 0,
  "set_failures": 0,
  "usage_by_tag": {
    "snowflake": 1
  }
}"#;
        assert_eq!(json, expected);
    }
}
