//! Customer matching against the registry.
//!
//! Names are compared by their normalized keys: first by exact key, then by
//! containment in either direction (abbreviations, legal suffixes). Registry
//! order decides ties.
//!
//! Containment can link short names too eagerly: a registry key like `co` is
//! contained in many candidates. This is kept as-is so existing links do not
//! change.

use std::collections::HashMap;

use tracing::debug;

use crate::cost::rules::normalize_name;
use crate::models::cost_item::ParsedCostItem;
use crate::models::customer::Customer;

/// Normalized, read-only view of a customer registry.
#[derive(Debug, Clone, Default)]
pub struct CustomerMatcher {
    /// `(normalized name, id)` in registry order.
    entries: Vec<(String, String)>,
    /// Normalized name to the first registered id.
    exact: HashMap<String, String>,
}

impl CustomerMatcher {
    /// Build a matcher from registry entries.
    ///
    /// Entries without a usable name are skipped.
    pub fn new(customers: &[Customer]) -> Self {
        let mut entries = Vec::with_capacity(customers.len());
        let mut exact = HashMap::with_capacity(customers.len());

        for customer in customers {
            let Some(name) = customer.name.as_deref() else {
                continue;
            };
            let key = normalize_name(name);
            if key.is_empty() {
                continue;
            }
            exact.entry(key.clone()).or_insert_with(|| customer.id.clone());
            entries.push((key, customer.id.clone()));
        }

        debug!(
            "Customer matcher indexed {} of {} registry entries",
            entries.len(),
            customers.len()
        );

        Self { entries, exact }
    }

    /// Number of usable registry entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a candidate name to a registry id.
    pub fn match_name(&self, candidate: &str) -> Option<&str> {
        let key = normalize_name(candidate);
        if key.is_empty() {
            return None;
        }

        if let Some(id) = self.exact.get(&key) {
            return Some(id.as_str());
        }

        self.entries
            .iter()
            .find(|(name, _)| name.contains(key.as_str()) || key.contains(name.as_str()))
            .map(|(_, id)| id.as_str())
    }

    /// Resolve the record's best available name.
    pub fn match_item(&self, item: &ParsedCostItem) -> Option<String> {
        item.match_candidate()
            .and_then(|name| self.match_name(name))
            .map(str::to_string)
    }

    /// Attach the match result to a record.
    pub fn apply(&self, item: ParsedCostItem) -> ParsedCostItem {
        let id = self.match_item(&item);
        item.with_match(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cost_item::CostStyle;

    fn registry() -> Vec<Customer> {
        vec![
            Customer::new("1", "John Deere"),
            Customer::new("2", "John Deere Co"),
            Customer::unnamed("3"),
            Customer::new("4", ""),
            Customer::new("5", "Prairie Farms LLC"),
            Customer::new("6", "PRAIRIE FARMS, LLC"),
        ]
    }

    #[test]
    fn test_exact_match_beats_containment() {
        let matcher = CustomerMatcher::new(&registry());
        assert_eq!(matcher.match_name("John Deere Co."), Some("2"));
    }

    #[test]
    fn test_first_registered_wins_on_duplicate_keys() {
        let matcher = CustomerMatcher::new(&registry());
        assert_eq!(matcher.match_name("prairie farms llc"), Some("5"));
    }

    #[test]
    fn test_containment_both_directions() {
        let matcher = CustomerMatcher::new(&registry());
        // Registry key inside the candidate.
        assert_eq!(matcher.match_name("John Deere Financial"), Some("1"));
        // Candidate inside the registry key.
        assert_eq!(matcher.match_name("Prairie Farms"), Some("5"));
    }

    #[test]
    fn test_unmatched() {
        let matcher = CustomerMatcher::new(&registry());
        assert_eq!(matcher.match_name("Hill Ranch"), None);
        assert_eq!(matcher.match_name(""), None);
        assert_eq!(matcher.match_name("  --  "), None);
    }

    #[test]
    fn test_unnamed_entries_ignored() {
        let matcher = CustomerMatcher::new(&registry());
        assert_eq!(matcher.len(), 4);

        let only_blank = CustomerMatcher::new(&[Customer::unnamed("9"), Customer::new("8", "!!")]);
        assert!(only_blank.is_empty());
        assert_eq!(only_blank.match_name("Anything"), None);
    }

    #[test]
    fn test_short_name_containment_is_permissive() {
        let matcher =
            CustomerMatcher::new(&[Customer::new("co", "Co"), Customer::new("x", "Acme Co")]);
        assert_eq!(matcher.match_name("Acme Corp"), Some("co"));
    }

    #[test]
    fn test_apply_uses_fallback_names() {
        let matcher = CustomerMatcher::new(&registry());

        let mut item = ParsedCostItem::new(CostStyle::Old, "block");
        item.legal_name = Some("Prairie Farms LLC".to_string());
        let item = matcher.apply(item);
        assert_eq!(item.matched_customer_id.as_deref(), Some("5"));

        let item = matcher.apply(ParsedCostItem::new(CostStyle::New, "page"));
        assert_eq!(item.matched_customer_id, None);
    }
}
