//! Relevance rule table for biological statements.
//!
//! Rules are checked in order; the first match decides how the statement's
//! applies_to edges are populated. A relevance matched by no rule leaves the
//! statement empty and is surfaced downstream as a rule-coverage gap.

/// How a biological statement's applies_to list is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Gene-level annotation (oncogene, tumour suppressor, ...): the single
    /// event is the subject itself, not a precondition.
    GeneRole,
    /// Functional effect of a single variant; applies to the variant's
    /// feature(s).
    Functional,
    /// Curation never reached a conclusion; the row cannot produce a
    /// statement.
    Inconclusive,
    /// Gene fusions; applies to both partner features.
    Fusion,
    /// The events themselves are the subject (test target, mutation hotspot).
    EventList,
    /// Applies to a pathway target named by the context.
    Pathway,
    /// Co-occurring events on one feature.
    Cooperative,
    /// Applies to a phenotype target named by the context.
    AssociatedWith,
}

const GENE_ROLE_PREFIXES: &[&str] = &["", "likely ", "putative "];

fn is_gene_role(relevance: &str, context: &str) -> bool {
    GENE_ROLE_PREFIXES
        .iter()
        .any(|p| relevance == format!("{p}oncogene") || relevance == format!("{p}tumour suppressor"))
        || relevance == "haploinsufficient"
        || relevance == "cancer associated gene"
        || (relevance == "associated-with" && context == "cancer associated gene")
}

fn is_functional(relevance: &str) -> bool {
    relevance.contains("function")
        || relevance.contains("dominant")
        || relevance == "likely oncogenic"
        || relevance == "oncogenic"
}

/// Pick the rule for a biological statement's relevance, in table order.
pub fn match_biological(relevance: &str, context: &str) -> Option<RuleAction> {
    if is_gene_role(relevance, context) {
        Some(RuleAction::GeneRole)
    } else if is_functional(relevance) {
        Some(RuleAction::Functional)
    } else if matches!(relevance, "not determined" | "not specified" | "inconclusive") {
        Some(RuleAction::Inconclusive)
    } else if relevance.contains("fusion") {
        Some(RuleAction::Fusion)
    } else if matches!(relevance, "recurrent" | "test target" | "mutation hotspot") {
        Some(RuleAction::EventList)
    } else if relevance.contains("pathway") {
        Some(RuleAction::Pathway)
    } else if relevance == "cooperative-events" {
        Some(RuleAction::Cooperative)
    } else if relevance == "associated-with" {
        Some(RuleAction::AssociatedWith)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_role_prefixes() {
        for relevance in [
            "oncogene",
            "likely oncogene",
            "putative oncogene",
            "tumour suppressor",
            "putative tumour suppressor",
            "haploinsufficient",
            "cancer associated gene",
        ] {
            assert_eq!(match_biological(relevance, "any"), Some(RuleAction::GeneRole));
        }
    }

    #[test]
    fn test_associated_with_depends_on_context() {
        assert_eq!(
            match_biological("associated-with", "cancer associated gene"),
            Some(RuleAction::GeneRole)
        );
        assert_eq!(
            match_biological("associated-with", "chromothripsis"),
            Some(RuleAction::AssociatedWith)
        );
    }

    #[test]
    fn test_rule_order_gene_role_beats_functional() {
        // "oncogene" would also substring-match nothing functional, but
        // "oncogenic" must land in the functional rule.
        assert_eq!(match_biological("oncogenic", "x"), Some(RuleAction::Functional));
        assert_eq!(match_biological("likely oncogenic", "x"), Some(RuleAction::Functional));
        assert_eq!(
            match_biological("gain of function", "x"),
            Some(RuleAction::Functional)
        );
        assert_eq!(match_biological("dominant negative", "x"), Some(RuleAction::Functional));
    }

    #[test]
    fn test_remaining_rules() {
        assert_eq!(match_biological("inconclusive", "x"), Some(RuleAction::Inconclusive));
        assert_eq!(match_biological("oncogenic fusion", "x"), Some(RuleAction::Fusion));
        assert_eq!(match_biological("mutation hotspot", "x"), Some(RuleAction::EventList));
        assert_eq!(match_biological("activates pathway", "x"), Some(RuleAction::Pathway));
        assert_eq!(
            match_biological("cooperative-events", "x"),
            Some(RuleAction::Cooperative)
        );
        assert_eq!(match_biological("tumourigenesis", "x"), None);
    }
}
