//! Redirect rule model and the pure Configuration → rules projection
//!
//! The redirect rule is a derived, disposable projection of
//! [`Configuration`]: it carries no identity beyond a fixed id and is
//! recomputed in full whenever the Configuration changes. The wire shape
//! mirrors a declarative dynamic redirect rule (JSON, camelCase keys).

use serde::{Deserialize, Serialize};

use crate::settings::Configuration;

/// Fixed identifier of the single go-link redirect rule.
pub const REDIRECT_RULE_ID: u32 = 1;

/// Fixed priority of the single go-link redirect rule.
pub const REDIRECT_RULE_PRIORITY: u32 = 1;

/// Regex filter matching go-link navigations: `scheme://go/<rest>`.
pub const GO_LINK_FILTER: &str = r"^https?://go/(.*)$";

/// Request resource types a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
}

impl ResourceType {
    /// Wire name of the resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::MainFrame => "main_frame",
            ResourceType::SubFrame => "sub_frame",
        }
    }
}

/// A declarative redirect rule: regex filter plus regex substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    pub id: u32,
    pub priority: u32,
    /// Regex matched against the full request URL.
    pub regex_filter: String,
    /// Substitution template; `\1` refers to the first capture group.
    pub regex_substitution: String,
    pub resource_types: Vec<ResourceType>,
}

impl RedirectRule {
    /// Build the go-link redirect rule for a configured base URL.
    ///
    /// Rewrites `scheme://go/<rest>` to `<base_url><rest>` for top-level
    /// and nested frame navigations.
    pub fn go_link(base_url: &str) -> Self {
        Self {
            id: REDIRECT_RULE_ID,
            priority: REDIRECT_RULE_PRIORITY,
            regex_filter: GO_LINK_FILTER.to_string(),
            regex_substitution: format!("{}\\1", base_url),
            resource_types: vec![ResourceType::MainFrame, ResourceType::SubFrame],
        }
    }
}

/// Compute the desired rule set for a Configuration.
///
/// Empty when unconfigured, exactly one rule otherwise. This is the pure
/// half of reconciliation; installing the result is the rule manager's
/// job.
pub fn desired_rules(config: &Configuration) -> Vec<RedirectRule> {
    match config.effective_base_url() {
        Some(base_url) => vec![RedirectRule::go_link(base_url)],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_rules_unconfigured() {
        assert!(desired_rules(&Configuration::default()).is_empty());
        assert!(desired_rules(&Configuration::new(Some("  ".to_string()))).is_empty());
    }

    #[test]
    fn test_desired_rules_configured() {
        let config = Configuration::new(Some("https://goto.example.com/".to_string()));
        let rules = desired_rules(&config);

        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.id, REDIRECT_RULE_ID);
        assert_eq!(rule.priority, REDIRECT_RULE_PRIORITY);
        assert_eq!(rule.regex_filter, r"^https?://go/(.*)$");
        assert_eq!(rule.regex_substitution, "https://goto.example.com/\\1");
        assert_eq!(
            rule.resource_types,
            vec![ResourceType::MainFrame, ResourceType::SubFrame]
        );
    }

    #[test]
    fn test_rule_wire_shape() {
        let rule = RedirectRule::go_link("https://goto.example.com/");
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["priority"], 1);
        assert_eq!(json["regexFilter"], r"^https?://go/(.*)$");
        assert_eq!(json["regexSubstitution"], "https://goto.example.com/\\1");
        assert_eq!(json["resourceTypes"][0], "main_frame");
        assert_eq!(json["resourceTypes"][1], "sub_frame");
    }

    #[test]
    fn test_rule_round_trip() {
        let rule = RedirectRule::go_link("https://goto.example.com/");
        let json = serde_json::to_string(&rule).unwrap();
        let parsed: RedirectRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }
}
