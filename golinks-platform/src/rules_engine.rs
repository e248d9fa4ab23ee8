//! Dynamic redirect-rule engine
//!
//! Mirrors the host's declarative rule API: rules are installed and
//! removed as a set, and the platform (here, [`InstalledRules`]) applies
//! them to request URLs. Patterns are validated at install time, so a
//! malformed rule is rejected rather than silently installed broken.

use async_trait::async_trait;
use golinks_core::{GoLinksError, RedirectRule, Result};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Trait for the dynamic-rule contract.
///
/// Callers follow a remove-then-add discipline: list the installed rule
/// ids, remove them, then add the desired set. Both steps are idempotent
/// with respect to missing ids.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// Currently installed dynamic rules.
    async fn dynamic_rules(&self) -> Result<Vec<RedirectRule>>;

    /// Remove rules by id, then install the given rules.
    ///
    /// Removing an id that is not installed is not an error. Installing
    /// a rule whose regex filter does not compile, or whose id is
    /// already taken after the removals, is.
    async fn update_dynamic_rules(
        &self,
        remove_ids: Vec<u32>,
        add_rules: Vec<RedirectRule>,
    ) -> Result<()>;
}

struct CompiledRule {
    rule: RedirectRule,
    pattern: Regex,
}

/// In-process rule engine.
///
/// Stands in for the platform-managed rule set and can evaluate request
/// URLs against it, so redirect behavior is observable end to end in
/// tests and in the CLI's `resolve` command.
pub struct InstalledRules {
    rules: RwLock<Vec<CompiledRule>>,
}

impl InstalledRules {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
        }
    }

    /// Apply the installed rules to a request URL.
    ///
    /// Returns the redirect destination chosen by the highest-priority
    /// matching rule, or `None` when the request passes through
    /// unmodified.
    pub async fn evaluate(&self, request_url: &str) -> Option<String> {
        let rules = self.rules.read().await;

        let mut candidates: Vec<&CompiledRule> = rules.iter().collect();
        candidates.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));

        for candidate in candidates {
            if let Some(caps) = candidate.pattern.captures(request_url) {
                let destination = substitute(&candidate.rule.regex_substitution, &caps);
                debug!(
                    rule_id = candidate.rule.id,
                    request_url,
                    destination = %destination,
                    "redirect rule matched"
                );
                return Some(destination);
            }
        }

        None
    }
}

impl Default for InstalledRules {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleEngine for InstalledRules {
    async fn dynamic_rules(&self) -> Result<Vec<RedirectRule>> {
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .map(|c| c.rule.clone())
            .collect())
    }

    async fn update_dynamic_rules(
        &self,
        remove_ids: Vec<u32>,
        add_rules: Vec<RedirectRule>,
    ) -> Result<()> {
        // Compile before touching installed state so a bad pattern
        // leaves the previous removals as the final outcome.
        let mut compiled = Vec::with_capacity(add_rules.len());
        for rule in add_rules {
            // Filters match case-insensitively, like the host rule API:
            // `HTTP://go/x` redirects the same as `http://go/x`.
            let pattern = RegexBuilder::new(&rule.regex_filter)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    GoLinksError::Rule(format!(
                        "invalid regex filter {:?}: {}",
                        rule.regex_filter, e
                    ))
                })?;
            compiled.push(CompiledRule { rule, pattern });
        }

        let mut rules = self.rules.write().await;
        rules.retain(|c| !remove_ids.contains(&c.rule.id));

        for candidate in compiled {
            if rules.iter().any(|c| c.rule.id == candidate.rule.id) {
                return Err(GoLinksError::Rule(format!(
                    "rule id {} is already installed",
                    candidate.rule.id
                )));
            }
            info!(
                rule_id = candidate.rule.id,
                filter = %candidate.rule.regex_filter,
                substitution = %candidate.rule.regex_substitution,
                "dynamic rule installed"
            );
            rules.push(candidate);
        }

        Ok(())
    }
}

/// Expand a regex substitution template against captured groups.
///
/// Supports `\0` through `\9`, matching the substitution syntax of the
/// declarative rule format. Unmatched groups expand to nothing.
fn substitute(template: &str, caps: &regex::Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(d) = chars.peek().and_then(|p| p.to_digit(10)) {
                chars.next();
                if let Some(m) = caps.get(d as usize) {
                    out.push_str(m.as_str());
                }
                continue;
            }
        }
        out.push(c);
    }

    out
}
