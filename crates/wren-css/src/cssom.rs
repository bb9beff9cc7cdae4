//! The CSS object model: an ordered rule list plus selector matching.

use wren_dom::{DomTree, NodeId};

use crate::parser::{CssRule, parse_css};
use crate::selector::Selector;
use crate::ua_stylesheet::user_agent_rules;

/// Ordered list of style rules.
///
/// Rule order is source order; there is no specificity, so the cascade
/// simply applies matching rules front to back.
#[derive(Debug, Clone, Default)]
pub struct Cssom {
    rules: Vec<CssRule>,
    /// Pre-split selector groups, parallel to `rules`.
    selectors: Vec<Vec<Selector>>,
}

impl Cssom {
    /// An empty CSSOM.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: Vec::new(),
            selectors: Vec::new(),
        }
    }

    /// Parse a stylesheet into a CSSOM.
    #[must_use]
    pub fn from_css(css: &str) -> Self {
        let mut cssom = Self::new();
        cssom.extend(parse_css(css));
        cssom
    }

    /// The user-agent rules followed by the author stylesheet.
    #[must_use]
    pub fn with_user_agent(author_css: &str) -> Self {
        let mut cssom = Self::new();
        cssom.extend(user_agent_rules().iter().cloned());
        cssom.extend(parse_css(author_css));
        cssom
    }

    /// Append one rule.
    pub fn add_rule(&mut self, rule: CssRule) {
        self.selectors.push(Selector::parse_group(&rule.selector));
        self.rules.push(rule);
    }

    /// Append rules in order.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = CssRule>) {
        for rule in rules {
            self.add_rule(rule);
        }
    }

    /// All rules, in order.
    #[must_use]
    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Rules whose selector matches `node`, in rule order.
    ///
    /// A rule is listed once per matching member of its selector group, so
    /// `p, p { ... }` applies twice.
    #[must_use]
    pub fn matching_rules(&self, tree: &DomTree, node: NodeId) -> Vec<&CssRule> {
        self.rules
            .iter()
            .zip(&self.selectors)
            .flat_map(|(rule, group)| {
                group
                    .iter()
                    .filter(move |selector| selector.matches(tree, node))
                    .map(move |_| rule)
            })
            .collect()
    }
}
