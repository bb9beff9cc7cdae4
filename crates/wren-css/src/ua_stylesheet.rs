//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! The rules are prepended to the author rules, so any author rule for the
//! same property wins.

use std::sync::OnceLock;

use crate::parser::{CssRule, parse_css};

/// Default CSS rules for the elements Wren knows about.
///
/// Elements not listed here keep the initial `display: inline`.
pub const USER_AGENT_CSS: &str = r"
/* Hidden elements */
head, style, script, meta, link, title { display: none; }

/* Block elements */
html, body, div, p, h1, h2, h3, h4, h5, h6, ul, ol, li, footer, header, section {
    display: block;
}

/* Default spacing for the page */
body {
    padding: 8px;
    margin: 0;
    line-height: 1.2;
}

/* Headings */
h1 { font-size: 32px; font-weight: bold; margin-top: 21px; margin-bottom: 21px; }
h2 { font-size: 24px; font-weight: bold; margin-top: 19px; margin-bottom: 19px; }
h3 { font-size: 18px; font-weight: bold; margin-top: 18px; margin-bottom: 18px; }
h4 { font-size: 16px; font-weight: bold; margin-top: 21px; margin-bottom: 21px; }
h5 { font-size: 13px; font-weight: bold; margin-top: 22px; margin-bottom: 22px; }
h6 { font-size: 10px; font-weight: bold; margin-top: 24px; margin-bottom: 24px; }

/* Paragraph and list spacing */
p { margin-top: 16px; margin-bottom: 16px; }
ul, ol { padding-left: 40px; margin-top: 16px; margin-bottom: 16px; }

/* Inline elements */
span, a, strong, em { display: inline; }
strong { font-weight: bold; }
em { font-style: italic; }
a { color: blue; text-decoration: underline; }
";

/// The parsed user-agent rules, parsed once per process.
pub fn user_agent_rules() -> &'static [CssRule] {
    static RULES: OnceLock<Vec<CssRule>> = OnceLock::new();
    RULES.get_or_init(|| parse_css(USER_AGENT_CSS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_rules_parse() {
        let rules = user_agent_rules();
        assert_eq!(rules[0].selector, "head, style, script, meta, link, title");
        let a = rules.iter().find(|r| r.selector == "a").unwrap();
        assert_eq!(a.declarations.len(), 2);
        assert_eq!(rules.len(), 15);
    }
}
