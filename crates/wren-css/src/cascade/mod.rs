//! CSS Cascading and Style Computation
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! A deliberately small cascade: no origins, no importance and no
//! specificity. Declarations apply in the order the CSSOM lists them, so the
//! last write wins.

use std::collections::VecDeque;

use wren_dom::DomTree;

use crate::cssom::Cssom;
use crate::parser::parse_inline_style;
use crate::style::{StyleMap, apply_declaration};

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// Resolve the style of every node, in place.
///
/// STEP 1: Visit nodes breadth-first from the root, so a parent is always
/// resolved before its children.
///
/// STEP 2: [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
/// Every node but the root copies the inherited properties from its parent.
///
/// STEP 3: Apply the declarations of every matching rule in rule order.
///
/// STEP 4: Apply the `style` attribute last.
pub fn apply_style(tree: &DomTree, cssom: &Cssom, styles: &mut StyleMap) {
    styles.ensure_len(tree.len());
    let Some(root) = tree.root() else {
        return;
    };

    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        let mut style = styles.style_of(id);

        // STEP 2
        if id != root
            && let Some(parent) = tree.parent(id)
            && let Some(parent_style) = styles.get(parent)
        {
            style.inherit_from(parent_style);
        }

        // STEP 3
        for rule in cssom.matching_rules(tree, id) {
            for declaration in &rule.declarations {
                apply_declaration(&mut style, &declaration.property, &declaration.value);
            }
        }

        // STEP 4
        if let Some(inline) = tree.get_attribute(id, "style") {
            for declaration in parse_inline_style(inline) {
                apply_declaration(&mut style, &declaration.property, &declaration.value);
            }
        }

        if let Some(slot) = styles.get_mut(id) {
            *slot = style;
        }
        queue.extend(tree.children(id).iter().copied());
    }
}

/// Allocate a [`StyleMap`] for `tree` and resolve it.
#[must_use]
pub fn compute_styles(tree: &DomTree, cssom: &Cssom) -> StyleMap {
    let mut styles = StyleMap::new(tree.len());
    apply_style(tree, cssom, &mut styles);
    styles
}

