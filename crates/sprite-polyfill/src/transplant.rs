//! Symbol transplanting
//!
//! Copies a symbol's `viewBox` and a deep clone of its children onto a
//! display surface, replacing whatever the surface showed before.

use sprite_dom::DisplaySurface;

use crate::SpriteDocument;

/// Attribute carrying the symbol's sizing/viewport
const VIEW_BOX: &str = "viewBox";

/// Render `symbol_id` from `document` into `target`
///
/// Returns false, leaving `target` untouched, when the symbol does not
/// exist. Direct text children of the symbol are skipped.
pub fn insert_symbol<S>(document: &SpriteDocument, target: &mut S, symbol_id: &str) -> bool
where
    S: DisplaySurface + ?Sized,
{
    let Some(symbol) = document.symbol(symbol_id) else {
        tracing::debug!("Symbol {:?} not found in {}", symbol_id, document.url());
        return false;
    };
    let tree = document.tree();

    if let Some(view_box) = tree.get_attribute(symbol, VIEW_BOX) {
        target.set_attribute(VIEW_BOX, view_box);
    }

    target.clear_children();

    for (child, node) in tree.children(symbol) {
        if node.is_text() {
            continue;
        }
        target.append_clone(tree, child);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_dom::{DomTree, NodeId, NodeSurface};
    use sprite_html::inner_markup;

    const SPRITE: &str = r#"<svg>
        <symbol id="close" viewBox="0 0 24 24"><path d="M1 1L23 23"/><path d="M23 1L1 23"/></symbol>
        <symbol id="menu" viewBox="0 0 32 32"><g fill="red"><rect x="0" y="0" width="32" height="4"/></g></symbol>
        <symbol id="bare"><circle r="4"/></symbol>
        <symbol id="texty">loose text<path d="M0 0"/></symbol>
    </svg>"#;

    fn sprite() -> SpriteDocument {
        SpriteDocument::parse(SPRITE, "https://example.com/icons.svg")
    }

    fn target() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let svg = tree.create_element("svg");
        tree.append_child(tree.root(), svg).unwrap();
        (tree, svg)
    }

    #[test]
    fn test_insert_copies_children_and_view_box() {
        let sprite = sprite();
        let (mut tree, svg) = target();

        assert!(insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "close"));

        let symbol = sprite.symbol("close").unwrap();
        assert_eq!(inner_markup(&tree, svg), inner_markup(sprite.tree(), symbol));
        assert_eq!(tree.get_attribute(svg, "viewBox"), Some("0 0 24 24"));
        assert_eq!(tree.child_ids(svg).len(), 2);
    }

    #[test]
    fn test_missing_symbol_leaves_target() {
        let sprite = sprite();
        let (mut tree, svg) = target();
        let existing = tree.create_element("path");
        tree.append_child(svg, existing).unwrap();

        assert!(!insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "nope"));
        assert!(!insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), ""));
        assert_eq!(tree.child_ids(svg), vec![existing]);
    }

    #[test]
    fn test_switching_symbols_replaces_content() {
        let sprite = sprite();
        let (mut tree, svg) = target();

        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "close");
        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "menu");

        let menu = sprite.symbol("menu").unwrap();
        assert_eq!(inner_markup(&tree, svg), inner_markup(sprite.tree(), menu));
        assert_eq!(tree.get_attribute(svg, "viewBox"), Some("0 0 32 32"));
    }

    #[test]
    fn test_repeated_insert_is_idempotent() {
        let sprite = sprite();
        let (mut tree, svg) = target();

        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "menu");
        let first = inner_markup(&tree, svg);
        let live = tree.len();

        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "menu");
        assert_eq!(inner_markup(&tree, svg), first);
        assert_eq!(tree.len(), live);
    }

    #[test]
    fn test_symbol_without_view_box_keeps_target_value() {
        let sprite = sprite();
        let (mut tree, svg) = target();
        tree.set_attribute(svg, "viewBox", "0 0 8 8").unwrap();

        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "bare");
        assert_eq!(tree.get_attribute(svg, "viewBox"), Some("0 0 8 8"));
        assert_eq!(tree.child_ids(svg).len(), 1);
    }

    #[test]
    fn test_text_children_skipped() {
        let sprite = sprite();
        let (mut tree, svg) = target();

        insert_symbol(&sprite, &mut NodeSurface::new(&mut tree, svg), "texty");

        let children = tree.child_ids(svg);
        assert_eq!(children.len(), 1);
        assert_eq!(tree.tag_name(children[0]), Some("path"));
    }
}
