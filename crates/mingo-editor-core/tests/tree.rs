use mingo_editor_core::{EntryKind, TreeEntry, TreeNode, build_tree};
use serde_json::json;

#[test]
fn test_build_tree_is_order_independent() {
    let forward = build_tree(&[TreeEntry::file("a/b.mg"), TreeEntry::dir("a")]);
    let backward = build_tree(&[TreeEntry::dir("a"), TreeEntry::file("a/b.mg")]);

    assert_eq!(forward, backward);
    assert_eq!(
        serde_json::to_value(&forward).unwrap(),
        json!({ "a": { "b.mg": null } })
    );
}

#[test]
fn test_repeated_entries_are_idempotent() {
    let items = vec![
        TreeEntry::dir("src"),
        TreeEntry::file("src/main.mg"),
        TreeEntry::dir("src"),
        TreeEntry::file("src/main.mg"),
        TreeEntry::dir("empty"),
    ];
    assert_eq!(
        serde_json::to_value(build_tree(&items)).unwrap(),
        json!({ "empty": {}, "src": { "main.mg": null } })
    );
}

#[test]
fn test_empty_and_odd_paths() {
    assert_eq!(build_tree(&[]), TreeNode::default());

    let tree = build_tree(&[TreeEntry::file(""), TreeEntry::file("./x//y.mg")]);
    assert_eq!(
        serde_json::to_value(tree).unwrap(),
        json!({ "x": { "y.mg": null } })
    );
}

#[test]
fn test_entries_decode_from_listing_json() {
    let items: Vec<TreeEntry> = serde_json::from_value(json!([
        { "type": "dir", "path": "examples" },
        { "type": "file", "path": "examples/fib.mg" },
    ]))
    .unwrap();
    assert_eq!(items[0].kind, EntryKind::Dir);

    let tree = build_tree(&items);
    assert_eq!(tree.get("examples/fib.mg"), Some(&TreeNode::File));
}
