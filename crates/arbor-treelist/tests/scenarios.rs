//! End-to-end scenarios exercising the tree-list model the way a widget
//! front end would drive it.

use arbor_treelist::{
    CheckState, ColumnAlignment, Error, ItemId, StyleFlags, TreeListModel,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("trace").try_init();
}

fn file_tree(style: StyleFlags) -> TreeListModel {
    init_tracing();
    let mut tree = TreeListModel::with_style(style);
    tree.create_column("Name", 160, ColumnAlignment::Left);
    tree.create_column("Size", 80, ColumnAlignment::Right);
    tree
}

#[test]
fn structure_stays_a_forest() {
    let mut tree = file_tree(StyleFlags::default());
    let root = tree.root();

    let a = tree.append(root, "A").unwrap();
    let b = tree.append(a, "B").unwrap();
    let c = tree.append(b, "C").unwrap();

    // Every item has exactly one parent and walking up always reaches the
    // root without revisiting a node.
    let mut seen = Vec::new();
    let mut cur = Some(c);
    while let Some(id) = cur {
        assert!(!seen.contains(&id), "cycle through {:?}", id);
        seen.push(id);
        cur = tree.parent_of(id);
    }
    assert_eq!(seen.last(), Some(&root));
}

#[test]
fn deleting_a_branch_removes_every_descendant() {
    let mut tree = file_tree(StyleFlags::default().with_multiple());
    let root = tree.root();

    let trunk = tree.append(root, "trunk").unwrap();
    let mut leaves = Vec::new();
    for i in 0..10 {
        let branch = tree.append(trunk, &format!("branch {i}")).unwrap();
        for j in 0..10 {
            leaves.push(tree.append(branch, &format!("leaf {i}.{j}")).unwrap());
        }
    }
    let keeper = tree.append(root, "keeper").unwrap();
    tree.select(leaves[0]);
    tree.select(keeper);

    assert!(tree.delete(trunk));
    assert_eq!(tree.item_count(), 1);
    for leaf in &leaves {
        assert!(!tree.contains(*leaf));
        assert_eq!(tree.text(*leaf, 0), "");
    }
    assert_eq!(tree.selections(), &[keeper]);

    // New items never reuse a dead handle.
    let fresh = tree.append(root, "fresh").unwrap();
    assert_ne!(fresh, trunk);
    assert!(!leaves.contains(&fresh));
}

#[test]
fn malformed_insertions_are_rejected_loudly() {
    let mut tree = file_tree(StyleFlags::default());
    let root = tree.root();

    let a = tree.append(root, "A").unwrap();
    let inner = tree.append(a, "inner").unwrap();
    tree.delete(a);

    assert!(matches!(
        tree.append(a, "x"),
        Err(Error::UnknownParent { .. })
    ));
    assert!(matches!(
        tree.insert(root, Some(inner), "x"),
        Err(Error::NotASibling { .. })
    ));
    // A handle forged from raw 0 never names a live item.
    assert!(matches!(
        tree.append(ItemId::from_raw(0), "x"),
        Err(Error::UnknownParent { .. })
    ));
}

#[test]
fn utf8_text_survives_copy_out() {
    let mut tree = file_tree(StyleFlags::default());
    let item = tree.append(tree.root(), "café").unwrap();

    let mut exact = [0u8; 5];
    let copy = tree.text_into(item, 0, &mut exact);
    assert!(!copy.is_truncated());
    assert_eq!(std::str::from_utf8(&exact).unwrap(), "café");

    // One byte short: the two-byte 'é' must not be split.
    let mut small = [0u8; 4];
    let copy = tree.text_into(item, 0, &mut small);
    assert!(copy.is_truncated());
    assert_eq!(copy.required, 5);
    assert_eq!(std::str::from_utf8(&small[..copy.copied]).unwrap(), "caf");
}

#[test]
fn visible_walk_skips_collapsed_subtrees() {
    let mut tree = file_tree(StyleFlags::default());
    let root = tree.root();

    let h1 = tree.append(root, "Chapter 1").unwrap();
    let s11 = tree.append(h1, "Section 1.1").unwrap();
    let s12 = tree.append(h1, "Section 1.2").unwrap();
    let h2 = tree.append(root, "Chapter 2").unwrap();
    let s21 = tree.append(h2, "Section 2.1").unwrap();

    tree.expand(h1);
    tree.expand(h2);

    let mut walk = Vec::new();
    let mut cur = tree.first_item();
    while let Some(id) = cur {
        walk.push(id);
        cur = tree.next_visible(id);
    }
    assert_eq!(walk, vec![h1, s11, s12, h2, s21]);

    tree.collapse(h1);
    let mut walk = Vec::new();
    let mut cur = tree.first_item();
    while let Some(id) = cur {
        walk.push(id);
        cur = tree.next_visible(id);
    }
    assert_eq!(walk, vec![h1, h2, s21]);
}

#[test]
fn sorted_tree_keeps_order_through_mutations() {
    let mut tree = file_tree(StyleFlags::default());
    let root = tree.root();

    tree.append(root, "Zebra").unwrap();
    tree.append(root, "Apple").unwrap();
    tree.set_sort_column(0, true);
    tree.append(root, "Mango").unwrap();

    let mut names = Vec::new();
    let mut cur = tree.first_child_of(root);
    while let Some(id) = cur {
        names.push(tree.text(id, 0).to_owned());
        cur = tree.next_sibling_of(id);
    }
    assert_eq!(names, ["Apple", "Mango", "Zebra"]);

    // Nested sibling groups are kept sorted too.
    let apple = tree.first_child_of(root).unwrap();
    tree.append(apple, "red").unwrap();
    tree.append(apple, "green").unwrap();
    let first = tree.first_child_of(apple).unwrap();
    assert_eq!(tree.text(first, 0), "green");
}

#[test]
fn tri_state_checkboxes_track_the_subtree() {
    let mut tree = file_tree(StyleFlags::default().with_three_state());
    let root = tree.root();

    let folder = tree.append(root, "folder").unwrap();
    let doc = tree.append(folder, "doc").unwrap();
    let img = tree.append(folder, "img").unwrap();

    // Checking one of two children leaves the parent indeterminate.
    tree.check_item(doc, CheckState::Checked);
    tree.update_item_parent_state(doc);
    assert_eq!(tree.check_state(folder), CheckState::Indeterminate);
    assert!(!tree.are_all_children_in_state(folder, CheckState::Checked));

    // Checking the rest settles it.
    tree.check_item(img, CheckState::Checked);
    tree.update_item_parent_state(img);
    assert_eq!(tree.check_state(folder), CheckState::Checked);
    assert!(tree.are_all_children_in_state(folder, CheckState::Checked));

    // Recursive uncheck clears the whole branch in one call.
    tree.check_item_recursively(folder, CheckState::Unchecked);
    for id in [folder, doc, img] {
        assert_eq!(tree.check_state(id), CheckState::Unchecked);
    }

    // Re-deriving on an already consistent tree changes nothing.
    tree.update_item_parent_state(doc);
    assert_eq!(tree.check_state(folder), CheckState::Unchecked);
}

#[test]
fn multi_selection_copies_out_with_truncation() {
    let mut tree = file_tree(StyleFlags::default().with_multiple());
    let root = tree.root();

    let a = tree.append(root, "A").unwrap();
    let b = tree.append(a, "B").unwrap();
    let c = tree.append(root, "C").unwrap();
    tree.select_all();
    assert_eq!(tree.selections(), &[a, b, c]);

    let mut out = [ItemId::default(); 2];
    assert_eq!(tree.selections_into(&mut out), 3);
    assert_eq!(out, [a, b]);

    let mut out = [ItemId::default(); 8];
    assert_eq!(tree.selections_into(&mut out), 3);
    assert_eq!(&out[..3], &[a, b, c]);
}

#[test]
fn style_bits_round_trip_through_the_model() {
    init_tracing();
    let raw = StyleFlags::CHECKBOX | StyleFlags::THREE_STATE | StyleFlags::MULTIPLE;
    let tree = TreeListModel::with_style(StyleFlags::from_bits(raw));

    assert_eq!(tree.style().bits(), raw);
    assert_eq!(
        tree.selection_mode(),
        arbor_treelist::SelectionMode::Multi
    );
}
