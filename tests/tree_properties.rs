// Property tests for lazy tree expansion and location decoding

mod common;

use explorer::model::filesystem::DriveKind;
use explorer::model::location;
use explorer::model::memory_fs::MemoryFileSystem;
use explorer::services::notifier::RecordingNotifier;
use explorer::view::file_tree::{FileTree, FileTreeView};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Folder names paired with whether each one has a subfolder of its own
fn folders() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,7}", 0..20).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        (Just(names), prop::collection::vec(any::<bool>(), len))
            .prop_map(|(names, nested)| names.into_iter().zip(nested).collect())
    })
}

fn tree_over(folders: &[(String, bool)]) -> (Arc<RecordingNotifier>, FileTree) {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_drive("C:", DriveKind::Fixed, true).add_dir("C:/root");
    for (name, nested) in folders {
        let dir = format!("C:/root/{name}");
        fs.add_dir(&dir);
        if *nested {
            fs.add_dir(&format!("{dir}/inner"));
        }
    }
    let notifier = Arc::new(RecordingNotifier::new());
    let mut tree = FileTree::new(fs, notifier.clone());
    tree.initialize();
    (notifier, tree)
}

proptest! {
    #[test]
    fn prop_expand_adds_one_child_per_subdirectory(folders in folders()) {
        common::tracing::init_tracing_from_env();
        let (notifier, mut tree) = tree_over(&folders);

        let c = tree.find_root("C:\\").unwrap();
        tree.expand(c);
        let root = tree.find_child(c, "root").unwrap();
        tree.expand(root);

        let node = tree.get_node(root).unwrap();
        prop_assert_eq!(node.children.len(), folders.len());

        let labels: BTreeSet<String> = node
            .children
            .iter()
            .map(|id| tree.get_node(*id).unwrap().label.clone())
            .collect();
        let expected: BTreeSet<String> = folders.iter().map(|(n, _)| n.clone()).collect();
        prop_assert_eq!(labels, expected);

        for (name, nested) in &folders {
            let child = tree.get_node(tree.find_child(root, name).unwrap()).unwrap();
            prop_assert_eq!(child.has_expander(), *nested);
        }

        // A second expand is a no-op
        let count = tree.node_count();
        tree.expand(root);
        prop_assert_eq!(tree.node_count(), count);
        prop_assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn prop_synchronize_twice_matches_once(folders in folders(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!folders.is_empty());
        let (_, tree) = tree_over(&folders);
        let mut view = FileTreeView::new(tree);

        let (name, _) = &folders[pick.index(folders.len())];
        let target = format!("C:/root/{name}");

        view.synchronize(&target);
        let once = view.get_display_nodes();
        let selected = view.get_selected();

        view.synchronize(&target);
        prop_assert_eq!(view.get_display_nodes(), once);
        prop_assert_eq!(view.get_selected(), selected);
    }

    #[test]
    fn prop_decode_reaches_fixed_point(name in "[A-Za-z0-9 %#]{0,12}") {
        let raw = location::encode(&location::encode(&format!("C:/{name}")));
        let decoded = location::decode(&raw);
        prop_assert_eq!(location::decode(&decoded), decoded.clone());
        prop_assert!(!decoded.contains("%25"));
    }
}
