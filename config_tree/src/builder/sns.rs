//! Same-name-sibling bookkeeping.
//!
//! Siblings sharing a name are indexed `1..=n` with no gaps. Removing one
//! shifts every later sibling down by one.

use indexmap::IndexMap;

use crate::configuration::ConfigurationNode;
use crate::model::ModelItem;
use crate::path::PathSegment;

/// Returns `true` when `key` belongs to a run of two or more same-name
/// siblings.
pub(super) fn is_same_name_sibling(parent: &ConfigurationNode, key: &PathSegment) -> bool {
    key.index() > 1 || parent.child_at(&key.with_index(2)).is_some()
}

/// Physically removes the sibling at `key` and renumbers the ones after it.
pub(super) fn remove_and_renumber(parent: &mut ConfigurationNode, key: &PathSegment) {
    let parent_path = parent.path().clone();
    let children = std::mem::take(parent.children_mut());
    let mut renumbered = IndexMap::with_capacity(children.len());
    for (segment, mut child) in children {
        if segment == *key {
            continue;
        }
        if segment.name() == key.name() && segment.index() > key.index() {
            let shifted = segment.with_index(segment.index() - 1);
            child.relocate(&parent_path, shifted.clone());
            renumbered.insert(shifted, child);
        } else {
            renumbered.insert(segment, child);
        }
    }
    parent.replace_children(renumbered);
}

/// Drops every sibling named `name` except the first.
///
/// The dropped siblings are not recorded as deletions.
pub(super) fn keep_only_first(parent: &mut ConfigurationNode, name: &str) {
    parent
        .children_mut()
        .retain(|segment, _| segment.name() != name || segment.index() == 1);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{is_same_name_sibling, keep_only_first, remove_and_renumber};
    use crate::configuration::ConfigurationNode;
    use crate::model::ModelItem;
    use crate::path::{NodePath, PathSegment};

    fn parent_with(names: &[&str]) -> ConfigurationNode {
        let mut parent = ConfigurationNode::new_root();
        for name in names {
            let segment = PathSegment::from(*name).force_index();
            let child = ConfigurationNode::new_child(&NodePath::root(), &segment, None);
            parent.children_mut().insert(segment, child);
        }
        parent
    }

    #[rstest]
    #[case(&["a"], "a", false)]
    #[case(&["a", "a[2]"], "a", true)]
    #[case(&["a", "a[2]"], "a[2]", true)]
    #[case(&["a", "b"], "b", false)]
    fn detects_same_name_siblings(#[case] names: &[&str], #[case] key: &str, #[case] expected: bool) {
        let parent = parent_with(names);
        let segment = PathSegment::from(key).force_index();
        assert_eq!(is_same_name_sibling(&parent, &segment), expected);
    }

    #[test]
    fn removal_shifts_later_siblings_down() {
        let mut parent = parent_with(&["a", "b", "a[2]", "a[3]"]);
        remove_and_renumber(&mut parent, &PathSegment::from("a[2]").force_index());
        assert_eq!(parent.child_names(), ["a[1]", "b[1]", "a[2]"]);
        let renumbered = parent.child("a[2]").expect("renumbered sibling");
        assert_eq!(renumbered.name(), "a[2]");
        assert_eq!(renumbered.path().to_string(), "/a[2]");
    }

    #[test]
    fn removing_the_first_sibling_promotes_the_second() {
        let mut parent = parent_with(&["a", "a[2]"]);
        remove_and_renumber(&mut parent, &PathSegment::from("a").force_index());
        assert_eq!(parent.child_names(), ["a[1]"]);
        assert_eq!(
            parent.child("a").map(|node| node.path().to_string()),
            Some(String::from("/a"))
        );
    }

    #[test]
    fn keeping_only_the_first_sibling_leaves_others_alone() {
        let mut parent = parent_with(&["a", "a[2]", "b", "a[3]"]);
        keep_only_first(&mut parent, "a");
        assert_eq!(parent.child_names(), ["a[1]", "b[1]"]);
    }
}
