use atlas_model::{EntityRecord, OrganizationRecord, PrefixRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Flat record that can be arranged into a parent-indexed tree.
pub trait TreeRecord {
    fn id(&self) -> i64;
    fn label(&self) -> &str;
    fn parent_id(&self) -> Option<i64>;
}

impl TreeRecord for OrganizationRecord {
    fn id(&self) -> i64 {
        self.id
    }
    fn label(&self) -> &str {
        &self.name
    }
    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

impl TreeRecord for EntityRecord {
    fn id(&self) -> i64 {
        self.id
    }
    fn label(&self) -> &str {
        &self.name
    }
    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

impl TreeRecord for PrefixRecord {
    fn id(&self) -> i64 {
        self.id
    }
    fn label(&self) -> &str {
        &self.prefix
    }
    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

/// One node of a built forest, carrying the original record.
///
/// Expand/collapse state belongs to the rendering layer; the tree itself is
/// rebuilt from scratch on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode<T> {
    pub id: i64,
    pub label: String,
    pub record: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Arrange a flat record page into a forest of trees.
///
/// Roots are records with no parent id, a parent id outside the supplied set
/// (common with paginated or filtered fetches), or a self-referential parent.
/// Children keep the input order at every level. A per-branch ancestor set
/// cuts parent cycles, and any record a cycle kept out of the natural roots
/// is promoted to a root of its own, so every input record lands in exactly
/// one node and the build always terminates.
pub fn build_forest<T: TreeRecord + Clone>(records: &[T]) -> Vec<TreeNode<T>> {
    let ids: HashSet<i64> = records.iter().map(TreeRecord::id).collect();

    let mut children_of: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match record.parent_id() {
            Some(parent) if parent != record.id() && ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(index);
            }
            _ => roots.push(index),
        }
    }

    let mut placed = vec![false; records.len()];
    let mut forest = Vec::new();
    for &index in &roots {
        let mut ancestors = HashSet::new();
        forest.push(expand(records, &children_of, index, &mut ancestors, &mut placed));
    }

    // Records still unplaced sit on a pure parent cycle; the earliest one
    // becomes the root of its branch.
    for index in 0..records.len() {
        if !placed[index] {
            let mut ancestors = HashSet::new();
            forest.push(expand(records, &children_of, index, &mut ancestors, &mut placed));
        }
    }

    forest
}

fn expand<T: TreeRecord + Clone>(
    records: &[T],
    children_of: &HashMap<i64, Vec<usize>>,
    index: usize,
    ancestors: &mut HashSet<i64>,
    placed: &mut [bool],
) -> TreeNode<T> {
    let record = &records[index];
    placed[index] = true;
    ancestors.insert(record.id());

    let mut children = Vec::new();
    if let Some(child_indexes) = children_of.get(&record.id()) {
        for &child in child_indexes {
            if ancestors.contains(&records[child].id()) || placed[child] {
                continue;
            }
            children.push(expand(records, children_of, child, ancestors, placed));
        }
    }

    ancestors.remove(&record.id());
    TreeNode {
        id: record.id(),
        label: record.label().to_string(),
        record: record.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prefix(id: i64, prefix: &str, parent_id: Option<i64>) -> PrefixRecord {
        PrefixRecord {
            id,
            prefix: prefix.to_string(),
            parent_id,
            description: None,
        }
    }

    fn labels(forest: &[TreeNode<PrefixRecord>]) -> Vec<&str> {
        forest.iter().map(|n| n.label.as_str()).collect()
    }

    fn count_nodes(forest: &[TreeNode<PrefixRecord>]) -> usize {
        forest
            .iter()
            .map(|n| 1 + count_nodes(&n.children))
            .sum::<usize>()
    }

    #[test]
    fn test_nested_forest_preserves_input_order() {
        let records = vec![
            prefix(1, "10.0.0.0/8", None),
            prefix(2, "10.1.0.0/16", Some(1)),
            prefix(3, "10.2.0.0/16", Some(1)),
            prefix(4, "192.168.0.0/16", None),
            prefix(5, "10.1.1.0/24", Some(2)),
        ];
        let forest = build_forest(&records);

        assert_eq!(labels(&forest), vec!["10.0.0.0/8", "192.168.0.0/16"]);
        let ten = &forest[0];
        assert_eq!(ten.child_count(), 2);
        assert_eq!(ten.children[0].label, "10.1.0.0/16");
        assert_eq!(ten.children[1].label, "10.2.0.0/16");
        assert_eq!(ten.children[0].children[0].label, "10.1.1.0/24");
        assert_eq!(forest[1].child_count(), 0);
    }

    #[test]
    fn test_parent_outside_page_becomes_root() {
        let mut records: Vec<PrefixRecord> = (1..=10)
            .map(|id| prefix(id, &format!("10.{id}.0.0/16"), None))
            .collect();
        records[4].parent_id = Some(99);

        let forest = build_forest(&records);
        assert_eq!(forest.len(), 10);
        assert!(forest.iter().any(|n| n.id == 5));
        assert_eq!(count_nodes(&forest), 10);
    }

    #[test]
    fn test_two_cycle_terminates_with_each_record_once() {
        let records = vec![prefix(1, "a", Some(2)), prefix(2, "b", Some(1))];
        let forest = build_forest(&records);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, 2);
        assert_eq!(forest[0].children[0].children.len(), 0);
        assert_eq!(count_nodes(&forest), 2);
    }

    #[test]
    fn test_longer_cycle_with_attached_branch() {
        // 1 -> 2 -> 3 -> 1 cycle, 4 hangs off 2.
        let records = vec![
            prefix(1, "a", Some(3)),
            prefix(2, "b", Some(1)),
            prefix(3, "c", Some(2)),
            prefix(4, "d", Some(2)),
        ];
        let forest = build_forest(&records);

        assert_eq!(count_nodes(&forest), 4);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
    }

    #[test]
    fn test_self_parent_is_a_root() {
        let records = vec![prefix(1, "a", Some(1)), prefix(2, "b", Some(1))];
        let forest = build_forest(&records);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].children[0].id, 2);
    }

    #[test]
    fn test_empty_input_yields_empty_forest() {
        let forest = build_forest::<PrefixRecord>(&[]);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_organization_records_build_trees() {
        let records = vec![
            OrganizationRecord {
                id: 1,
                name: "acme".to_string(),
                parent_id: None,
                description: None,
            },
            OrganizationRecord {
                id: 2,
                name: "acme-eu".to_string(),
                parent_id: Some(1),
                description: None,
            },
        ];
        let forest = build_forest(&records);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].label, "acme");
        assert_eq!(forest[0].child_count(), 1);
        assert_eq!(forest[0].children[0].label, "acme-eu");
    }
}
