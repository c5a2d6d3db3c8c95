//! In-memory ordered index of courses.
//!
//! The [`CatalogIndex`] is an unbalanced binary search tree keyed by
//! [`CourseId`]. It is append-only: courses are inserted during a load and
//! read afterwards, never edited or removed.

use tracing::instrument;

use crate::domain::{Course, CourseId};

#[derive(Debug)]
struct Node {
    course: Course,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    const fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// An ordered tree of courses keyed by course id.
///
/// Every id in a node's left subtree sorts strictly before the node's id, and
/// every id in its right subtree sorts at or after it. Inserting an id that is
/// already present therefore adds a second node to the right, leaving the
/// original in place.
///
/// No rebalancing is done, so feeding ids in sorted order produces a tree
/// whose depth equals its length. Insertion, traversal and drop are iterative
/// so a degenerate tree does not exhaust the call stack.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl CatalogIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts a course.
    ///
    /// Descends left while the current node's id is greater than the new id
    /// and right otherwise, attaching a new leaf at the first empty slot.
    #[instrument(level = "trace", skip_all, fields(id = %course.id()))]
    pub fn insert(&mut self, course: Course) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if node.course.id() > course.id() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::new(course)));
        self.len += 1;
    }

    /// Looks up a course by id, ignoring case.
    ///
    /// When several courses share an id, the one nearest the root on the
    /// search path is returned. Because ties are routed right, that is always
    /// the first of them to have been inserted.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Course> {
        let id = CourseId::new(id);
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            let node_id = node.course.id();
            if *node_id == id {
                return Some(&node.course);
            }
            current = if *node_id > id {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        None
    }

    /// Walks the index in order, yielding courses by non-decreasing id.
    ///
    /// Each call starts a fresh walk from the root.
    #[must_use]
    pub fn traverse_in_order(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    /// Alias for [`CatalogIndex::traverse_in_order`].
    #[must_use]
    pub fn iter(&self) -> InOrder<'_> {
        self.traverse_in_order()
    }

    /// The number of courses in the index, counting duplicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the index holds no courses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        deepest
    }
}

impl Drop for CatalogIndex {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a CatalogIndex {
    type Item = &'a Course;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse_in_order()
    }
}

/// In-order iterator over a [`CatalogIndex`].
#[derive(Debug)]
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.course)
    }
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use proptest::prelude::*;

    use super::*;

    fn course(id: &str, name: &str) -> Course {
        Course::new(
            CourseId::new(id),
            NonEmptyString::new(name.to_string()).unwrap(),
        )
    }

    fn ids(index: &CatalogIndex) -> Vec<&str> {
        index.traverse_in_order().map(|c| c.id().as_str()).collect()
    }

    #[test]
    fn empty_index_yields_nothing() {
        let index = CatalogIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.depth(), 0);
        assert_eq!(index.traverse_in_order().count(), 0);
        assert!(index.find_by_id("CS101").is_none());
    }

    #[test]
    fn traversal_is_ordered_by_id() {
        let mut index = CatalogIndex::new();
        for id in ["MATH201", "CSCI300", "CSCI100", "CSCI400", "CSCI101", "CSCI200"] {
            index.insert(course(id, "name"));
        }

        assert_eq!(
            ids(&index),
            ["CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI400", "MATH201"]
        );
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn traversal_is_restartable() {
        let mut index = CatalogIndex::new();
        index.insert(course("B", "b"));
        index.insert(course("A", "a"));

        let first: Vec<_> = index.iter().collect();
        let second: Vec<_> = (&index).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut index = CatalogIndex::new();
        index.insert(course("csci100", "Intro"));
        index.insert(course("MATH201", "Discrete Math"));

        let found = index.find_by_id("CsCi100").expect("course should be found");
        assert_eq!(found.id().as_str(), "CSCI100");
        assert_eq!(found.name(), "Intro");
        assert!(index.find_by_id("CSCI999").is_none());
    }

    #[test]
    fn duplicate_ids_keep_both_and_lookup_returns_first_inserted() {
        let mut index = CatalogIndex::new();
        index.insert(course("CS200", "Middle"));
        index.insert(course("CS101", "Original"));
        index.insert(course("CS101", "Duplicate"));

        assert_eq!(index.len(), 3);
        assert_eq!(ids(&index), ["CS101", "CS101", "CS200"]);

        let names: Vec<_> = index.iter().map(Course::name).collect();
        assert_eq!(names, ["Original", "Duplicate", "Middle"]);

        assert_eq!(index.find_by_id("cs101").unwrap().name(), "Original");
    }

    #[test]
    fn sorted_input_degenerates_without_overflowing() {
        let mut index = CatalogIndex::new();
        for i in 0..10_000 {
            index.insert(course(&format!("C{i:06}"), "n"));
        }

        assert_eq!(index.depth(), 10_000);
        assert_eq!(index.iter().count(), 10_000);
        assert!(index.find_by_id("c009999").is_some());
    }

    proptest! {
        #[test]
        fn traversal_is_sorted_and_complete(input in prop::collection::hash_set("[A-Z]{2}[0-9]{3}", 0..64)) {
            let mut index = CatalogIndex::new();
            for id in &input {
                index.insert(course(id, "name"));
            }

            let traversed = ids(&index);
            prop_assert_eq!(traversed.len(), input.len());
            prop_assert!(traversed.windows(2).all(|pair| pair[0] <= pair[1]));
        }

        #[test]
        fn inserted_ids_can_be_found(input in prop::collection::vec("[a-zA-Z]{2}[0-9]{3}", 1..32)) {
            let mut index = CatalogIndex::new();
            for id in &input {
                index.insert(course(id, "name"));
            }

            for id in &input {
                let found = index.find_by_id(id);
                prop_assert!(found.is_some());
                prop_assert_eq!(found.unwrap().id().as_str(), id.to_uppercase());
            }
        }
    }
}
