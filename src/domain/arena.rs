use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

/// Payload of one element in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, one of the wire names in [`crate::domain::entities::tags`]
    pub name: &'static str,
    /// Attributes in insertion order
    pub attributes: Vec<(&'static str, String)>,
    /// Text content, None for elements that only hold attributes or children
    pub text: Option<String>,
}

impl ElementData {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
        }
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}={:?}", key, value)?;
        }
        if let Some(text) = &self.text {
            write!(f, ": {}", text)?;
        }
        Ok(())
    }
}

/// Element node in the arena-based document.
#[derive(Debug)]
pub struct TreeNode {
    pub data: ElementData,
    /// Index of the parent element, None for the document root
    pub parent: Option<Index>,
    /// Child elements in document order
    pub children: Vec<Index>,
}

/// Arena-backed element tree.
///
/// Nodes are only ever added. Handles returned by [`DocumentArena::insert_node`]
/// stay valid for the lifetime of the arena, so other structures may keep them
/// as lookup keys instead of holding references into the tree.
#[derive(Debug)]
pub struct DocumentArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for DocumentArena {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts `data` as the last child of `parent`, or as the root when no parent is given.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: ElementData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal in document order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Child elements of `idx`, in document order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = &TreeNode> + '_ {
        self.get_node(idx)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(move |&child| self.get_node(child))
    }

    /// Number of elements tagged `name` anywhere below and including the root.
    #[instrument(level = "trace", skip(self))]
    pub fn count_elements(&self, name: &str) -> usize {
        self.iter().filter(|(_, node)| node.data.name == name).count()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Outline of the document for diagnostics.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &DocumentArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.data.to_string());
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.root.and_then(|idx| self.get_node(idx).map(|node| (idx, node))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(root.data.to_string());
                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty document".to_string()),
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a DocumentArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a DocumentArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
