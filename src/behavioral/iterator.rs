//! Iterator
//! Example: Iterative Tree Traversal
//!
//! In-order traversal of a binary tree without recursion: the iterator keeps
//! its own stack of pending ancestors.

#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    pub value: T,
    pub left: Option<Box<Tree<T>>>,
    pub right: Option<Box<Tree<T>>>,
}

impl<T> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Tree {
            value,
            left: None,
            right: None,
        }
    }

    pub fn node(value: T, left: Tree<T>, right: Tree<T>) -> Self {
        Tree::leaf(value).with_left(left).with_right(right)
    }

    pub fn with_left(mut self, left: Tree<T>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: Tree<T>) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    pub fn iter(&self) -> TreeIter<'_, T> {
        TreeIter::new(self)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.iter().count()
    }
}

pub struct TreeIter<'a, T> {
    current: Option<&'a Tree<T>>,
    stack: Vec<&'a Tree<T>>,
}

impl<'a, T> TreeIter<'a, T> {
    fn new(root: &'a Tree<T>) -> Self {
        TreeIter {
            current: Some(root),
            stack: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.current.is_none() && self.stack.is_empty()
    }
}

impl<'a, T> Iterator for TreeIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Descend as far left as possible, remembering the path.
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = TreeIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
