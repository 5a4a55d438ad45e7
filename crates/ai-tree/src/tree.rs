use crate::{NodeId, TreeElement, TreeError, ROOT_DEPTH};

/// Arena-backed ordered tree.
///
/// Removed nodes leave an empty slot behind, so a [`NodeId`] never silently
/// starts pointing at another node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    pub(crate) slots: Vec<Option<TreeElement<T>>>,
    pub(crate) root: NodeId,
}

impl<T> Tree<T> {
    /// A tree holding only its structural root (depth -1).
    pub fn new(root: T) -> Self {
        Self {
            slots: vec![Some(TreeElement::new(ROOT_DEPTH, None, root))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeElement<T>> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeElement<T>> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|e| &e.data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id).map(|e| &mut e.data)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    pub fn depth(&self, id: NodeId) -> Option<i32> {
        self.get(id).map(|e| e.depth)
    }

    /// Live node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| NodeId(i as u32))
    }

    pub fn add_child(&mut self, parent: NodeId, data: T) -> Result<NodeId, TreeError> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, data)
    }

    /// Insert `data` as the `index`-th child of `parent` (clamped to the end).
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        data: T,
    ) -> Result<NodeId, TreeError> {
        let depth = self.depth(parent).ok_or(TreeError::UnknownNode(parent))? + 1;
        let id = NodeId(self.slots.len() as u32);
        self.slots
            .push(Some(TreeElement::new(depth, Some(parent), data)));
        let siblings = &mut self.element_mut(parent)?.children;
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        Ok(id)
    }

    /// Pre-order walk from the root following child links.
    ///
    /// Links to missing or already visited nodes are skipped, so the walk
    /// terminates even on a corrupted tree.
    pub fn preorder(&self) -> Vec<NodeId> {
        self.walk(self.root)
    }

    /// Pre-order walk of the subtree under `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = self.walk(id);
        if !out.is_empty() {
            out.remove(0);
        }
        out
    }

    /// Parent first, root last.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            if out.contains(&p) || out.len() >= self.slots.len() {
                break;
            }
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// Minimal set of "roots" covering a selection.
    ///
    /// Every id that has an ancestor inside `ids` is dropped; the survivors
    /// keep their input order. Duplicates and unknown ids are dropped too.
    pub fn find_common_ancestors(&self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if !self.contains(id) || out.contains(&id) {
                continue;
            }
            let covered = self
                .ancestors(id)
                .iter()
                .any(|ancestor| ids.contains(ancestor));
            if !covered {
                out.push(id);
            }
        }
        out
    }

    /// Remove `id` and everything below it. Returns the payloads in pre-order.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<Vec<T>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let parent = self.element(id)?.parent;
        self.unlink(parent, id);

        let mut removed = Vec::new();
        for node in self.walk(id) {
            if let Some(element) = self.slots[node.index()].take() {
                removed.push(element.data);
            }
        }
        Ok(removed)
    }

    /// Remove `id` only; its children take its place under its parent.
    pub fn remove_promote(&mut self, id: NodeId) -> Result<T, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let parent = self.element(id)?.parent;
        let position = self.unlink(parent, id);
        let element = self.slots[id.index()]
            .take()
            .ok_or(TreeError::UnknownNode(id))?;

        if let Some(p) = parent.filter(|p| self.contains(*p)) {
            let at = position.unwrap_or_else(|| self.children(p).len());
            for (offset, &child) in element.children.iter().enumerate() {
                if let Some(c) = self.get_mut(child) {
                    c.parent = Some(p);
                }
                if let Some(parent_element) = self.get_mut(p) {
                    let at = (at + offset).min(parent_element.children.len());
                    parent_element.children.insert(at, child);
                }
            }
            let base = self.depth(p).unwrap_or(ROOT_DEPTH) + 1;
            for &child in &element.children {
                self.set_depths(child, base);
            }
        }
        Ok(element.data)
    }

    /// Remove a selection of nodes with their subtrees.
    ///
    /// The selection is reduced to its common ancestors first, so a node and
    /// one of its descendants can be selected together safely.
    pub fn remove_elements(&mut self, ids: &[NodeId]) -> Result<Vec<T>, TreeError> {
        if ids.contains(&self.root) {
            return Err(TreeError::RootRemoval);
        }
        let mut removed = Vec::new();
        for id in self.find_common_ancestors(ids) {
            removed.extend(self.remove_subtree(id)?);
        }
        Ok(removed)
    }

    /// Re-parent a selection under `parent`, starting at child position `index`.
    ///
    /// Nodes keep their subtrees; descendants of other selected nodes move
    /// along with their ancestor instead of being detached.
    pub fn move_elements(
        &mut self,
        parent: NodeId,
        index: usize,
        ids: &[NodeId],
    ) -> Result<(), TreeError> {
        self.element(parent)?;
        let ids = self.find_common_ancestors(ids);
        for &id in &ids {
            if id == self.root {
                return Err(TreeError::RootRemoval);
            }
            if id == parent || self.is_descendant_of(parent, id) {
                return Err(TreeError::CyclicMove { node: id, parent });
            }
        }

        let mut index = index;
        for &id in &ids {
            let old_parent = self.element(id)?.parent;
            if let Some(position) = self.unlink(old_parent, id) {
                // Removing an earlier sibling shifts the insertion point.
                if old_parent == Some(parent) && position < index {
                    index -= 1;
                }
            }
        }

        let base = self.element(parent)?.depth + 1;
        for (offset, &id) in ids.iter().enumerate() {
            let siblings = &mut self.element_mut(parent)?.children;
            let at = (index + offset).min(siblings.len());
            siblings.insert(at, id);
            self.element_mut(id)?.parent = Some(parent);
            self.set_depths(id, base);
        }
        Ok(())
    }

    /// Recompute every depth reachable from the root from the child links.
    pub fn update_depths(&mut self) {
        let root = self.root;
        self.set_depths(root, ROOT_DEPTH);
    }

    /// Consume the tree, yielding reachable elements in pre-order.
    pub fn into_preorder(mut self) -> Vec<(NodeId, TreeElement<T>)> {
        let order = self.preorder();
        order
            .into_iter()
            .filter_map(|id| self.slots[id.index()].take().map(|e| (id, e)))
            .collect()
    }

    pub(crate) fn element(&self, id: NodeId) -> Result<&TreeElement<T>, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut TreeElement<T>, TreeError> {
        self.get_mut(id).ok_or(TreeError::UnknownNode(id))
    }

    pub(crate) fn walk(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(start) {
            return out;
        }
        let mut visited = vec![false; self.slots.len()];
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;
            out.push(id);
            for &child in self.children(id).iter().rev() {
                if self.contains(child) && !visited[child.index()] {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Detach `id` from `parent`'s child list, returning its former position.
    fn unlink(&mut self, parent: Option<NodeId>, id: NodeId) -> Option<usize> {
        let siblings = &mut self.get_mut(parent?)?.children;
        let position = siblings.iter().position(|&c| c == id)?;
        siblings.remove(position);
        Some(position)
    }

    fn set_depths(&mut self, start: NodeId, depth: i32) {
        let mut stack = vec![(start, depth)];
        let mut visited = vec![false; self.slots.len()];
        while let Some((id, depth)) = stack.pop() {
            let Some(seen) = visited.get_mut(id.index()) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;
            let Some(element) = self.get_mut(id) else {
                continue;
            };
            element.depth = depth;
            stack.extend(element.children.iter().map(|&c| (c, depth + 1)));
        }
    }
}
