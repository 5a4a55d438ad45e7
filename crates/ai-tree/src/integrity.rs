use crate::{IntegrityViolation, Tree, TreeError, ROOT_DEPTH};

/// What [`Tree::repair`] had to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Child links removed because they pointed at missing or already claimed nodes.
    pub links_dropped: usize,
    pub parents_fixed: usize,
    pub depths_fixed: usize,
    /// Live nodes no longer reachable from the root, now removed.
    pub discarded: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl<T> Tree<T> {
    /// Validate every structural invariant, reporting the first violation.
    ///
    /// Checks run depth-first from the root, then over the arena for nodes
    /// the walk never reached.
    pub fn assert_integrity(&self) -> Result<(), TreeError> {
        let root_id = self.root;
        let root = self.element(root_id)?;
        if root.depth != ROOT_DEPTH {
            return Err(IntegrityViolation::RootDepth {
                root: root_id,
                found: root.depth,
            }
            .into());
        }
        if let Some(parent) = root.parent {
            return Err(IntegrityViolation::RootHasParent {
                root: root_id,
                parent,
            }
            .into());
        }

        let mut visited = vec![false; self.slots.len()];
        visited[root_id.index()] = true;
        let mut stack = vec![root_id];
        while let Some(id) = stack.pop() {
            let element = self.element(id)?;
            for &child in &element.children {
                let Some(c) = self.get(child) else {
                    return Err(IntegrityViolation::DanglingChild { parent: id, child }.into());
                };
                if visited[child.index()] {
                    return Err(IntegrityViolation::SharedChild { parent: id, child }.into());
                }
                visited[child.index()] = true;
                if c.parent != Some(id) {
                    return Err(IntegrityViolation::ParentMismatch {
                        node: child,
                        expected: id,
                        found: c.parent,
                    }
                    .into());
                }
                if c.depth != element.depth + 1 {
                    return Err(IntegrityViolation::DepthMismatch {
                        node: child,
                        expected: element.depth + 1,
                        found: c.depth,
                    }
                    .into());
                }
            }
            stack.extend(element.children.iter().rev().copied());
        }

        if let Some(node) = self.ids().find(|id| !visited[id.index()]) {
            return Err(IntegrityViolation::Unreachable { node }.into());
        }
        Ok(())
    }

    /// Rebuild links and depths from whatever structure is reachable from the
    /// root, discarding everything else.
    ///
    /// Child order is preserved. A node listed under several parents keeps
    /// the first link the depth-first walk inspects; a parent claims all of
    /// its children before any of them is descended into. Repairing a
    /// repaired tree reports nothing.
    pub fn repair(&mut self) -> RepairReport {
        let mut report = RepairReport::default();
        let root = self.root;
        let mut visited = vec![false; self.slots.len()];
        visited[root.index()] = true;

        if let Some(element) = self.get_mut(root) {
            if element.parent.take().is_some() {
                report.parents_fixed += 1;
            }
            if element.depth != ROOT_DEPTH {
                element.depth = ROOT_DEPTH;
                report.depths_fixed += 1;
            }
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(element) = self.get_mut(id) else {
                continue;
            };
            let depth = element.depth + 1;
            let mut children = std::mem::take(&mut element.children);

            let before = children.len();
            children.retain(|&child| {
                let keep = self.slots.get(child.index()).is_some_and(Option::is_some)
                    && !visited[child.index()];
                if keep {
                    visited[child.index()] = true;
                }
                keep
            });
            report.links_dropped += before - children.len();

            for &child in &children {
                let Some(c) = self.get_mut(child) else {
                    continue;
                };
                if c.parent != Some(id) {
                    c.parent = Some(id);
                    report.parents_fixed += 1;
                }
                if c.depth != depth {
                    c.depth = depth;
                    report.depths_fixed += 1;
                }
            }
            stack.extend(children.iter().rev().copied());

            if let Some(element) = self.get_mut(id) {
                element.children = children;
            }
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_some() && !visited[index] {
                *slot = None;
                report.discarded += 1;
            }
        }

        if !report.is_clean() {
            tracing::debug!(?report, "repaired tree");
        }
        report
    }
}
