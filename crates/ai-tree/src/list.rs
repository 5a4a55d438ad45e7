use crate::{DepthViolation, FlatNode, NodeId, Tree, TreeElement, TreeError, ROOT_DEPTH};

impl<T: Clone> Tree<T> {
    /// Flatten into pre-order rows, cloning payloads.
    ///
    /// Depths are taken from the structure (root -1, children +1), so the
    /// output is always a valid input for [`Tree::from_list`].
    pub fn to_list(&self) -> Vec<FlatNode<T>> {
        self.depth_walk()
            .into_iter()
            .filter_map(|(id, depth)| self.data(id).map(|d| FlatNode::new(depth, d.clone())))
            .collect()
    }
}

impl<T> Tree<T> {
    /// Consuming [`to_list`](Self::to_list).
    pub fn into_list(mut self) -> Vec<FlatNode<T>> {
        self.depth_walk()
            .into_iter()
            .filter_map(|(id, depth)| {
                self.slots[id.index()]
                    .take()
                    .map(|e| FlatNode::new(depth, e.data))
            })
            .collect()
    }

    /// Rebuild parent/child links from depth-tagged pre-order rows.
    ///
    /// Keeps a stack of the currently open ancestors: each row closes every
    /// open node at its depth or deeper and becomes the last child of the
    /// node left on top.
    pub fn from_list(list: Vec<FlatNode<T>>) -> Result<Self, TreeError> {
        validate_depths(&list)?;

        let mut slots: Vec<Option<TreeElement<T>>> = Vec::with_capacity(list.len());
        let mut open: Vec<(NodeId, i32)> = Vec::new();
        for (index, row) in list.into_iter().enumerate() {
            let id = NodeId(index as u32);
            while open.last().is_some_and(|&(_, depth)| depth >= row.depth) {
                open.pop();
            }
            let parent = open.last().map(|&(p, _)| p);
            if let Some(p) = parent {
                if let Some(element) = slots[p.index()].as_mut() {
                    element.children.push(id);
                }
            }
            slots.push(Some(TreeElement::new(row.depth, parent, row.data)));
            open.push((id, row.depth));
        }

        Ok(Tree {
            slots,
            root: NodeId(0),
        })
    }

    fn depth_walk(&self) -> Vec<(NodeId, i32)> {
        let mut out = Vec::new();
        let mut visited = vec![false; self.slots.len()];
        let mut stack = vec![(self.root, ROOT_DEPTH)];
        while let Some((id, depth)) = stack.pop() {
            match visited.get_mut(id.index()) {
                Some(seen) if !*seen && self.contains(id) => *seen = true,
                _ => continue,
            }
            out.push((id, depth));
            for &child in self.children(id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

/// Check that a flat list describes exactly one tree rooted at depth -1.
pub fn validate_depths<T>(list: &[FlatNode<T>]) -> Result<(), TreeError> {
    let invalid = |index, violation| TreeError::InvalidTreeDepth { index, violation };

    let first = list.first().ok_or(invalid(0, DepthViolation::EmptyList))?;
    if first.depth != ROOT_DEPTH {
        return Err(invalid(
            0,
            DepthViolation::RootDepth { found: first.depth },
        ));
    }

    for (index, pair) in list.windows(2).enumerate() {
        let (previous, current) = (pair[0].depth, pair[1].depth);
        if current < 0 {
            return Err(invalid(
                index + 1,
                DepthViolation::NegativeDepth { found: current },
            ));
        }
        if current > previous + 1 {
            return Err(invalid(
                index + 1,
                DepthViolation::DepthJump {
                    previous,
                    found: current,
                },
            ));
        }
    }
    Ok(())
}

/// Best-effort depth fix for a flat list; returns how many rows changed.
///
/// The first row becomes the root (-1) and every later row is clamped into
/// `0..=previous + 1`. A list already passing [`validate_depths`] is left
/// untouched, so running this twice changes nothing the second time.
pub fn normalize_depths<T>(list: &mut [FlatNode<T>]) -> usize {
    let mut changed = 0;
    let mut previous = ROOT_DEPTH;
    for (index, row) in list.iter_mut().enumerate() {
        let depth = if index == 0 {
            ROOT_DEPTH
        } else {
            row.depth.clamp(0, previous + 1)
        };
        if depth != row.depth {
            row.depth = depth;
            changed += 1;
        }
        previous = depth;
    }
    if changed > 0 {
        tracing::debug!(rows = list.len(), changed, "normalized flat tree depths");
    }
    changed
}
