use std::collections::BTreeMap;
use std::fmt;

use ai_core::{AgentId, Blackboard, Blackboards, TickContext, WorldMut};
use ai_tools::{NullTraceSink, TraceEvent, TraceSink};
use ai_tree::{normalize_depths, validate_depths, FlatNode, NodeId, Tree};

use crate::{
    Behavior, BehaviorKind, BuildError, EndReason, NodeState, Outcome, RuntimeConfig, Status,
    TaskError,
};

pub const TRACE_START: &str = "bt.start";
pub const TRACE_END: &str = "bt.end";
pub const TRACE_CANCEL: &str = "bt.cancel";
pub const TRACE_RESTART: &str = "bt.restart";

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeState {
    /// Nothing on the stack; the next tick starts the root.
    #[default]
    Idle,
    Executing,
    /// The root just ended; the next tick restarts it.
    Resetting,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Start(NodeId),
    End(NodeId, Outcome),
}

struct Node<W>
where
    W: WorldMut + 'static,
{
    name: String,
    kind: BehaviorKind<W>,
    depth: i32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    state: NodeState,
    cursor: usize,
    warned: bool,
}

/// Executes a behavior tree for one agent.
///
/// Active behaviors form a stack, root first. Each tick updates only the
/// task on top; starting and ending behaviors cascades through the stack
/// synchronously within the same tick. When the root ends the tree is
/// restarted on the following tick, so it keeps re-deciding forever.
pub struct BehaviorTree<W>
where
    W: WorldMut + 'static,
{
    config: RuntimeConfig,
    nodes: Vec<Node<W>>,
    stack: Vec<NodeId>,
    state: RuntimeState,
    restarts: u64,
    root_outcome: Option<Outcome>,
    last_status: Option<Status>,
    trace: Box<dyn TraceSink>,
}

impl<W> fmt::Debug for BehaviorTree<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("name", &self.config.name)
            .field("nodes", &self.nodes.len())
            .field("state", &self.state)
            .field("stack", &self.stack)
            .field("restarts", &self.restarts)
            .finish()
    }
}

impl<W> BehaviorTree<W>
where
    W: WorldMut + 'static,
{
    /// Build from a depth-tagged pre-order list.
    ///
    /// With `repair_on_load`, a list with invalid depths is normalized once
    /// and retried; a second failure is returned.
    pub fn from_list(
        mut list: Vec<FlatNode<Behavior<W>>>,
        config: RuntimeConfig,
    ) -> Result<Self, BuildError> {
        if let Err(err) = validate_depths(&list) {
            if !config.repair_on_load || list.is_empty() {
                return Err(err.into());
            }
            tracing::warn!(tree = %config.name, error = %err, "normalizing behavior list depths");
            normalize_depths(&mut list);
        }
        Self::from_tree(Tree::from_list(list)?, config)
    }

    /// Build from a tree, checking (and if allowed repairing) its structure.
    pub fn from_tree(
        mut tree: Tree<Behavior<W>>,
        config: RuntimeConfig,
    ) -> Result<Self, BuildError> {
        if let Err(err) = tree.assert_integrity() {
            if !config.repair_on_load {
                return Err(err.into());
            }
            tracing::warn!(tree = %config.name, error = %err, "repairing behavior tree");
            let report = tree.repair();
            tracing::debug!(tree = %config.name, ?report, "behavior tree repaired");
            tree.assert_integrity()?;
        }

        let nodes = Self::set_children(tree)?;
        tracing::debug!(tree = %config.name, nodes = nodes.len(), "behavior tree built");
        Ok(Self {
            config,
            nodes,
            stack: Vec::new(),
            state: RuntimeState::Idle,
            restarts: 0,
            root_outcome: None,
            last_status: None,
            trace: Box::new(NullTraceSink),
        })
    }

    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace = Box::new(sink);
        self
    }

    /// Flatten the tree into the runtime arena, fixing each behavior's
    /// children once.
    fn set_children(tree: Tree<Behavior<W>>) -> Result<Vec<Node<W>>, BuildError> {
        let elements = tree.into_preorder();
        let index: BTreeMap<NodeId, NodeId> = elements
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, NodeId(i as u32)))
            .collect();

        let mut nodes = Vec::with_capacity(elements.len());
        for (_, element) in elements {
            let Behavior { name, kind } = element.data;
            let children: Vec<NodeId> = element
                .children
                .iter()
                .filter_map(|c| index.get(c).copied())
                .collect();
            match &kind {
                BehaviorKind::Decorator(_) if children.len() != 1 => {
                    return Err(BuildError::DecoratorArity {
                        name,
                        children: children.len(),
                    });
                }
                BehaviorKind::Task(_) if !children.is_empty() => {
                    return Err(BuildError::TaskHasChildren { name });
                }
                _ => {}
            }
            nodes.push(Node {
                name,
                kind,
                depth: element.depth,
                parent: element.parent.and_then(|p| index.get(&p).copied()),
                children,
                state: NodeState::Idle,
                cursor: 0,
                warned: false,
            });
        }

        match nodes.first() {
            Some(root) if matches!(root.kind, BehaviorKind::Composite(_)) => Ok(nodes),
            root => Err(BuildError::RootNotComposite {
                name: root.map(|r| r.name.clone()).unwrap_or_default(),
            }),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// How many times the root was restarted after ending.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// What the last [`tick`](Self::tick) returned.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// First behavior (in pre-order) with this name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.index()).map(|n| n.name.as_str())
    }

    pub fn node_state(&self, id: NodeId) -> Option<NodeState> {
        self.nodes.get(id.index()).map(|n| n.state)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// The execution stack, root first.
    pub fn active_path(&self) -> &[NodeId] {
        &self.stack
    }

    pub fn active_leaf(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// `(depth, "name (kind)")` rows in pre-order, for display.
    pub fn outline(&self) -> Vec<FlatNode<String>> {
        self.nodes
            .iter()
            .map(|n| FlatNode::new(n.depth, format!("{} ({})", n.name, n.kind.label())))
            .collect()
    }

    /// Advance the tree by one tick.
    ///
    /// Returns `Running` unless the root ended during this tick, in which
    /// case its outcome is returned.
    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        local: &mut Blackboard,
        global: &mut Blackboard,
    ) -> Status {
        let mut blackboard = Blackboards::new(local, global);
        self.root_outcome = None;

        if self.state != RuntimeState::Executing {
            if self.state == RuntimeState::Resetting {
                self.restarts += 1;
                self.emit(
                    TraceEvent::new(ctx.tick, TRACE_RESTART)
                        .with_a(self.restarts)
                        .with_b(agent.stable_id()),
                );
                tracing::debug!(tree = %self.config.name, tick = ctx.tick, restarts = self.restarts, "restarting behavior tree");
            }
            self.state = RuntimeState::Executing;
            self.run(Step::Start(ROOT), ctx, agent, world, &mut blackboard);
        }

        if self.state == RuntimeState::Executing {
            if let Some(top) = self.stack.last().copied() {
                if let Some(outcome) = self.update(top, ctx, agent, world, &mut blackboard).outcome()
                {
                    self.run(Step::End(top, outcome), ctx, agent, world, &mut blackboard);
                }
            }
        }

        let status = self.root_outcome.take().map_or(Status::Running, Status::from);
        self.last_status = Some(status);
        status
    }

    /// Unwind the whole stack, ending every running task with
    /// [`EndReason::Cancelled`], and go back to idle.
    pub fn cancel(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        local: &mut Blackboard,
        global: &mut Blackboard,
    ) {
        let mut blackboard = Blackboards::new(local, global);
        let depth = self.stack.len();
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.nodes.get_mut(id.index()) else {
                continue;
            };
            node.state = NodeState::Idle;
            if let BehaviorKind::Task(task) = &mut node.kind {
                task.on_end(ctx, agent, world, &mut blackboard, EndReason::Cancelled);
            }
            self.emit(TraceEvent::new(ctx.tick, TRACE_CANCEL).with_a(u64::from(id.0)));
        }
        if depth > 0 {
            tracing::debug!(tree = %self.config.name, tick = ctx.tick, depth, "behavior tree cancelled");
        }
        self.state = RuntimeState::Idle;
    }

    fn run(
        &mut self,
        first: Step,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) {
        let mut next = Some(first);
        while let Some(step) = next.take() {
            next = match step {
                Step::Start(id) => self.start(id, ctx, agent, world, blackboard),
                Step::End(id, outcome) => self.end(id, outcome, ctx, agent, world, blackboard),
            };
        }
    }

    fn start(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> Option<Step> {
        self.stack.push(id);
        self.emit(
            TraceEvent::new(ctx.tick, TRACE_START)
                .with_a(u64::from(id.0))
                .with_b(agent.stable_id()),
        );

        let node = self.nodes.get_mut(id.index())?;
        node.state = NodeState::Running;
        node.cursor = 0;
        tracing::trace!(node = %node.name, tick = ctx.tick, "start");

        let started = match &mut node.kind {
            BehaviorKind::Composite(kind) => {
                return Some(match node.children.first() {
                    Some(&child) => Step::Start(child),
                    None => Step::End(id, kind.exhausted()),
                });
            }
            BehaviorKind::Decorator(_) => {
                return Some(match node.children.first() {
                    Some(&child) => Step::Start(child),
                    None => Step::End(id, Outcome::Failure),
                });
            }
            BehaviorKind::Task(task) => task.on_start(ctx, agent, world, blackboard),
        };

        match started {
            Ok(()) => None,
            Err(err) => {
                self.report(id, &err);
                Some(Step::End(id, Outcome::Failure))
            }
        }
    }

    fn update(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> Status {
        let Some(BehaviorKind::Task(task)) = self.nodes.get_mut(id.index()).map(|n| &mut n.kind)
        else {
            return Status::Running;
        };
        match task.on_update(ctx, agent, world, blackboard) {
            Ok(status) => status,
            Err(err) => {
                self.report(id, &err);
                Status::Failure
            }
        }
    }

    fn end(
        &mut self,
        id: NodeId,
        outcome: Outcome,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> Option<Step> {
        if self.stack.last() == Some(&id) {
            self.stack.pop();
        }

        let node = self.nodes.get_mut(id.index())?;
        node.state = NodeState::Ended(outcome);
        if let BehaviorKind::Task(task) = &mut node.kind {
            task.on_end(ctx, agent, world, blackboard, EndReason::Completed(outcome));
        }
        let parent = node.parent;
        self.emit(
            TraceEvent::new(ctx.tick, TRACE_END)
                .with_a(u64::from(id.0))
                .with_b(outcome.code()),
        );

        match parent {
            Some(parent) => Some(self.on_child_ended(parent, outcome)),
            None => {
                self.state = RuntimeState::Resetting;
                self.root_outcome = Some(outcome);
                tracing::debug!(tree = %self.config.name, tick = ctx.tick, %outcome, "root ended");
                None
            }
        }
    }

    fn on_child_ended(&mut self, parent: NodeId, outcome: Outcome) -> Step {
        let ended = match self.nodes.get(parent.index()).map(|n| &n.kind) {
            Some(BehaviorKind::Composite(kind)) => kind.on_child_ended(outcome),
            Some(BehaviorKind::Decorator(decorator)) => Some(decorator.apply(outcome)),
            _ => Some(outcome),
        };
        match ended {
            Some(result) => Step::End(parent, result),
            None => self.advance_child(parent),
        }
    }

    fn advance_child(&mut self, id: NodeId) -> Step {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return Step::End(id, Outcome::Failure);
        };
        node.cursor += 1;
        match node.children.get(node.cursor) {
            Some(&child) => Step::Start(child),
            None => match &node.kind {
                BehaviorKind::Composite(kind) => Step::End(id, kind.exhausted()),
                _ => Step::End(id, Outcome::Failure),
            },
        }
    }

    fn report(&mut self, id: NodeId, err: &TaskError) {
        let tree = &self.config.name;
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return;
        };
        if node.warned {
            tracing::debug!(tree = %tree, node = %node.name, error = %err, "task failed");
        } else {
            node.warned = true;
            tracing::warn!(tree = %tree, node = %node.name, error = %err, "task failed");
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        self.trace.emit(event);
    }
}
