use core::fmt;

use ai_core::WorldMut;

use crate::{CompositeKind, DecoratorKind, Task};

/// What a behavior does with its children (if any).
pub enum BehaviorKind<W>
where
    W: WorldMut + 'static,
{
    Composite(CompositeKind),
    Decorator(DecoratorKind),
    Task(Box<dyn Task<W>>),
}

impl<W> BehaviorKind<W>
where
    W: WorldMut + 'static,
{
    pub fn label(&self) -> &'static str {
        match self {
            BehaviorKind::Composite(CompositeKind::Sequence) => "sequence",
            BehaviorKind::Composite(CompositeKind::Selector) => "selector",
            BehaviorKind::Decorator(DecoratorKind::Inverter) => "inverter",
            BehaviorKind::Decorator(DecoratorKind::Succeeder) => "succeeder",
            BehaviorKind::Decorator(DecoratorKind::Failer) => "failer",
            BehaviorKind::Task(_) => "task",
        }
    }
}

impl<W> fmt::Debug for BehaviorKind<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload of one tree element: a name plus what the node does.
///
/// Children are not stored here; they come from the tree structure and are
/// fixed when a [`BehaviorTree`](crate::BehaviorTree) is built.
pub struct Behavior<W>
where
    W: WorldMut + 'static,
{
    pub name: String,
    pub kind: BehaviorKind<W>,
}

impl<W> Behavior<W>
where
    W: WorldMut + 'static,
{
    pub fn new(name: impl Into<String>, kind: BehaviorKind<W>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn sequence(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Composite(CompositeKind::Sequence))
    }

    pub fn selector(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Composite(CompositeKind::Selector))
    }

    pub fn inverter(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Decorator(DecoratorKind::Inverter))
    }

    pub fn succeeder(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Decorator(DecoratorKind::Succeeder))
    }

    pub fn failer(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Decorator(DecoratorKind::Failer))
    }

    pub fn task(name: impl Into<String>, task: impl Task<W>) -> Self {
        Self::new(name, BehaviorKind::Task(Box::new(task)))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, BehaviorKind::Composite(_))
    }
}

impl<W> fmt::Debug for Behavior<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}
