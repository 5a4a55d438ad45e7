use core::fmt::Debug;

/// Opaque handle naming the agent that owns a tree.
///
/// The engine only needs a stable ordering and a numeric id for logs and
/// trace events; everything else about the agent lives in the world.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// The world a tree is ticked against, as far as tasks can observe it.
///
/// Only the agent handle type is fixed here. Collaborators such as
/// `ai-nav` add their queries as supertraits, and a task bounds its world
/// type by exactly the ones it uses.
pub trait WorldView {
    type Agent: AgentId;
}

/// A world tasks may change: move requests, cancellations and the like.
///
/// Behavior trees are generic over `W: WorldMut`; a task receives `&mut W`
/// in every lifecycle callback.
pub trait WorldMut: WorldView {}
