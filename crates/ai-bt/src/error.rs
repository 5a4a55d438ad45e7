use ai_core::BlackboardError;
use ai_tree::TreeError;
use thiserror::Error;

/// Why a task could not run. The runtime treats every task error as a
/// `Failure` of that task.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error(transparent)]
    Blackboard(#[from] BlackboardError),

    #[error("target has no position in the world")]
    NoTargetPosition,

    #[error("{0}")]
    Failed(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Why a tree could not be built. These are fatal for the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("root behavior {name:?} must be a composite")]
    RootNotComposite { name: String },

    #[error("decorator {name:?} needs exactly one child, found {children}")]
    DecoratorArity { name: String, children: usize },

    #[error("task {name:?} cannot have children")]
    TaskHasChildren { name: String },

    #[error("unknown task type {0:?}")]
    UnknownTask(String),

    #[error("missing task parameter {param:?}")]
    MissingParam { param: String },

    #[error("task parameter {param:?} must be {expected}")]
    InvalidParam {
        param: String,
        expected: &'static str,
    },
}
