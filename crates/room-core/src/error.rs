use crate::registry::ObjectId;
use thiserror::Error;

/// Failure modes inside the interaction subsystem.
///
/// Hover, click and modal entry points treat every variant as a silent skip;
/// only the loader surfaces them to its caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InteractionError {
    #[error("unknown object id {0:?}")]
    UnknownObject(ObjectId),
    #[error("object `{0}` has no rest snapshot")]
    MissingRest(String),
    #[error("set-piece prop `{0}` not found")]
    MissingProp(&'static str),
    #[error("`{0}` is busy or cooling down")]
    Busy(String),
    #[error("modal transition already in progress")]
    ModalBusy,
    #[error("close requested {elapsed_ms:.0}ms after open")]
    CloseDebounced { elapsed_ms: f64 },
    #[error("scene loading already finished")]
    AlreadyLoaded,
    #[error("duplicate object name `{0}`")]
    DuplicateName(String),
    #[error("parent `{0}` is not registered")]
    UnknownParent(String),
}

pub type Result<T> = std::result::Result<T, InteractionError>;
