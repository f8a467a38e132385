pub mod camera;
pub mod click;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod hover;
pub mod interaction;
pub mod modal;
pub mod registry;
pub mod sequencer;

pub use camera::*;
pub use click::{ClickActions, LinkTable, TapFilter};
pub use dispatcher::Animator;
pub use error::InteractionError;
pub use hover::{CursorHint, Hit, HoverResolver, HoverState};
pub use interaction::{CameraInputLatch, Interaction, InteractionHost};
pub use modal::{ModalGate, ModalId, ModalPhase, ModalSettled};
pub use registry::*;
pub use sequencer::{Channel, Completion, Ease, Motion, Sequence, SequenceKind, Sequencer, Stage};
