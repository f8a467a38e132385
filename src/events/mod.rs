pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_escape_close, wire_modal_controls};
pub use pointer::wire_pointer;
