//! View-independent shell: flat state, the actions that drive it, and the gateway calls it
//! asks for.

mod action;
pub mod dashboard;
mod effect;
mod reducer;
mod state;


pub use action::Action;
pub use effect::{perform, Effect};
pub use reducer::{reduce, NEW_NOTE_TITLE};
pub use state::{
    CreateKind, EditorState, Prompt, PromptField, PromptKind, Selection, ShellState, Status,
    StatusKind,
};
