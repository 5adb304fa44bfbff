pub mod buffer;
pub mod command;
pub mod editor;
pub mod history;
pub mod key;
pub mod traits;
pub mod types;

pub use crate::buffer::TextBuffer;
pub use crate::command::{Action, CommandParser, IDLE_RESET, Motion, RangeOp};
pub use crate::editor::Editor;
pub use crate::history::History;
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::traits::RenderPort;
pub use crate::types::{Mode, Pointer, Selection};
