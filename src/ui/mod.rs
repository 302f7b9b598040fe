pub mod form;
pub mod navigation;
pub mod screens;
pub mod terminal;

pub use form::{decode_build_query, decode_select_agents, FormResponse};
pub use navigation::{parse_scripted_keys, BuildQueryEditor, EditorEvent, SelectAgentsEditor};
pub use terminal::{is_interactive_terminal, load_scripted_keys, with_terminal_ui, ScriptedUi};
