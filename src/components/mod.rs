//! UI Components
//!
//! One widget per file; the app shell mounts them side by side.

mod api_key_form;
mod notes_editor;
mod todo_list;
mod weather_panel;

pub use api_key_form::ApiKeyForm;
pub use notes_editor::NotesEditor;
pub use todo_list::TodoList;
pub use weather_panel::WeatherPanel;
