pub mod app;
pub mod cli;
pub mod error;
pub mod models;
pub mod project;
pub mod selection;
pub mod template;
pub mod ui;

pub use error::{Result, ScriptError};
pub use models::Archetype;
pub use project::{Created, Project, sanitize_name};
pub use selection::Selection;
pub use template::{Rendered, render};
