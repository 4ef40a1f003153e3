mod index;
mod output;
mod paths;
mod projects;
mod sessions;

pub use index::{read_sessions_index, SessionsIndex, SessionsIndexEntry};
pub use output::{export_destination, project_name_for};
pub use paths::ClaudePaths;
pub use projects::{list_projects, ProjectEntry};
pub use sessions::{
    first_prompt, format_size, latest_session, list_sessions, session_files, SessionEntry,
};
