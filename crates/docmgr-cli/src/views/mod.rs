//! View controllers.
//!
//! Each view owns its form buffers, renders itself to text, and dispatches
//! user intents to the [`AppContext`](docmgr_state::AppContext) it was given.
//! Views never mutate session or registry state directly.

pub mod file_list;
pub mod login;
pub mod upload;

pub use file_list::FileListView;
pub use login::LoginView;
pub use upload::UploadView;
