//! Domain types and models

pub mod activity;
pub mod session;
pub mod status;

pub use activity::{ActivitySnapshot, ActivityType, DocumentChange, EditorContext, IdeType};
pub use session::{Credentials, Session};
pub use status::TrackerStatus;
