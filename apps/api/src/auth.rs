mod password;
mod session;
mod session_store;

pub use password::{login_handler, register_handler, reset_password_handler};
pub use session::{logout_handler, me_handler};
pub use session_store::TowerSessionStore;

/// Session key holding the stored principal.
pub const SESSION_PRINCIPAL_KEY: &str = "principal";
