//! Accounts and login for PDFRooms.

mod repository;
mod service;
mod types;

pub use repository::UserRepository;
pub use service::AuthService;
pub use types::{Role, User};
