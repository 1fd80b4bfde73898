//! Passkey-protected rooms and their shared documents.

mod repository;
mod service;
mod types;

pub use repository::RoomRepository;
pub use service::{generate_passkey, RoomService};
pub use types::{ActivityEntry, ActivityKind, PdfDocument, Room, RoomStats};
