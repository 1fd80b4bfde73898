//! PDFRooms - passkey-protected PDF sharing rooms.
//!
//! A demo of sharing PDF documents inside passkey-protected rooms, with
//! role-based accounts, per-room activity logs, and a polling-based room
//! chat with typing indicators and unread tracking. All persistence is
//! simulated through an injected key-value storage abstraction; there is
//! no server and no real PDF processing (content is plain text standing
//! in for PDF bytes).

pub mod auth;
pub mod chat;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod notice;
pub mod room;
pub mod seed;
pub mod storage;

pub use auth::{AuthService, Role, User, UserRepository};
pub use chat::{ChatMessage, ChatRepository, ChatSession, ChatSettings, TypingSignal};
pub use config::Config;
pub use error::{PdfRoomsError, Result};
pub use notice::{Notice, NoticeKind};
pub use room::{
    ActivityEntry, ActivityKind, PdfDocument, Room, RoomRepository, RoomService, RoomStats,
};
pub use seed::{clear_demo_data, seed_demo_data};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
