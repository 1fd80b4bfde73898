//! Room chat: polling feed, typing indicators, and unread tracking.
//!
//! Chat state is shared only through storage: each mounted session polls
//! the message and typing collections on a cadence, so "real-time" here
//! is a polling simulation, not a transport. Typing signals are ephemeral
//! and expire on a freshness window; read markers are per user per room
//! and only ever move forward.

pub mod poller;
mod repository;
mod session;
mod types;
pub mod unread;

pub use repository::ChatRepository;
pub use session::{ChatSession, ChatSettings};
pub use types::{ChatMessage, TypingSignal};
