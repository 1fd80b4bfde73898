use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use pdfrooms::chat::poller;
use pdfrooms::{
    AuthService, ChatRepository, ChatSession, ChatSettings, Config, MemoryStorage, Role,
    RoomService, Storage,
};

#[tokio::main]
async fn main() -> pdfrooms::Result<()> {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = pdfrooms::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        pdfrooms::logging::init_console_only(&config.logging.level);
    }

    info!("PDFRooms demo");

    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    pdfrooms::seed_demo_data(&storage, Utc::now())?;

    let auth = AuthService::new(storage.clone());
    let rooms = RoomService::new(storage.clone());
    let chat = ChatRepository::new(storage.clone());
    let settings = ChatSettings::from_config(&config.chat);

    let admin = auth.login("admin@test.com", Role::Admin)?;
    let john = match auth.users().find_by_email_and_role("user1@test.com", Role::User)? {
        Some(user) => user,
        None => {
            error!("seeded member account missing");
            return Ok(());
        }
    };

    let room = match rooms.rooms_for_admin(&admin.id)?.into_iter().next() {
        Some(room) => room,
        None => {
            error!("seeded room missing");
            return Ok(());
        }
    };
    info!("room '{}' (passkey {})", room.name, room.passkey);

    // John's session polls in the background with his dialog closed
    let john_session = ChatSession::mount(
        chat.clone(),
        &room.id,
        john.clone(),
        settings.clone(),
        Utc::now(),
    )?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = tokio::spawn(async move {
        let mut session = john_session;
        poller::run(&mut session, shutdown_rx).await;
        session
    });

    // The admin opens the chat, types for a moment, and sends
    let mut admin_session = ChatSession::mount(
        chat.clone(),
        &room.id,
        admin.clone(),
        settings,
        Utc::now(),
    )?;
    admin_session.open(Utc::now())?;
    admin_session
        .update_draft("Welcome to the room!", Utc::now())?;
    sleep(Duration::from_millis(1500)).await;
    admin_session.send(Utc::now())?;
    for notice in admin_session.take_notices() {
        info!("{}: {}", notice.title, notice.body);
    }

    // Give John's poller a couple of ticks to pick the message up
    sleep(Duration::from_millis(2500)).await;
    let _ = shutdown_tx.send(true);
    let mut john_session = match poll_task.await {
        Ok(session) => session,
        Err(e) => {
            error!("poll task failed: {e}");
            return Ok(());
        }
    };

    info!(
        "John's unread badge while closed: {:?}",
        john_session.unread_badge()
    );
    john_session.open(Utc::now())?;
    info!("John opened the chat; unread = {}", john_session.unread());

    let now = Utc::now();
    for message in john_session.messages() {
        info!(
            "[{}] <{}> {}",
            pdfrooms::datetime::format_timestamp(&message.timestamp, &now, &config.display.timezone),
            message.user_name,
            message.message
        );
    }

    john_session.shutdown()?;
    admin_session.shutdown()?;
    Ok(())
}
