//! End-to-end room and account scenarios over the public API.

use std::sync::Arc;

use chrono::Utc;

use pdfrooms::{
    seed_demo_data, ActivityKind, AuthService, JsonFileStorage, MemoryStorage, PdfRoomsError,
    Role, RoomService, Storage,
};

fn memory() -> Arc<dyn Storage> {
    Arc::new(MemoryStorage::new())
}

#[test]
fn test_room_lifecycle() {
    let storage = memory();
    let auth = AuthService::new(storage.clone());
    let rooms = RoomService::new(storage.clone());
    let now = Utc::now();

    let admin = auth
        .register("Admin User", "admin@test.com", Role::Admin, now)
        .unwrap();
    let member = auth
        .register("John Doe", "user1@test.com", Role::User, now)
        .unwrap();

    // Create and join
    let room = rooms
        .create_room(&admin, "Research Group", "Shared papers", now)
        .unwrap();
    rooms.join_room(&member, &room.passkey, now).unwrap();

    // Upload, view, edit
    let pdf = rooms.upload_pdf(&admin, &room.id, now).unwrap();
    rooms.view_pdf(&member, &room.id, &pdf.id, now).unwrap();
    rooms
        .edit_pdf(&member, &room.id, &pdf.id, "rewritten", now)
        .unwrap();

    let stored = rooms.rooms().get(&room.id).unwrap().unwrap();
    assert_eq!(stored.members, vec![member.id.clone()]);
    assert_eq!(stored.views, 1);
    assert_eq!(stored.pdfs.len(), 1);
    assert_eq!(stored.pdfs[0].views, 1);
    assert_eq!(stored.pdfs[0].content, "rewritten");
    assert_eq!(stored.pdfs[0].last_edited_by.as_deref(), Some("John Doe"));

    let kinds: Vec<ActivityKind> = stored.activity_log.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::Join,
            ActivityKind::Upload,
            ActivityKind::View,
            ActivityKind::Edit
        ]
    );

    // Every activity entry carries the acting user's identity
    for entry in &stored.activity_log {
        assert!(!entry.user_name.is_empty());
        assert!(!entry.user_email.is_empty());
        assert!(!entry.description.is_empty());
    }

    // Stats reflect the activity
    let stats = rooms.stats_for_admin(&admin.id).unwrap();
    assert_eq!(stats.rooms, 1);
    assert_eq!(stats.pdfs, 1);
    assert_eq!(stats.members, 1);
    assert_eq!(stats.total_views, 1);

    // Only the owner can delete
    let denied = rooms.delete_room(&member, &room.id);
    assert!(matches!(denied, Err(PdfRoomsError::Permission(_))));
    rooms.delete_room(&admin, &room.id).unwrap();
    assert!(rooms.rooms().list().unwrap().is_empty());
}

#[test]
fn test_join_failures_surface_as_errors() {
    let storage = memory();
    let auth = AuthService::new(storage.clone());
    let rooms = RoomService::new(storage.clone());
    let now = Utc::now();

    let admin = auth
        .register("Admin User", "admin@test.com", Role::Admin, now)
        .unwrap();
    let member = auth
        .register("John Doe", "user1@test.com", Role::User, now)
        .unwrap();
    let room = rooms.create_room(&admin, "Reading Club", "", now).unwrap();

    assert!(matches!(
        rooms.join_room(&member, "", now),
        Err(PdfRoomsError::Validation(_))
    ));
    assert!(matches!(
        rooms.join_room(&member, "ZZZZZZ", now),
        Err(PdfRoomsError::NotFound(_))
    ));

    rooms.join_room(&member, &room.passkey, now).unwrap();
    assert!(matches!(
        rooms.join_room(&member, &room.passkey, now),
        Err(PdfRoomsError::Validation(_))
    ));
}

#[test]
fn test_seeded_demo_room_is_usable() {
    let storage = memory();
    seed_demo_data(&storage, Utc::now()).unwrap();

    let auth = AuthService::new(storage.clone());
    let rooms = RoomService::new(storage.clone());

    let jane = auth.login("user2@test.com", Role::User).unwrap();
    let seeded = rooms.rooms_for_member(&jane.id).unwrap();
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded[0].name, "Computer Science 101");

    // Viewing a seeded document bumps the existing counters
    let pdf_id = seeded[0].pdfs[0].id.clone();
    let before = seeded[0].pdfs[0].views;
    let viewed = rooms
        .view_pdf(&jane, &seeded[0].id, &pdf_id, Utc::now())
        .unwrap();
    assert_eq!(viewed.views, before + 1);
}

#[test]
fn test_rooms_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pdfrooms.json");
    let now = Utc::now();

    let (room_id, passkey) = {
        let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::open(&path).unwrap());
        let auth = AuthService::new(storage.clone());
        let rooms = RoomService::new(storage.clone());

        let admin = auth
            .register("Admin User", "admin@test.com", Role::Admin, now)
            .unwrap();
        let room = rooms.create_room(&admin, "Archive", "", now).unwrap();
        rooms.upload_pdf(&admin, &room.id, now).unwrap();
        (room.id, room.passkey)
    };

    // A new process over the same file sees everything
    let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::open(&path).unwrap());
    let auth = AuthService::new(storage.clone());
    let rooms = RoomService::new(storage.clone());

    let admin = auth.login("admin@test.com", Role::Admin).unwrap();
    let reopened = rooms.rooms().get(&room_id).unwrap().unwrap();
    assert_eq!(reopened.passkey, passkey);
    assert_eq!(reopened.pdfs.len(), 1);
    assert_eq!(reopened.admin_id, admin.id);
}

#[test]
fn test_logout_clears_current_user() {
    let storage = memory();
    let auth = AuthService::new(storage.clone());

    auth.register("Admin User", "admin@test.com", Role::Admin, Utc::now())
        .unwrap();
    assert!(auth.current_user().unwrap().is_some());

    auth.logout().unwrap();
    assert!(auth.current_user().unwrap().is_none());
}
