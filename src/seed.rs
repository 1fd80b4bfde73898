//! Demo data seeding.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::auth::{Role, User, UserRepository};
use crate::room::{ActivityEntry, ActivityKind, PdfDocument, Room, RoomRepository};
use crate::storage::Storage;
use crate::Result;

const INTRO_PDF_CONTENT: &str = "# Introduction to Programming\n\n\
## Chapter 1: Getting Started\n\n\
Programming is the process of creating a set of instructions that tell a \
computer how to perform a task.\n\n\
### Key Concepts:\n\
- Variables and Data Types\n\
- Control Structures\n\
- Functions and Methods\n\
- Object-Oriented Programming\n\n\
This document covers the fundamental concepts of programming and provides \
practical examples to help students understand the basics.";

const DATA_STRUCTURES_PDF_CONTENT: &str = "# Data Structures Guide\n\n\
## Overview\n\
Data structures are ways of organizing and storing data so that they can \
be accessed and worked with efficiently.\n\n\
## Common Data Structures:\n\
- Arrays: fixed-size sequential collections with fast access by index\n\
- Linked Lists: dynamic structures with efficient insertion and deletion\n\
- Stacks: last in, first out; used in function calls and undo operations\n\
- Queues: first in, first out; used in scheduling and breadth-first search\n\n\
This guide provides comprehensive coverage of fundamental data structures \
used in computer science.";

/// Seed demo users and a demo room if the store is empty.
///
/// Returns false without touching anything when both collections already
/// exist.
pub fn seed_demo_data(storage: &Arc<dyn Storage>, now: DateTime<Utc>) -> Result<bool> {
    let users = UserRepository::new(storage.clone());
    let rooms = RoomRepository::new(storage.clone());

    if !users.list()?.is_empty() && !rooms.list()?.is_empty() {
        info!("demo data already present");
        return Ok(false);
    }

    let admin = demo_user("admin-1", "Admin User", "admin@test.com", Role::Admin, now);
    let john = demo_user("user-1", "John Doe", "user1@test.com", Role::User, now);
    let jane = demo_user("user-2", "Jane Smith", "user2@test.com", Role::User, now);

    users.save(&admin)?;
    users.save(&john)?;
    users.save(&jane)?;

    let days_ago = |days: i64| now - Duration::days(days);

    let mut intro = PdfDocument::new(
        "Introduction to Programming.pdf",
        "2.5MB",
        INTRO_PDF_CONTENT,
        days_ago(6),
    );
    intro.id = "pdf-1".to_string();
    intro.views = 8;
    intro.last_edited_at = Some(days_ago(2));
    intro.last_edited_by = Some(john.name.clone());
    intro.last_edit_description =
        Some("Added example code section and improved formatting".to_string());

    let mut guide = PdfDocument::new(
        "Data Structures Guide.pdf",
        "3.1MB",
        DATA_STRUCTURES_PDF_CONTENT,
        days_ago(4),
    );
    guide.id = "pdf-2".to_string();
    guide.views = 7;

    let mut room = Room::new(
        "Computer Science 101",
        "Introduction to Computer Science course materials",
        "CS101A",
        &admin.id,
        days_ago(7),
    );
    room.id = "room-1".to_string();
    room.members = vec![john.id.clone(), jane.id.clone()];
    room.views = 15;

    room.activity_log = vec![
        ActivityEntry::new(
            ActivityKind::Join,
            &john,
            format!("Joined the room \"{}\"", room.name),
            days_ago(6),
        ),
        ActivityEntry::new(
            ActivityKind::Join,
            &jane,
            format!("Joined the room \"{}\"", room.name),
            days_ago(5),
        ),
        ActivityEntry::new(
            ActivityKind::Upload,
            &admin,
            format!("Uploaded PDF \"{}\" ({})", intro.name, intro.size),
            days_ago(6),
        )
        .with_pdf(&intro.id, &intro.name),
        ActivityEntry::new(
            ActivityKind::Upload,
            &admin,
            format!("Uploaded PDF \"{}\" ({})", guide.name, guide.size),
            days_ago(4),
        )
        .with_pdf(&guide.id, &guide.name),
        ActivityEntry::new(
            ActivityKind::View,
            &john,
            format!("Viewed PDF \"{}\"", intro.name),
            days_ago(3),
        )
        .with_pdf(&intro.id, &intro.name),
        ActivityEntry::new(
            ActivityKind::Edit,
            &john,
            "Added example code section and improved formatting",
            days_ago(2),
        )
        .with_pdf(&intro.id, &intro.name),
        ActivityEntry::new(
            ActivityKind::View,
            &jane,
            format!("Viewed PDF \"{}\"", guide.name),
            days_ago(1),
        )
        .with_pdf(&guide.id, &guide.name),
    ];

    room.pdfs = vec![intro, guide];
    rooms.save(&room)?;

    info!(
        "demo data seeded: admin@test.com, user1@test.com, user2@test.com; room passkey {}",
        room.passkey
    );
    Ok(true)
}

/// Remove all demo collections, the logged-in account, and read markers.
pub fn clear_demo_data(storage: &Arc<dyn Storage>) -> Result<()> {
    for key in ["users", "currentUser", "rooms", "chatMessages", "typingUsers"] {
        storage.remove(key)?;
    }
    for key in storage.keys()? {
        if key.starts_with("lastRead_") {
            storage.remove(&key)?;
        }
    }
    info!("demo data cleared");
    Ok(())
}

fn demo_user(id: &str, name: &str, email: &str, role: Role, now: DateTime<Utc>) -> User {
    let mut user = User::new(name, email, role, now);
    user.id = id.to_string();
    user
}
