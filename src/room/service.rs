//! Room operations for PDFRooms.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

use crate::auth::User;
use crate::error::PdfRoomsError;
use crate::storage::Storage;
use crate::Result;

use super::repository::RoomRepository;
use super::types::{ActivityEntry, ActivityKind, PdfDocument, Room, RoomStats};

/// Passkey length.
const PASSKEY_LEN: usize = 6;

/// Characters a passkey may contain.
const PASSKEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Names drawn from for simulated uploads.
const SAMPLE_PDF_NAMES: &[&str] = &[
    "Project Documentation.pdf",
    "User Manual.pdf",
    "Technical Specifications.pdf",
    "Research Report.pdf",
    "Meeting Notes.pdf",
];

/// Generate a join passkey.
pub fn generate_passkey() -> String {
    let mut rng = rand::rng();
    (0..PASSKEY_LEN)
        .map(|_| PASSKEY_CHARSET[rng.random_range(0..PASSKEY_CHARSET.len())] as char)
        .collect()
}

/// Service for room lifecycle, membership, and document operations.
#[derive(Clone)]
pub struct RoomService {
    rooms: RoomRepository,
}

impl RoomService {
    /// Create a new RoomService over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            rooms: RoomRepository::new(storage),
        }
    }

    /// Access the underlying room repository.
    pub fn rooms(&self) -> &RoomRepository {
        &self.rooms
    }

    /// Create a new room owned by the given admin.
    pub fn create_room(
        &self,
        admin: &User,
        name: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Room> {
        if !admin.role.is_admin() {
            return Err(PdfRoomsError::Permission(
                "only admins may create rooms".to_string(),
            ));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(PdfRoomsError::Validation(
                "room name is required".to_string(),
            ));
        }

        let room = Room::new(name, description.trim(), generate_passkey(), &admin.id, now);
        self.rooms.save(&room)?;

        info!("room '{}' created with passkey {}", room.name, room.passkey);
        Ok(room)
    }

    /// Join a room by passkey.
    ///
    /// The passkey is matched case-insensitively. Joining twice is a
    /// validation error.
    pub fn join_room(&self, user: &User, passkey: &str, now: DateTime<Utc>) -> Result<Room> {
        let passkey = passkey.trim();
        if passkey.is_empty() {
            return Err(PdfRoomsError::Validation(
                "room passkey is required".to_string(),
            ));
        }

        let mut room = self
            .rooms
            .find_by_passkey(&passkey.to_uppercase())?
            .ok_or_else(|| PdfRoomsError::NotFound("room".to_string()))?;

        if room.is_member(&user.id) {
            return Err(PdfRoomsError::Validation(
                "you are already a member of this room".to_string(),
            ));
        }

        room.members.push(user.id.clone());
        let description = format!("Joined the room \"{}\"", room.name);
        room.activity_log
            .push(ActivityEntry::new(ActivityKind::Join, user, description, now));
        self.rooms.save(&room)?;

        info!("{} joined room '{}'", user.email, room.name);
        Ok(room)
    }

    /// Upload a document to a room (simulated).
    ///
    /// Picks a sample document name and size and fills in template
    /// content; no bytes are transferred.
    pub fn upload_pdf(&self, user: &User, room_id: &str, now: DateTime<Utc>) -> Result<PdfDocument> {
        let mut room = self
            .rooms
            .get(room_id)?
            .ok_or_else(|| PdfRoomsError::NotFound("room".to_string()))?;

        let (name, size) = {
            let mut rng = rand::rng();
            let name = SAMPLE_PDF_NAMES[rng.random_range(0..SAMPLE_PDF_NAMES.len())];
            let size = format!(
                "{}.{}MB",
                rng.random_range(1..=5),
                rng.random_range(0..10)
            );
            (name, size)
        };

        let pdf = PdfDocument::new(name, &size, sample_content(name), now);
        let description = format!("Uploaded PDF \"{}\" ({})", pdf.name, pdf.size);
        let entry = ActivityEntry::new(ActivityKind::Upload, user, description, now)
            .with_pdf(&pdf.id, &pdf.name);

        room.pdfs.push(pdf.clone());
        room.activity_log.push(entry);
        self.rooms.save(&room)?;

        info!("{} uploaded '{}' to room '{}'", user.email, pdf.name, room.name);
        Ok(pdf)
    }

    /// View a document, bumping its view counter and the room's.
    pub fn view_pdf(
        &self,
        user: &User,
        room_id: &str,
        pdf_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PdfDocument> {
        let mut room = self
            .rooms
            .get(room_id)?
            .ok_or_else(|| PdfRoomsError::NotFound("room".to_string()))?;

        let viewed = {
            let pdf = room
                .find_pdf_mut(pdf_id)
                .ok_or_else(|| PdfRoomsError::NotFound("PDF".to_string()))?;
            pdf.views += 1;
            pdf.clone()
        };
        room.views += 1;

        let description = format!("Viewed PDF \"{}\"", viewed.name);
        let entry = ActivityEntry::new(ActivityKind::View, user, description, now)
            .with_pdf(&viewed.id, &viewed.name);
        room.activity_log.push(entry);
        self.rooms.save(&room)?;

        Ok(viewed)
    }

    /// Replace a document's content, recording who edited it and by how
    /// much the length changed.
    pub fn edit_pdf(
        &self,
        user: &User,
        room_id: &str,
        pdf_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<PdfDocument> {
        let mut room = self
            .rooms
            .get(room_id)?
            .ok_or_else(|| PdfRoomsError::NotFound("room".to_string()))?;

        let edited = {
            let pdf = room
                .find_pdf_mut(pdf_id)
                .ok_or_else(|| PdfRoomsError::NotFound("PDF".to_string()))?;

            let old_len = pdf.content.chars().count() as i64;
            let new_len = content.chars().count() as i64;
            let description = if pdf.content != content {
                format!(
                    "Modified PDF content ({} character difference)",
                    (new_len - old_len).abs()
                )
            } else {
                "No changes made to content".to_string()
            };

            pdf.content = content.to_string();
            pdf.last_edited_at = Some(now);
            pdf.last_edited_by = Some(user.name.clone());
            pdf.last_edit_description = Some(description);
            pdf.clone()
        };

        let entry = ActivityEntry::new(
            ActivityKind::Edit,
            user,
            edited.last_edit_description.clone().unwrap_or_default(),
            now,
        )
        .with_pdf(&edited.id, &edited.name);
        room.activity_log.push(entry);
        self.rooms.save(&room)?;

        info!("{} edited '{}' in room '{}'", user.email, edited.name, room.name);
        Ok(edited)
    }

    /// Delete a room. Only the owning admin may delete it.
    pub fn delete_room(&self, user: &User, room_id: &str) -> Result<()> {
        let room = self
            .rooms
            .get(room_id)?
            .ok_or_else(|| PdfRoomsError::NotFound("room".to_string()))?;

        if room.admin_id != user.id {
            return Err(PdfRoomsError::Permission(
                "only the room admin may delete it".to_string(),
            ));
        }

        self.rooms.delete(room_id)?;
        info!("room '{}' deleted", room.name);
        Ok(())
    }

    /// Rooms owned by the given admin.
    pub fn rooms_for_admin(&self, user_id: &str) -> Result<Vec<Room>> {
        let rooms = self.rooms.list()?;
        Ok(rooms.into_iter().filter(|r| r.admin_id == user_id).collect())
    }

    /// Rooms the given user has joined.
    pub fn rooms_for_member(&self, user_id: &str) -> Result<Vec<Room>> {
        let rooms = self.rooms.list()?;
        Ok(rooms.into_iter().filter(|r| r.is_member(user_id)).collect())
    }

    /// Aggregate numbers across an admin's rooms.
    pub fn stats_for_admin(&self, user_id: &str) -> Result<RoomStats> {
        let rooms = self.rooms_for_admin(user_id)?;
        Ok(RoomStats {
            rooms: rooms.len(),
            pdfs: rooms.iter().map(|r| r.pdfs.len()).sum(),
            members: rooms.iter().map(|r| r.members.len()).sum(),
            total_views: rooms.iter().map(|r| r.views).sum(),
        })
    }
}

/// Template content for a simulated upload.
fn sample_content(name: &str) -> String {
    format!(
        "This is a simulated PDF content for \"{name}\".\n\n\
         In a real application, this would contain the actual PDF content \
         that users can view, copy, and export.\n\n\
         Key Features:\n\
         - Secure document sharing\n\
         - Room activity tracking\n\
         - User access management\n\
         - PDF viewing capabilities\n\n\
         This content can be edited by both admins and users, providing \
         collaborative document management capabilities."
    )
}
