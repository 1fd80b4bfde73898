//! Room, document, and activity types for PDFRooms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;

/// A shared document inside a room.
///
/// Content is plain text standing in for PDF bytes; there is no parsing
/// or rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfDocument {
    /// Unique document ID.
    pub id: String,
    /// Display filename.
    pub name: String,
    /// Display size (e.g., "2.5MB").
    pub size: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
    /// Number of times viewed.
    #[serde(default)]
    pub views: u64,
    /// Document content.
    #[serde(default)]
    pub content: String,
    /// When the content was last edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
    /// Display name of the last editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    /// Summary of the last edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edit_description: Option<String>,
}

impl PdfDocument {
    /// Create a new document with a fresh ID and zero views.
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size: size.into(),
            uploaded_at: now,
            views: 0,
            content: content.into(),
            last_edited_at: None,
            last_edited_by: None,
            last_edit_description: None,
        }
    }
}

/// Kind of room activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// A member joined the room.
    Join,
    /// A PDF was uploaded.
    Upload,
    /// A PDF was viewed.
    View,
    /// A PDF's content was edited.
    Edit,
}

impl ActivityKind {
    /// Get the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Join => "join",
            ActivityKind::Upload => "upload",
            ActivityKind::View => "view",
            ActivityKind::Edit => "edit",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" => Ok(ActivityKind::Join),
            "upload" => Ok(ActivityKind::Upload),
            "view" => Ok(ActivityKind::View),
            "edit" => Ok(ActivityKind::Edit),
            _ => Err(format!("unknown activity kind: {s}")),
        }
    }
}

/// One entry in a room's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Unique entry ID.
    pub id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Acting user's ID.
    pub user_id: String,
    /// Acting user's email.
    pub user_email: String,
    /// Acting user's display name.
    pub user_name: String,
    /// Document involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_id: Option<String>,
    /// Document name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_name: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    /// Create a new entry for the acting user.
    pub fn new(
        kind: ActivityKind,
        user: &User,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            user_id: user.id.clone(),
            user_email: user.email.clone(),
            user_name: user.name.clone(),
            pdf_id: None,
            pdf_name: None,
            description: description.into(),
            timestamp: now,
        }
    }

    /// Attach the document this entry concerns.
    pub fn with_pdf(mut self, pdf_id: impl Into<String>, pdf_name: impl Into<String>) -> Self {
        self.pdf_id = Some(pdf_id.into());
        self.pdf_name = Some(pdf_name.into());
        self
    }
}

/// A passkey-protected room of shared documents.
///
/// Collection fields default to empty so rooms stored before a field
/// existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room ID.
    pub id: String,
    /// Room name.
    pub name: String,
    /// Room description.
    #[serde(default)]
    pub description: String,
    /// Join code, uppercase alphanumeric.
    pub passkey: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// ID of the owning admin.
    pub admin_id: String,
    /// Shared documents.
    #[serde(default)]
    pub pdfs: Vec<PdfDocument>,
    /// Member user IDs (the owning admin is not listed).
    #[serde(default)]
    pub members: Vec<String>,
    /// Total view count across the room.
    #[serde(default)]
    pub views: u64,
    /// Activity history, oldest first.
    #[serde(default)]
    pub activity_log: Vec<ActivityEntry>,
}

impl Room {
    /// Create a new empty room owned by the given admin.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        passkey: impl Into<String>,
        admin_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            passkey: passkey.into(),
            created_at: now,
            admin_id: admin_id.into(),
            pdfs: Vec::new(),
            members: Vec::new(),
            views: 0,
            activity_log: Vec::new(),
        }
    }

    /// Whether the user has joined this room.
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    /// Find a document by ID.
    pub fn find_pdf(&self, pdf_id: &str) -> Option<&PdfDocument> {
        self.pdfs.iter().find(|p| p.id == pdf_id)
    }

    /// Find a document by ID for mutation.
    pub fn find_pdf_mut(&mut self, pdf_id: &str) -> Option<&mut PdfDocument> {
        self.pdfs.iter_mut().find(|p| p.id == pdf_id)
    }
}

/// Aggregate numbers for an admin's rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomStats {
    /// Number of rooms owned.
    pub rooms: usize,
    /// Documents across all owned rooms.
    pub pdfs: usize,
    /// Members across all owned rooms.
    pub members: usize,
    /// Views across all owned rooms.
    pub total_views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn test_user() -> User {
        User::new("Jane", "jane@example.com", Role::User, Utc::now())
    }

    #[test]
    fn test_activity_kind_round_trip() {
        for kind in [
            ActivityKind::Join,
            ActivityKind::Upload,
            ActivityKind::View,
            ActivityKind::Edit,
        ] {
            assert_eq!(ActivityKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(ActivityKind::from_str("delete").is_err());
    }

    #[test]
    fn test_activity_entry_serializes_kind_as_type() {
        let entry = ActivityEntry::new(ActivityKind::Join, &test_user(), "joined", Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"join\""));
        // Absent document fields are omitted entirely
        assert!(!json.contains("pdfId"));
    }

    #[test]
    fn test_activity_entry_with_pdf() {
        let entry = ActivityEntry::new(ActivityKind::View, &test_user(), "viewed", Utc::now())
            .with_pdf("pdf-1", "Guide.pdf");
        assert_eq!(entry.pdf_id.as_deref(), Some("pdf-1"));
        assert_eq!(entry.pdf_name.as_deref(), Some("Guide.pdf"));
    }

    #[test]
    fn test_room_new() {
        let room = Room::new("CS 101", "Course materials", "CS101A", "admin-1", Utc::now());
        assert_eq!(room.passkey, "CS101A");
        assert_eq!(room.admin_id, "admin-1");
        assert!(room.pdfs.is_empty());
        assert!(room.members.is_empty());
        assert_eq!(room.views, 0);
    }

    #[test]
    fn test_room_is_member() {
        let mut room = Room::new("CS 101", "", "CS101A", "admin-1", Utc::now());
        assert!(!room.is_member("user-1"));
        room.members.push("user-1".to_string());
        assert!(room.is_member("user-1"));
    }

    #[test]
    fn test_room_find_pdf() {
        let mut room = Room::new("CS 101", "", "CS101A", "admin-1", Utc::now());
        let pdf = PdfDocument::new("Guide.pdf", "1.2MB", "text", Utc::now());
        let pdf_id = pdf.id.clone();
        room.pdfs.push(pdf);

        assert!(room.find_pdf(&pdf_id).is_some());
        assert!(room.find_pdf("missing").is_none());
    }

    #[test]
    fn test_room_tolerates_missing_collections() {
        // A room stored before activity logs existed
        let json = r#"{
            "id": "room-1",
            "name": "Old Room",
            "passkey": "ABC123",
            "createdAt": "2024-01-01T00:00:00Z",
            "adminId": "admin-1"
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert!(room.pdfs.is_empty());
        assert!(room.members.is_empty());
        assert!(room.activity_log.is_empty());
        assert_eq!(room.views, 0);
    }

    #[test]
    fn test_pdf_document_new() {
        let pdf = PdfDocument::new("Guide.pdf", "1.2MB", "text", Utc::now());
        assert_eq!(pdf.views, 0);
        assert!(pdf.last_edited_at.is_none());
        assert!(!pdf.id.is_empty());
    }
}
