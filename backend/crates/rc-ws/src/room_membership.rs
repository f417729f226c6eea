use rc_proto::UserRef;

use std::collections::HashSet;

/// Room membership held by one connection.
///
/// A connection can sit in several project rooms at once; joining a room
/// it already occupies is a no-op, and leaving clears every room in one
/// step. The user identity is captured on the first successful join.
#[derive(Debug, Clone, Default)]
pub struct RoomMembership {
    projects: HashSet<String>,
    user: Option<UserRef>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room. Returns false when the connection was already a member.
    pub fn join(&mut self, project: &str, user: UserRef) -> bool {
        if self.user.is_none() {
            self.user = Some(user);
        }
        self.projects.insert(project.to_string())
    }

    /// Drop every room at once. Returns the rooms that were occupied.
    pub fn leave_all(&mut self) -> Vec<String> {
        self.projects.drain().collect()
    }

    pub fn is_member(&self, project: &str) -> bool {
        self.projects.contains(project)
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(String::as_str)
    }

    pub fn user(&self) -> Option<&UserRef> {
        self.user.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
