use serde::{Deserialize, Serialize};

/// Collection path served by the directory service.
pub const ACTIVITIES_PATH: &str = "activities";
/// Query parameter used to defeat intermediate caches on directory reads.
pub const CACHE_BUST_PARAM: &str = "_";
/// Query parameter naming the participant of a mutation.
pub const EMAIL_PARAM: &str = "email";

/// Success body of a signup or unregister call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationAck {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Signup,
    Unregister,
}

impl MutationKind {
    /// Trailing path segment of `POST /activities/{name}/{segment}`.
    pub fn path_segment(self) -> &'static str {
        match self {
            MutationKind::Signup => "signup",
            MutationKind::Unregister => "unregister",
        }
    }
}
