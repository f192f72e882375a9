use std::fmt;

use serde::Serialize;

/// A member's rank inside a group. 0 is the default member rank and 2 is
/// admin; the server stores whatever integer it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rank(pub i32);

impl Rank {
    pub const MEMBER: Rank = Rank(0);
    pub const ADMIN: Rank = Rank(2);

    pub fn label(self) -> String {
        match self {
            Rank::MEMBER => "member".to_string(),
            Rank::ADMIN => "admin".to_string(),
            Rank(other) => format!("rank {other}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
