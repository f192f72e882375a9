mod ids;
mod priority;
mod rank;

pub use ids::{CommentId, GroupId, TicketId, UserId};
pub use priority::Priority;
pub use rank::Rank;
