//! Domain records - the view model rebuilt from ledger objects.

mod comment;
mod ids;
mod manager;
mod post;
mod profile;

pub use comment::Comment;
pub use ids::{Address, IdParseError, ObjectId};
pub use manager::ManagerTables;
pub use post::{Post, PostDetail};
pub use profile::{Profile, ProfileLookup};
