//! Domain entities - the core business objects.

mod principal;
mod thumbnail;
mod user;

mod post;

pub use post::{MIN_DESCRIPTION_LEN, Post, PostChanges, PostDraft, PostEdit};
pub use principal::Principal;
pub use thumbnail::{MAX_THUMBNAIL_BYTES, ThumbnailUpload, stored_filename};
pub use user::User;
