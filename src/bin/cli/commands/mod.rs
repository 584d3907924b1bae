pub mod bookmarks;
pub mod cards;
pub mod quiz;
pub mod revision;
