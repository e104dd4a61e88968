pub mod auth;
pub mod dialogs;
pub mod discover;
pub mod drawer;
pub mod events;
pub mod feed;
pub mod search;
pub mod settings;
