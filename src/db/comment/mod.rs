pub mod get;
pub mod patch;
pub mod post;
pub mod put;
