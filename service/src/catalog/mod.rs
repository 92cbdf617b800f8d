//! Book-catalogue domain: models, persistence, and the award service.

pub mod award;
pub mod model;
pub mod repo;
pub mod service;

pub use award::{Award, AwardName};
pub use model::{Book, GenreName, LanguageName, PublishingFormat};
