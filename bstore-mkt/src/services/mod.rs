//! Service layer: media persistence, catalog queries, marketplace facade

pub mod catalog;
pub mod marketplace;
pub mod media;

pub use marketplace::Marketplace;
pub use media::MediaStore;
