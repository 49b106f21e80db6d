pub mod companies;
pub mod csv_parser;
pub mod export;
pub mod id_gen;
pub mod import;
pub mod listing;
pub mod normalizer;
pub mod upload;
pub mod users;

pub use crate::domain::model::{CanonicalField, Lead, LeadLinks, RawRow};
pub use crate::domain::ports::{ConfigProvider, IdGenerator, ImportPipeline, Storage};
pub use crate::utils::error::Result;
