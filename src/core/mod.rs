pub mod chapter_scaffold;
pub mod export;
pub mod ranking;
pub mod scaffold;
pub mod subjects;
pub mod verify;
pub mod walkthrough;

pub use crate::domain::model::{ChapterId, ChapterManifest, Variant, WriteReport};
pub use crate::domain::ports::{ConfigProvider, Scaffold, Storage};
pub use crate::utils::error::Result;
