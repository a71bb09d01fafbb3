pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::WorkbenchConfig};

pub use crate::core::{
    chapter_scaffold::ChapterScaffold,
    scaffold::ScaffoldEngine,
    verify::{list_chapters, verify_chapter, ChapterReport},
};
pub use crate::domain::{
    card::{Card, Rank, Suit},
    deck::{high_card, FrenchDeck},
    model::{ChapterId, Variant},
    vector::Vector,
};
pub use crate::utils::error::{Result, WorkbenchError};
