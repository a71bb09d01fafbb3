use crate::core::{ConfigProvider, Scaffold, Storage};
use crate::domain::model::{
    ChapterId, ChapterManifest, FileKind, PlannedFile, RenderedFile, Variant, WriteReport,
};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

pub const CHAPTER_NOTES_FILE: &str = "README.md";
pub const MANIFEST_FILE: &str = "chapter.toml";
pub const VARIANT_README_FILE: &str = "README.md";

/// Lays out one chapter workspace: notes, manifest and a directory per variant.
pub struct ChapterScaffold<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    chapter: ChapterId,
    title: String,
    created_at: DateTime<Utc>,
}

impl<S: Storage, C: ConfigProvider> ChapterScaffold<S, C> {
    pub fn new(storage: S, config: C, chapter: ChapterId) -> Self {
        let title = chapter.default_title();
        Self {
            storage,
            config,
            chapter,
            title,
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    fn variants(&self) -> Result<Vec<Variant>> {
        self.config
            .variant_names()
            .iter()
            .map(|name| name.parse())
            .collect()
    }

    fn path(&self, file: &str) -> String {
        format!("{}/{}", self.chapter.dir_name(), file)
    }

    fn manifest(&self) -> Result<ChapterManifest> {
        Ok(ChapterManifest {
            chapter: self.chapter.clone(),
            title: self.title.clone(),
            book: self.config.book().to_string(),
            created_at: self.created_at,
            variants: self.variants()?,
        })
    }

    fn render_chapter_notes(&self, variants: &[Variant]) -> String {
        let mut lines = vec![
            format!("# Chapter {}: {}", self.chapter.number(), self.title),
            String::new(),
            format!("Notes for *{}*.", self.config.book()),
            String::new(),
            "## Variants".to_string(),
            String::new(),
        ];
        for variant in variants {
            lines.push(format!(
                "- [{}]({}/): {}",
                variant,
                variant.dir_name(),
                variant.description()
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "Differences between the variants are tracked in [{}]({}).",
            self.config.notes_file(),
            self.config.notes_file()
        ));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_comparison_notes(&self, variants: &[Variant]) -> String {
        let mut lines = vec![
            format!("# {}: comparison notes", self.title),
            String::new(),
            "| Aspect | ".to_string()
                + &variants
                    .iter()
                    .map(|v| v.dir_name())
                    .collect::<Vec<_>>()
                    .join(" | ")
                + " |",
            "|---|".to_string() + &"---|".repeat(variants.len()),
        ];
        for aspect in ["Types", "Error handling", "Edge cases", "Performance"] {
            lines.push(format!("| {} |{}", aspect, " |".repeat(variants.len())));
        }
        lines.push(String::new());
        lines.push("## Observations".to_string());
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_variant_readme(&self, variant: Variant) -> String {
        format!(
            "# {} / {}\n\n{}\n",
            self.chapter.dir_name(),
            variant.dir_name(),
            variant.description()
        )
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Scaffold for ChapterScaffold<S, C> {
    async fn plan(&self) -> Result<Vec<PlannedFile>> {
        let variants = self.variants()?;

        let mut plan = vec![
            PlannedFile {
                relative_path: self.path(CHAPTER_NOTES_FILE),
                kind: FileKind::ChapterNotes,
            },
            PlannedFile {
                relative_path: self.path(self.config.notes_file()),
                kind: FileKind::ComparisonNotes,
            },
            PlannedFile {
                relative_path: self.path(MANIFEST_FILE),
                kind: FileKind::Manifest,
            },
        ];

        plan.extend(variants.into_iter().map(|variant| PlannedFile {
            relative_path: self.path(&format!("{}/{}", variant.dir_name(), VARIANT_README_FILE)),
            kind: FileKind::VariantReadme(variant),
        }));

        Ok(plan)
    }

    async fn render(&self, plan: Vec<PlannedFile>) -> Result<Vec<RenderedFile>> {
        let variants = self.variants()?;
        let mut rendered = Vec::with_capacity(plan.len());

        for file in plan {
            let contents = match file.kind {
                FileKind::ChapterNotes => self.render_chapter_notes(&variants),
                FileKind::ComparisonNotes => self.render_comparison_notes(&variants),
                FileKind::Manifest => toml::to_string_pretty(&self.manifest()?)?,
                FileKind::VariantReadme(variant) => self.render_variant_readme(variant),
            };
            tracing::debug!("Rendered {} ({} bytes)", file.relative_path, contents.len());
            rendered.push(RenderedFile {
                relative_path: file.relative_path,
                contents,
            });
        }

        Ok(rendered)
    }

    async fn write(&self, files: Vec<RenderedFile>) -> Result<WriteReport> {
        let mut report = WriteReport {
            chapter_dir: self.chapter.dir_name(),
            ..WriteReport::default()
        };

        for file in files {
            let exists = self.storage.exists(&file.relative_path).await;
            if exists && !self.config.force() {
                tracing::debug!("Keeping existing {}", file.relative_path);
                report.skipped.push(file.relative_path);
                continue;
            }

            self.storage
                .write_file(&file.relative_path, file.contents.as_bytes())
                .await?;

            if exists {
                tracing::warn!("Overwrote {}", file.relative_path);
                report.overwritten.push(file.relative_path);
            } else {
                report.created.push(file.relative_path);
            }
        }

        Ok(report)
    }
}
