use crate::core::chapter_scaffold::{CHAPTER_NOTES_FILE, MANIFEST_FILE};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{ChapterId, ChapterManifest, Variant};
use crate::utils::error::{Result, WorkbenchError};

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterReport {
    pub chapter: ChapterId,
    pub manifest: Option<ChapterManifest>,
    pub missing_variants: Vec<Variant>,
    pub missing_notes: Vec<String>,
    pub manifest_problems: Vec<String>,
}

impl ChapterReport {
    pub fn is_complete(&self) -> bool {
        self.missing_variants.is_empty()
            && self.missing_notes.is_empty()
            && self.manifest_problems.is_empty()
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .missing_variants
            .iter()
            .map(|variant| format!("missing variant directory '{}'", variant))
            .collect();
        problems.extend(
            self.missing_notes
                .iter()
                .map(|file| format!("missing notes file '{}'", file)),
        );
        problems.extend(self.manifest_problems.iter().cloned());
        problems
    }
}

/// Checks a chapter workspace against its manifest, falling back to the
/// configured variants when the manifest is missing or unreadable.
pub async fn verify_chapter<S: Storage, C: ConfigProvider>(
    storage: &S,
    config: &C,
    chapter: &ChapterId,
) -> Result<ChapterReport> {
    let dir = chapter.dir_name();
    if !storage.exists(&dir).await {
        return Err(WorkbenchError::WorkspaceError {
            path: dir,
            message: "chapter directory does not exist".to_string(),
        });
    }

    let mut manifest_problems = Vec::new();
    let manifest_path = format!("{}/{}", dir, MANIFEST_FILE);
    let manifest = if storage.exists(&manifest_path).await {
        let raw = storage.read_file(&manifest_path).await?;
        match toml::from_str::<ChapterManifest>(&String::from_utf8_lossy(&raw)) {
            Ok(manifest) => {
                if &manifest.chapter != chapter {
                    manifest_problems.push(format!(
                        "manifest names chapter '{}' but lives in '{}'",
                        manifest.chapter, dir
                    ));
                }
                Some(manifest)
            }
            Err(e) => {
                tracing::warn!("Unreadable manifest {}: {}", manifest_path, e);
                manifest_problems
                    .push(format!("manifest is not valid: {}", e.to_string().trim()));
                None
            }
        }
    } else {
        manifest_problems.push(format!("missing manifest '{}'", MANIFEST_FILE));
        None
    };

    let expected_variants = match &manifest {
        Some(manifest) => manifest.variants.clone(),
        None => config
            .variant_names()
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Variant>>>()?,
    };

    // 變體必須是目錄，同名的一般檔案不算
    let variant_dirs = storage.list_dirs(&dir).await?;
    let missing_variants: Vec<Variant> = expected_variants
        .into_iter()
        .filter(|variant| !variant_dirs.iter().any(|d| d == variant.dir_name()))
        .collect();

    let mut missing_notes = Vec::new();
    for notes in [CHAPTER_NOTES_FILE, config.notes_file()] {
        if !storage.exists(&format!("{}/{}", dir, notes)).await {
            missing_notes.push(notes.to_string());
        }
    }

    let report = ChapterReport {
        chapter: chapter.clone(),
        manifest,
        missing_variants,
        missing_notes,
        manifest_problems,
    };
    tracing::debug!("Verified {}: {} problems", dir, report.problems().len());
    Ok(report)
}

/// Chapter workspaces under the root, ordered by chapter number.
pub async fn list_chapters<S: Storage>(storage: &S) -> Result<Vec<ChapterId>> {
    if !storage.exists("").await {
        tracing::warn!("Workspace root does not exist yet");
        return Ok(Vec::new());
    }

    let mut chapters: Vec<ChapterId> = storage
        .list_dirs("")
        .await?
        .into_iter()
        .filter_map(|name| match ChapterId::parse(&name) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::debug!("Ignoring non-chapter directory {}", name);
                None
            }
        })
        .collect();

    chapters.sort();
    Ok(chapters)
}
