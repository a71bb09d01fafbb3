use anyhow::Result;
use fluent_workbench::core::chapter_scaffold::MANIFEST_FILE;
use fluent_workbench::core::{ChapterManifest, Storage};
use fluent_workbench::{
    list_chapters, verify_chapter, ChapterId, ChapterScaffold, LocalStorage, ScaffoldEngine,
    Variant, WorkbenchConfig, WorkbenchError,
};
use tempfile::TempDir;

async fn init_chapter(root: &TempDir, name: &str, config: WorkbenchConfig) -> Result<()> {
    let storage = LocalStorage::new(root.path());
    let scaffold = ChapterScaffold::new(storage, config, ChapterId::parse(name)?);
    ScaffoldEngine::new(scaffold).run().await?;
    Ok(())
}

/// 建立完整章節工作區並驗證結構
#[tokio::test]
async fn test_init_then_verify_complete_chapter() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = WorkbenchConfig::default();

    let storage = LocalStorage::new(temp_dir.path());
    let scaffold = ChapterScaffold::new(
        storage.clone(),
        config.clone(),
        ChapterId::parse("ch01_data_model")?,
    )
    .with_title("The Python Data Model");
    let report = ScaffoldEngine::new(scaffold).run().await?;

    assert_eq!(report.chapter_dir, "ch01_data_model");
    assert_eq!(report.created.len(), 7);
    assert!(report.skipped.is_empty());

    for variant in Variant::all() {
        let dir = temp_dir.path().join("ch01_data_model").join(variant.dir_name());
        assert!(dir.is_dir(), "{} should exist", dir.display());
    }

    let manifest_raw = std::fs::read_to_string(
        temp_dir.path().join("ch01_data_model").join(MANIFEST_FILE),
    )?;
    let manifest: ChapterManifest = toml::from_str(&manifest_raw)?;
    assert_eq!(manifest.title, "The Python Data Model");
    assert_eq!(manifest.book, "Fluent Python");

    let chapter = ChapterId::parse("ch01_data_model")?;
    let verification = verify_chapter(&storage, &config, &chapter).await?;
    assert!(verification.is_complete(), "{:?}", verification.problems());
    Ok(())
}

#[tokio::test]
async fn test_rerun_keeps_existing_notes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    init_chapter(&temp_dir, "ch02_sequences", WorkbenchConfig::default()).await?;

    let notes = temp_dir.path().join("ch02_sequences").join("comparison.md");
    std::fs::write(&notes, "hand-written observations")?;

    let storage = LocalStorage::new(temp_dir.path());
    let scaffold = ChapterScaffold::new(
        storage,
        WorkbenchConfig::default(),
        ChapterId::parse("ch02_sequences")?,
    );
    let report = ScaffoldEngine::new(scaffold).run().await?;

    assert!(report.created.is_empty());
    assert_eq!(report.skipped.len(), 7);
    assert_eq!(std::fs::read_to_string(&notes)?, "hand-written observations");
    Ok(())
}

#[tokio::test]
async fn test_verify_reports_removed_variant_and_notes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    init_chapter(&temp_dir, "ch01_data_model", WorkbenchConfig::default()).await?;

    let chapter_dir = temp_dir.path().join("ch01_data_model");
    std::fs::remove_dir_all(chapter_dir.join("extensions"))?;
    std::fs::remove_file(chapter_dir.join("comparison.md"))?;

    let storage = LocalStorage::new(temp_dir.path());
    let chapter = ChapterId::parse("ch01_data_model")?;
    let report = verify_chapter(&storage, &WorkbenchConfig::default(), &chapter).await?;

    assert!(!report.is_complete());
    assert_eq!(report.missing_variants, vec![Variant::Extensions]);
    assert_eq!(report.missing_notes, vec!["comparison.md"]);
    assert!(report.manifest_problems.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_verify_does_not_accept_file_in_place_of_variant_dir() -> Result<()> {
    let temp_dir = TempDir::new()?;
    init_chapter(&temp_dir, "ch01_data_model", WorkbenchConfig::default()).await?;

    let chapter_dir = temp_dir.path().join("ch01_data_model");
    std::fs::remove_dir_all(chapter_dir.join("robust"))?;
    std::fs::write(chapter_dir.join("robust"), "not a directory")?;

    let storage = LocalStorage::new(temp_dir.path());
    let chapter = ChapterId::parse("ch01_data_model")?;
    let report = verify_chapter(&storage, &WorkbenchConfig::default(), &chapter).await?;

    assert_eq!(report.missing_variants, vec![Variant::Robust]);
    Ok(())
}

#[tokio::test]
async fn test_verify_flags_broken_manifest() -> Result<()> {
    let temp_dir = TempDir::new()?;
    init_chapter(&temp_dir, "ch03_dicts", WorkbenchConfig::default()).await?;

    let storage = LocalStorage::new(temp_dir.path());
    storage
        .write_file("ch03_dicts/chapter.toml", b"chapter = \"not a chapter\"")
        .await?;

    let chapter = ChapterId::parse("ch03_dicts")?;
    let report = verify_chapter(&storage, &WorkbenchConfig::default(), &chapter).await?;
    assert!(report.manifest.is_none());
    assert_eq!(report.manifest_problems.len(), 1);
    assert!(report.missing_variants.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_verify_missing_chapter_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    let chapter = ChapterId::parse("ch09_decorators")?;

    let err = verify_chapter(&storage, &WorkbenchConfig::default(), &chapter)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkbenchError::WorkspaceError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_list_chapters_sorted_and_filtered() -> Result<()> {
    let temp_dir = TempDir::new()?;
    init_chapter(&temp_dir, "ch10_functions", WorkbenchConfig::default()).await?;
    init_chapter(&temp_dir, "ch01_data_model", WorkbenchConfig::default()).await?;
    std::fs::create_dir(temp_dir.path().join("scratch"))?;
    std::fs::create_dir(temp_dir.path().join("ch3_typo"))?;

    let storage = LocalStorage::new(temp_dir.path());
    let names: Vec<String> = list_chapters(&storage)
        .await?
        .iter()
        .map(ChapterId::dir_name)
        .collect();

    assert_eq!(names, vec!["ch01_data_model", "ch10_functions"]);
    Ok(())
}

#[tokio::test]
async fn test_list_chapters_without_root() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().join("not-created"));
    assert!(list_chapters(&storage).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_partial_variant_configuration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = WorkbenchConfig::from_toml_str(
        r#"
[scaffold]
variants = ["original", "robust"]
notes_file = "differences.md"
"#,
    )?;
    init_chapter(&temp_dir, "ch05_data_classes", config.clone()).await?;

    let chapter_dir = temp_dir.path().join("ch05_data_classes");
    assert!(chapter_dir.join("differences.md").is_file());
    assert!(chapter_dir.join("robust").is_dir());
    assert!(!chapter_dir.join("exercises").exists());

    let storage = LocalStorage::new(temp_dir.path());
    let report = verify_chapter(&storage, &config, &ChapterId::parse("ch05_data_classes")?).await?;
    assert!(report.is_complete());
    Ok(())
}
