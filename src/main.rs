use clap::Parser;
use fluent_workbench::config::{Command, OutputFormat, Subject};
use fluent_workbench::core::subjects::{self, DeckOptions};
use fluent_workbench::core::{export, walkthrough, ConfigProvider};
use fluent_workbench::utils::error::ErrorSeverity;
use fluent_workbench::utils::{logger, validation::Validate};
use fluent_workbench::{
    list_chapters, verify_chapter, ChapterId, ChapterScaffold, CliConfig, LocalStorage, Result,
    ScaffoldEngine, Suit, WorkbenchConfig, WorkbenchError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = WorkbenchConfig::load_or_default(&cli.config)?;

    // 應用命令列覆蓋設定
    if let Some(root) = &cli.root {
        config.set_root(root.clone());
        tracing::debug!("Workspace root overridden to: {}", root);
    }

    match cli.command {
        Command::Init {
            chapter,
            title,
            force,
            variants,
            dry_run,
        } => {
            if !variants.is_empty() {
                config.set_variants(variants);
            }
            if force {
                config.scaffold.force = true;
            }
            config.validate()?;

            let chapter = ChapterId::parse(&chapter)?;
            let storage = LocalStorage::new(workspace_root(&config));
            let mut scaffold = ChapterScaffold::new(storage, config, chapter);
            if let Some(title) = title {
                scaffold = scaffold.with_title(title);
            }
            let engine = ScaffoldEngine::new(scaffold);

            if dry_run {
                tracing::info!("🔍 DRY RUN MODE - nothing will be written");
                for file in engine.dry_run().await? {
                    println!("{}", file.relative_path);
                }
                return Ok(());
            }

            let report = engine.run().await?;
            for path in &report.created {
                println!("created     {}", path);
            }
            for path in &report.overwritten {
                println!("overwritten {}", path);
            }
            for path in &report.skipped {
                println!("kept        {}", path);
            }
            println!("✅ Chapter workspace ready: {}", report.chapter_dir);
        }
        Command::Verify { chapter } => {
            config.validate()?;
            let chapter = ChapterId::parse(&chapter)?;
            let storage = LocalStorage::new(workspace_root(&config));
            let report = verify_chapter(&storage, &config, &chapter).await?;

            if report.is_complete() {
                println!("✅ {} is complete", chapter);
            } else {
                for problem in report.problems() {
                    println!("⚠️  {}", problem);
                }
                return Err(WorkbenchError::WorkspaceError {
                    path: chapter.dir_name(),
                    message: format!("{} problems found", report.problems().len()),
                });
            }
        }
        Command::List => {
            let storage = LocalStorage::new(workspace_root(&config));
            let chapters = list_chapters(&storage).await?;
            if chapters.is_empty() {
                println!("No chapter workspaces under {}", storage.base_path().display());
            }
            for chapter in chapters {
                println!("{}  {}", chapter, chapter.default_title());
            }
        }
        Command::Deck {
            classic,
            shuffle,
            seed,
            sort,
            suit,
            format,
        } => {
            let deck = subjects::build_deck(&DeckOptions {
                classic,
                shuffle,
                seed,
                sort: sort.map(Into::into),
            });
            let cards = match suit {
                Some(name) => {
                    let suit = Suit::from_name(&name).ok_or_else(|| {
                        WorkbenchError::InvalidConfigValueError {
                            field: "--suit".to_string(),
                            value: name.clone(),
                            reason: "Expected spades, hearts, diamonds or clubs".to_string(),
                        }
                    })?;
                    deck.cards_by_suit(suit)
                }
                None => deck.into_vec(),
            };

            match format {
                OutputFormat::Text => {
                    for (i, card) in cards.iter().enumerate() {
                        println!("{:>2}: {}", i, card);
                    }
                }
                OutputFormat::Csv => print!("{}", export::cards_to_csv(&cards)?),
                OutputFormat::Json => println!("{}", export::cards_to_json(&cards)?),
            }
        }
        Command::Vector { components } => {
            for line in subjects::describe_vectors(&components)? {
                println!("{}", line);
            }
        }
        Command::Walkthrough { subject } => {
            let walks = match subject {
                Subject::Deck => vec![walkthrough::deck_walkthrough(&mut rand::thread_rng())?],
                Subject::Vector => vec![walkthrough::vector_walkthrough()?],
                Subject::Compare => vec![
                    walkthrough::compare_decks()?,
                    walkthrough::performance_comparison(),
                    walkthrough::compare_vectors()?,
                ],
            };
            let rendered: Vec<String> = walks.iter().map(|walk| walk.render()).collect();
            print!("{}", rendered.join("\n"));
        }
    }

    Ok(())
}

fn workspace_root(config: &WorkbenchConfig) -> String {
    config.workspace_root().to_string()
}
