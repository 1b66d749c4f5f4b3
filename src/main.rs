use clap::Parser;
use sheet_sync::app::pipelines::sheet_pipeline::planned_artifact_names;
use sheet_sync::domain::model::ArtifactFormat;
use sheet_sync::utils::{logger, validation::Validate};
use sheet_sync::{
    CliArgs, LocalSink, SheetPipeline, SheetsClient, SyncConfig, SyncEngine, SyncError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting sheet-sync");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let config = match args.load_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    display_config_summary(&config);

    if args.check {
        return check_connection(&config).await;
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        for name in planned_artifact_names(&config) {
            println!("  would write {}/{}", config.output.dir, name);
        }
        return Ok(());
    }

    // 創建存儲和管道
    let sink = LocalSink::new(config.output.dir.clone());
    let pipeline = match SheetPipeline::new(sink, config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e),
    };
    let engine = SyncEngine::new(pipeline);

    match engine.run().await {
        Ok(written) => {
            println!("✅ Sync completed, {} files written", written.len());
            for path in &written {
                println!("📁 {}", path);
            }
            print_cdn_urls(engine.pipeline().config());
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

async fn check_connection(config: &SyncConfig) -> anyhow::Result<()> {
    println!("🧪 Testing Google Sheets connection...");
    let client = match SheetsClient::new(&config.sheet) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };

    match client.probe().await {
        Ok(()) => {
            println!("✅ Google Sheets connection OK");
            println!("   Sheet: \"{}\"", client.tab());
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &SyncError) -> ! {
    tracing::error!(
        "❌ Sync failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn display_config_summary(config: &SyncConfig) {
    println!("📋 Configuration Summary:");
    println!("  Sheet: {} / {}", config.sheet.document_id, config.sheet.tab);
    match config.sheet.fetch_range() {
        Ok(range) => println!("  Range: {}", range),
        Err(_) => println!("  Range: (invalid)"),
    }
    println!("  Output: {}", config.output.dir);
    if config.is_multi_destination() {
        for destination in &config.destinations {
            let countries = if destination.serves_all_countries() {
                "all countries".to_string()
            } else {
                destination.countries.join(", ")
            };
            println!(
                "  Shop {}: {} [{} / {}]",
                destination.name, countries, destination.currency, destination.language
            );
        }
    }
    println!();
}

fn print_cdn_urls(config: &SyncConfig) {
    let Some(cdn) = &config.cdn else {
        return;
    };

    println!("\n📦 CDN URLs (after pushing to GitHub):");
    let min_json = format!(".{}", ArtifactFormat::CompactJson.extension());
    let csv = format!(".{}", ArtifactFormat::Csv.extension());
    for name in planned_artifact_names(config) {
        if name.ends_with(&min_json) || name.ends_with(&csv) {
            println!("  {}", cdn.url_for(&name));
        }
    }
}
