use clap::Parser;
use lead_admin::core::id_gen::{SequentialIdGenerator, UuidIdGenerator};
use lead_admin::core::IdGenerator;
use lead_admin::utils::error::ErrorSeverity;
use lead_admin::utils::logger;
use lead_admin::utils::validation::{validate_path, Validate};
use lead_admin::{CsvImportPipeline, ImportEngine, LocalStorage, OutputFormat, Result};

#[derive(Parser, Debug)]
#[command(name = "lead-import")]
#[command(about = "Normalize a leads CSV into JSON or CSV")]
struct Args {
    /// CSV file to import
    #[arg(short, long)]
    input: String,

    /// Directory the output file is written to
    #[arg(short, long, default_value = "./output")]
    output_path: String,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Use sequential id suffixes instead of random UUIDs
    #[arg(long)]
    deterministic_ids: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Validate for Args {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("🚀 Starting lead import from: {}", args.input);

    if let Err(e) = args.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // LocalStorage 以輸出目錄為根，輸入檔改用絕對路徑
    let input = std::path::absolute(&args.input)?
        .to_string_lossy()
        .into_owned();
    let ids: Box<dyn IdGenerator> = if args.deterministic_ids {
        Box::new(SequentialIdGenerator::default())
    } else {
        Box::new(UuidIdGenerator)
    };

    let storage = LocalStorage::new(args.output_path.clone());
    let pipeline = CsvImportPipeline::new(storage, input, args.output_path.clone(), args.format, ids);
    let engine = ImportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Import completed successfully!");
            println!("✅ Import completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 1, // 輸入錯誤也要讓 shell 知道失敗
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
