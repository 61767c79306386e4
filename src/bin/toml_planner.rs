use anyhow::Context;
use clap::Parser;
use stage_planner::core::{AllocationMethod, ConfigProvider};
use stage_planner::utils::error::ErrorSeverity;
use stage_planner::utils::{logger, validation::Validate};
use stage_planner::{LocalStorage, PlannerEngine, Schedule, SchedulePipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-planner")]
#[command(about = "Stage planner driven by a TOML project file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "planner.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the project start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Override the allocation method
    #[arg(long, value_enum)]
    method: Option<AllocationMethod>,

    /// Print the schedule without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logging() {
        logger::init_json_logger(if args.verbose { "debug" } else { config.log_level() });
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // Command-line overrides win over the file
    if let Some(start_date) = &args.start_date {
        config.project.start_date = Some(start_date.clone());
        tracing::info!("🔧 Start date overridden to: {}", start_date);
    }
    if let Some(method) = args.method {
        config.project.method = method;
        tracing::info!("🔧 Method overridden to: {}", method);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let pipeline = SchedulePipeline::new(LocalStorage::default(), config);
    let engine = PlannerEngine::new(pipeline);

    let result = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        engine.plan().await.map(|output| {
            display_schedule(&output.schedule);
            String::new()
        })
    } else {
        engine.run().await
    };

    match result {
        Ok(output_path) if !output_path.is_empty() => {
            println!("✅ Schedule planned");
            println!("📁 Output saved to: {}", output_path);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(
                "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Project: {}", config.project.name);
    println!(
        "  Start: {}",
        config.project.start_date.as_deref().unwrap_or("-")
    );
    println!("  Duration: {} days", config.total_duration_days());
    println!("  Method: {}", config.method());
    println!("  Lots: {}", config.lots_file());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!();
}

fn display_schedule(schedule: &Schedule) {
    println!("🗓️ Planned stages:");
    for stage in &schedule.stages {
        let range = stage
            .display_range()
            .unwrap_or_else(|_| format!("{} - {}", stage.start_date, stage.end_date));
        println!(
            "  {:<12} {:>4} days  {}",
            stage.lot_id.to_string(),
            stage.duration_days,
            range
        );
    }
    println!(
        "  Total: {} days (requested {})",
        schedule.allocated_duration_days, schedule.requested_duration_days
    );
    if let Some(end) = schedule.project_end_date {
        println!("  Project end: {}", end);
    }
    println!();
}
