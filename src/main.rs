use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use cv_rank::core::engine::DEFAULT_REFERENCE_YEAR;
use cv_rank::utils::{logger, validation::Validate};
use cv_rank::{
    CliConfig, LocalStorage, PipelineRunner, RankError, RankingConfig, RankingEngine,
    RankingPipeline, ScoringSettings,
};

fn main() {
    let config = CliConfig::parse();

    let file_config = match config.config.as_deref().map(RankingConfig::from_file).transpose() {
        Ok(file_config) => file_config.unwrap_or_default(),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if file_config.json_logging() {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cv-rank CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(err) = run(config, file_config) {
        let Some(e) = err.downcast_ref::<RankError>() else {
            tracing::error!("❌ Ranking failed: {:#}", err);
            eprintln!("❌ {:#}", err);
            std::process::exit(1);
        };

        tracing::error!(
            "❌ Ranking failed: {:#} (Category: {:?}, Severity: {:?})",
            err,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(mut config: CliConfig, file_config: RankingConfig) -> anyhow::Result<()> {
    file_config
        .validate()
        .context("Settings file failed validation")?;

    config.merge_file(&file_config);
    let config = config.with_defaults(chrono::Local::now().year());
    config.validate().context("Command line failed validation")?;

    let settings = ScoringSettings {
        reference_year: config.reference_year.unwrap_or(DEFAULT_REFERENCE_YEAR),
    };
    let tables = file_config.scoring_tables();
    tracing::info!(
        tables = %tables.version,
        reference_year = settings.reference_year,
        "🔧 Scoring configuration loaded"
    );

    let engine = RankingEngine::new(tables, settings);
    let pipeline = RankingPipeline::new(LocalStorage::default(), config, engine);
    let output = PipelineRunner::new(pipeline).run()?;

    println!("{}", output.report);
    for path in &output.written {
        println!("📁 Output saved to: {}", path);
    }
    Ok(())
}
