use clap::{CommandFactory, Parser};
use svdb::utils::{logger, validation::Validate};
use svdb::{CliConfig, FileRegistryLoader, LookupEngine, SvdbError};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ svdb failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), SvdbError> {
    config.validate()?;

    let file_config = config.load_file_config()?;

    let Some(request) = config.lookup_request(file_config.as_ref()) else {
        println!("svdb, the service database.");
        println!("{}", CliConfig::command().render_help());
        return Ok(());
    };

    let location = config.database_location(file_config.as_ref())?;
    tracing::debug!("📁 Using database {}", location.path.display());

    let engine = LookupEngine::new(FileRegistryLoader::new(location));
    let report = engine.run(&request)?;

    for notice in report.notices() {
        eprintln!("{}", notice.user_friendly_message());
    }

    print!("{}", report.output);
    tracing::debug!("✅ {} services matched", report.matched);
    Ok(())
}
