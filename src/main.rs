use clap::Parser;
use sleft::config::LogFormat;
use sleft::core::adjacency::{
    calculate_fit_score_with, get_adjacent_specialties, known_specialties, search_phrase,
};
use sleft::core::export::export_brief;
use sleft::domain::model::BriefRequest;
use sleft::utils::error::ErrorSeverity;
use sleft::utils::{logger, validation::Validate};
use sleft::{AppConfig, Cli, Command, LocalStorage, SleftError};

fn load_config(cli: &Cli) -> Result<AppConfig, SleftError> {
    match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => Ok(AppConfig::from_env()),
    }
}

fn exit_with(e: &SleftError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 4,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match config.logging.format {
        LogFormat::Json => logger::init_json_logger(cli.verbose),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
    }
    if cli.verbose {
        tracing::debug!("CLI: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
                if let Err(e) = config.validate() {
                    exit_with(&e);
                }
            }
            sleft::run_server(&config).await?;
        }
        Command::Brief {
            specialty,
            location,
            practice_name,
            email,
            output,
            seed,
        } => {
            if seed.is_some() {
                config.search.seed = seed;
            }
            let service = match sleft::app::build_brief_service(&config) {
                Ok(service) => service,
                Err(e) => exit_with(&e),
            };

            let request = BriefRequest {
                specialty: Some(specialty),
                location: Some(location),
                email,
                practice_name,
            };
            let brief = match service.generate_brief(&request).await {
                Ok(brief) => brief,
                Err(e) => exit_with(&e),
            };

            if let Some(dir) = output {
                let storage = LocalStorage::new(dir.clone());
                match export_brief(&storage, &brief).await {
                    Ok(files) => tracing::info!("📁 Wrote {} to {}", files.join(", "), dir),
                    Err(e) => exit_with(&e),
                }
            }

            println!("{}", serde_json::to_string_pretty(&brief)?);
        }
        Command::Adjacency { specialty } => {
            let partners = get_adjacent_specialties(&specialty);
            if partners.is_empty() {
                exit_with(&SleftError::UnknownSpecialty { specialty });
            }
            let jitter = sleft::app::build_jitter(config.search.seed);
            println!("Referral partners for {}:", specialty);
            for (index, partner) in partners.iter().enumerate() {
                println!(
                    "  {}. {:<24} fit {:>3}  (search: \"{}\")",
                    index + 1,
                    partner,
                    calculate_fit_score_with(&specialty, partner, jitter.as_ref()),
                    search_phrase(partner)
                );
            }
        }
        Command::Specialties => {
            for specialty in known_specialties() {
                println!("{}", specialty);
            }
        }
    }

    Ok(())
}
