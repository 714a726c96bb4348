use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sleft")]
#[command(about = "Referral-partner discovery: adjacency scoring, places search and strategy briefs")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file. Without it, configuration comes from the environment.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override `[server].bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate a strategy brief locally and print it as JSON
    Brief {
        #[arg(long)]
        specialty: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        practice_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Also write brief.json and sources.csv into this directory
        #[arg(long)]
        output: Option<String>,

        /// Pin fit-score jitter for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the referral partners of a specialty with fit scores
    Adjacency { specialty: String },
    /// List every known specialty
    Specialties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brief_command() {
        let cli = Cli::parse_from([
            "sleft",
            "brief",
            "--specialty",
            "Physical Therapy",
            "--location",
            "Austin, TX",
            "--seed",
            "7",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Command::Brief {
                specialty,
                location,
                seed,
                output,
                ..
            } => {
                assert_eq!(specialty, "Physical Therapy");
                assert_eq!(location, "Austin, TX");
                assert_eq!(seed, Some(7));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::parse_from(["sleft", "--config", "sleft.toml", "serve", "--bind", "0.0.0.0:9000"]);

        assert_eq!(cli.config.as_deref(), Some("sleft.toml"));
        assert!(matches!(
            cli.command,
            Command::Serve { bind: Some(ref b) } if b == "0.0.0.0:9000"
        ));
    }
}
