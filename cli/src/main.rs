use clap::{Args, Parser, Subcommand};
use wellcheck_core::RiskAnswers;

mod commands;
mod util;

use commands::triage::Target;

#[derive(Parser)]
#[command(
    name = "wellcheck",
    version,
    about = "WellCheck CLI: symptom advice and a quick risk check"
)]
struct Cli {
    /// API base URL (used by `health` and by `--remote`)
    #[arg(
        long,
        global = true,
        env = "WELLCHECK_API_URL",
        default_value = "http://localhost:5001"
    )]
    api_url: String,

    /// Run against the server at --api-url instead of in-process
    #[arg(long, global = true)]
    remote: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Classify a free-text symptom description and print advice
    Classify {
        /// e.g. "sore throat since yesterday"
        text: String,
    },
    /// Print the advice for a symptom tag (e.g. "fever", "muscle cramps")
    Advice {
        tag: String,
    },
    /// Score the five-question risk check
    Risk(RiskArgs),
    /// Print the time-of-day greeting
    Greet {
        /// IANA time zone (local mode only)
        #[arg(long, env = "WELLCHECK_TIMEZONE", default_value = "UTC")]
        timezone: String,
    },
}

/// Each answer counts only when it is exactly "yes".
#[derive(Args)]
struct RiskArgs {
    /// Fever in the last 48 hours? (weight 2)
    #[arg(long)]
    q1: Option<String>,
    /// Symptoms lasting more than three days? (weight 2)
    #[arg(long)]
    q2: Option<String>,
    /// Shortness of breath or chest pain? (weight 3)
    #[arg(long)]
    q3: Option<String>,
    /// Sleeping poorly? (weight 1)
    #[arg(long)]
    q4: Option<String>,
    /// Chronic condition such as diabetes or asthma? (weight 2)
    #[arg(long)]
    q5: Option<String>,
}

impl From<RiskArgs> for RiskAnswers {
    fn from(args: RiskArgs) -> Self {
        RiskAnswers {
            q1: args.q1,
            q2: args.q2,
            q3: args.q3,
            q4: args.q4,
            q5: args.q5,
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let target = if cli.remote {
        Target::Remote(&cli.api_url)
    } else {
        Target::Local
    };

    let code = match cli.command {
        Commands::Health => commands::health::run(&cli.api_url).await,
        Commands::Classify { text } => commands::triage::classify(target, &text).await,
        Commands::Advice { tag } => commands::triage::advice(target, &tag).await,
        Commands::Risk(args) => commands::triage::risk(target, args.into()).await,
        Commands::Greet { timezone } => commands::triage::greet(target, &timezone).await,
    };

    std::process::exit(code);
}
