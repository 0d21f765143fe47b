use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;
use sales_data_etl::{Entity, Settings, cli};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Sales Data ETL: extract users, cards, stores, products, orders and date events, clean them, and load them into one database
#[derive(Parser)]
#[command(name = "sdetl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source settings from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables in the source database
    Tables {
        /// List the destination database instead
        #[arg(short, long)]
        target: bool,
    },

    /// Extract, clean and load entities (all of them when none are given)
    Run {
        /// Entities to process, in order
        #[arg(value_enum)]
        entities: Vec<Entity>,

        /// Continue with the remaining entities when one fails
        #[arg(short, long)]
        keep_going: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if std::path::Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Tables { target } => {
            for table in cli::list_tables(&settings, target)? {
                println!("{}", table);
            }
        }
        Commands::Run {
            entities,
            keep_going,
        } => {
            let entities = match entities.is_empty() {
                true => Entity::ALL.to_vec(),
                false => entities,
            };
            let total = cli::run_entities(&entities, &settings, keep_going).await?;
            log::info!(
                "✓ Loaded {} row(s) across {} entities",
                total.green(),
                entities.len()
            );
        }
    }

    Ok(())
}
