use clap::Parser;
use situation_memory::cli::commands::{Cli, Commands};
use situation_memory::config::MemoryConfig;
use situation_memory::domain::entities::memory_record::NewSituation;
use situation_memory::domain::error::DomainError;
use situation_memory::MemoryBank;
use tracing_subscriber::EnvFilter;

const DEMO_SITUATIONS: &[(&str, &str)] = &[
    (
        "High inflation rate with rising interest rates and declining consumer spending",
        "Consider defensive sectors like consumer staples and utilities. Review fixed-income portfolio duration.",
    ),
    (
        "Tech sector showing high volatility with increasing institutional selling pressure",
        "Reduce exposure to high-growth tech stocks. Look for value opportunities in established tech companies with strong cash flows.",
    ),
    (
        "Strong dollar affecting emerging markets with increasing forex volatility",
        "Hedge currency exposure in international positions. Consider reducing allocation to emerging market debt.",
    ),
    (
        "Market showing signs of sector rotation with rising yields",
        "Rebalance portfolio to maintain target allocations. Consider increasing exposure to sectors benefiting from higher rates.",
    ),
];

const DEMO_QUERY: &str = "Market showing increased volatility in tech sector, with institutional investors \
reducing positions and rising interest rates affecting growth stock valuations";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("situation_memory=info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<MemoryConfig, DomainError> {
    let base = match (&cli.config, &cli.preset) {
        (Some(path), _) => MemoryConfig::from_json_file(path)?,
        (None, Some(name)) => MemoryConfig::preset(name)?,
        (None, None) => MemoryConfig::default(),
    };
    base.with_env_overrides()
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    match cli.command {
        Commands::Demo => run_demo(config).await,
        cmd => run_on_bank(&cli.collection, config, cmd).await,
    }
}

async fn run_on_bank(
    collection: &str,
    config: MemoryConfig,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = std::env::var("SITUMEM_DB").unwrap_or_else(|_| "./situmem.db".into());
    let bank = MemoryBank::open(collection, config, &db_path)?;

    match cmd {
        Commands::Add { json } => {
            let pairs = NewSituation::parse_batch(&json)?;
            let added = pairs.len();
            bank.add_situations(pairs).await?;
            println!("Added {added} situations to {} ({} total)", bank.name(), bank.len()?);
        }
        Commands::Recall {
            situation,
            n_matches,
        } => {
            let matches = bank.get_memories(&situation, n_matches).await?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        Commands::Stats => {
            let stats = serde_json::json!({
                "collection": bank.name(),
                "records": bank.len()?,
                "strategy": bank.strategy(),
                "ranking": bank.ranking_mode(),
                "dimension": bank.dimension(),
                "distance": bank.config().distance,
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::List => {
            let records: Vec<_> = bank
                .records()?
                .into_iter()
                .map(|mut r| {
                    r.embedding = None;
                    r
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Demo => run_demo(bank.config().clone()).await?,
    }
    Ok(())
}

async fn run_demo(config: MemoryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bank = MemoryBank::new("demo", config)?;
    bank.add_situations(DEMO_SITUATIONS.iter().copied()).await?;

    let matches = bank.get_memories(DEMO_QUERY, 2).await?;
    for (i, m) in matches.iter().enumerate() {
        println!("\nMatch {}:", i + 1);
        println!("Similarity Score: {:.2}", m.similarity_score);
        println!("Matched Situation: {}", m.matched_situation);
        println!("Recommendation: {}", m.recommendation);
    }
    Ok(())
}
