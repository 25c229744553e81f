use chain_api_fetcher::{ChainClient, ChainConfig};
use chain_api_primitives::Network;
use std::io;
use std::io::Write;

pub fn input(query: &str, default: Option<&str>) -> io::Result<String> {
    print!(
        "{}{}: ",
        query,
        default.map_or("".to_string(), |d| format!(" ({})", d))
    );
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_owned();
    if input.is_empty() {
        return Ok(default.unwrap_or_default().to_string());
    }
    Ok(input)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("chain-api-fetcher=info")
        .init();

    let api_key_id = std::env::var("CHAIN_API_KEY_ID")?;
    let api_key_secret = std::env::var("CHAIN_API_KEY_SECRET")?;
    let network = Network::try_from(input("Enter network", Some("bitcoin"))?)?;
    let block_height = input("Enter block height (empty for latest)", None)?;
    let num_workers = input("Enter the number of workers", Some("5"))?;

    let mut config = ChainConfig::new(network, api_key_id, api_key_secret);
    config.num_workers = num_workers.parse()?;
    let client = ChainClient::new(None, config)?;

    let block = if block_height.is_empty() {
        client.get_latest_block().await?
    } else {
        client.get_block_by_height(block_height.parse()?).await?
    };
    println!(
        "Block {} at height {} with {} transactions",
        block.hash,
        block.height,
        block.transaction_hashes.len()
    );

    let start_time = std::time::Instant::now();
    let transactions = match client.get_block_transactions(&block).await {
        Ok(transactions) => transactions,
        Err(err) => {
            for (index, error) in err.errors.failures() {
                println!("Failed {}: {}", block.transaction_hashes[index], error);
            }
            err.results
        }
    };
    let fees: i64 = transactions.iter().map(|tx| tx.fees).sum();
    println!(
        "Fetched {} transactions in {:.2}s, total fees {} satoshi",
        transactions.len(),
        start_time.elapsed().as_secs_f64(),
        fees
    );

    Ok(())
}
