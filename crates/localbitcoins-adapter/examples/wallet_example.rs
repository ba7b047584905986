/*
[INPUT]:  LOCALBITCOINS_API_KEY / LOCALBITCOINS_API_SECRET (or a YAML config path)
[OUTPUT]: Wallet balance and account info printed to stdout
[POS]:    Examples - signed GET requests end to end
[UPDATE]: When client construction or endpoint helpers change
*/

use localbitcoins_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: query the wallet with HMAC-signed requests
///
/// Usage: `cargo run --example wallet_example [config.yaml]`
#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to initialize tracing: {}", e);
        return;
    }

    println!("=== LocalBitcoins Wallet Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => match ClientConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                return;
            }
        },
        None => ClientConfig::from_env(),
    };

    let client = match LocalbitcoinsClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}\n", client.base_url());

    println!("Querying account info...");
    match client.myself().await {
        Ok(response) if response.is_success() => println!("✓ Account: {:?}", response.data),
        Ok(response) => println!("✗ Status {}: {}", response.status, response.raw_body()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying wallet balance...");
    match client.wallet_balance().await {
        Ok(response) if response.is_success() => println!("✓ Balance: {:?}", response.data),
        Ok(response) => println!("✗ Status {}: {}", response.status, response.raw_body()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Wallet example complete");
}
