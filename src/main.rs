use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use krypto::{CoinbaseClient, config::Settings, table::render_products};
use tracing_subscriber::EnvFilter;

/// Coinbase Pro 命令行工具
#[derive(Debug, Parser)]
#[command(name = "krypto", version, about, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 列出所有可交易的交易对
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 日志写到 stderr，避免与表格输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let settings = Settings::load().wrap_err("failed to read configuration")?;
    let client = CoinbaseClient::builder()
        .credentials(settings.into_credentials())
        .executor(reqwest::Client::new())
        .build()
        .wrap_err("failed to create client")?;

    match cli.command {
        Command::List => list(&client).await,
    }
}

async fn list(client: &CoinbaseClient) -> Result<()> {
    let products = client
        .list_products()
        .await
        .wrap_err("failed to list products")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    render_products(&products, &mut stdin.lock(), &mut stdout.lock())
        .wrap_err("failed to write product table")?;

    Ok(())
}
