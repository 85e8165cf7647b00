//! Crypto News Bot CLI
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! # or point at a local OpenAI-compatible server
//! export OPENAI_API_BASE="http://localhost:1234/v1"
//! export OPENAI_MODEL="your-model-name"
//!
//! # One question
//! cargo run --bin news-bot -- --prompt "Any news on BTC and SOL?"
//!
//! # Raw chat request
//! cargo run --bin news-bot -- --request '{"prompt": {"content": "ETH"}}'
//!
//! # Interactive
//! cargo run --bin news-bot
//! ```

use clap::Parser;
use news_agent::{NewsAgent, NewsConfig, PassthroughShortener, lookback_from_hours};
use news_core::{ChatAgent, ChatRequest};
use news_llm::providers::{OpenAIConfig, OpenAIProvider};
use news_utils::{LogFormat, env_string, init_tracing_with};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "news-bot")]
#[command(about = "Price-relevant crypto news, filtered by an LLM", long_about = None)]
struct Args {
    /// Answer a single prompt and exit
    #[arg(short, long, conflicts_with_all = ["request", "tools"])]
    prompt: Option<String>,

    /// Answer a raw JSON chat request and exit
    #[arg(short, long, conflicts_with = "tools")]
    request: Option<String>,

    /// Print the tool descriptors as OpenAI function tools and exit
    #[arg(long)]
    tools: bool,

    /// Print full article links instead of TinyURL links
    #[arg(long)]
    no_shorten: bool,

    /// Override the per-coin article cap
    #[arg(long)]
    articles_per_coin: Option<usize>,

    /// Override the recency window, in hours
    #[arg(long)]
    lookback_hours: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn provider_config(timeout: Duration) -> OpenAIConfig {
    let api_key = env_string("OPENAI_API_KEY").unwrap_or_else(|| {
        warn!("OPENAI_API_KEY not set, sending requests without a key");
        "not-needed".to_string()
    });

    let mut config = OpenAIConfig::new(api_key).with_timeout(timeout.as_secs());
    if let Some(api_base) = env_string("OPENAI_API_BASE") {
        config = config.with_api_base(api_base);
    }
    config
}

fn build_config(args: &Args) -> anyhow::Result<NewsConfig> {
    let mut builder = NewsConfig::builder().from_env();
    if let Some(cap) = args.articles_per_coin {
        builder = builder.articles_per_coin(cap);
    }
    if let Some(hours) = args.lookback_hours {
        builder = builder.lookback(lookback_from_hours(hours)?);
    }
    Ok(builder.build()?)
}

async fn run_repl(agent: &NewsAgent) -> anyhow::Result<()> {
    println!("Crypto news bot. Mention tickers like BTC or ETH; /exit quits.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/exit" {
            println!("Goodbye!");
            break;
        }

        let response = agent.chat(ChatRequest::new(input)).await;
        println!("{}\n", response.content);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing_with(format, "warn,news_agent=info");

    let config = build_config(&args)?;
    info!(
        model = %config.model,
        lookback_hours = config.lookback_hours(),
        articles_per_coin = config.articles_per_coin,
        "Starting news-bot"
    );

    let provider = Arc::new(OpenAIProvider::with_config(provider_config(
        config.request_timeout,
    ))?);
    let mut agent = NewsAgent::new(provider, config)?;
    if args.no_shorten {
        agent = agent.with_shortener(Arc::new(PassthroughShortener));
    }

    if args.tools {
        println!("{}", serde_json::to_string_pretty(&agent.openai_tools())?);
        return Ok(());
    }

    if let Some(raw) = args.request {
        let request = ChatRequest::from_value(serde_json::from_str(&raw)?)?;
        let response = agent.chat(request).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if let Some(prompt) = args.prompt {
        let response = agent.chat(ChatRequest::new(prompt)).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    run_repl(&agent).await
}
