//! answerkit CLI - query knowledge and search APIs with size-bounded output

mod fetch;
mod paste;
mod terminal;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use answerkit::{quick, Error, Pipeline, PipelineConfig, RawResponse, RenderKind, ResponseKind};

use fetch::Upstream;
use paste::HastebinClient;
use terminal::{StdoutTransport, TerminalPager};

const APP_NAME: &str = "answerkit";

#[derive(Parser)]
#[command(name = "answerkit")]
#[command(version)]
#[command(about = "Query Wolfram|Alpha and DuckDuckGo with chat-sized output", long_about = None)]
struct Cli {
    /// Pipeline configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum message length in bytes
    #[arg(long, global = true, env = "ANSWERKIT_MAX_LEN")]
    max_len: Option<usize>,

    /// Character budget for related topics and results
    #[arg(long, global = true)]
    text_budget: Option<usize>,

    /// Paste service base URL
    #[arg(long, global = true, env = "ANSWERKIT_PASTE_URL")]
    paste_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "20")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a saved API response
    Render {
        /// Response JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Response shape (detected if not specified)
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Step through images interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Full Wolfram|Alpha query with a verbose response
    Wolfram {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Wolfram|Alpha app id
        #[arg(long, env = "WOLFRAM_APPID", hide_env_values = true)]
        appid: String,

        /// Step through images interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Quick Wolfram|Alpha query with a short response
    Quick {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Wolfram|Alpha app id
        #[arg(long, env = "WOLFRAM_APPID", hide_env_values = true)]
        appid: String,

        /// Command prefix shown in hints
        #[arg(long, default_value = "answerkit ")]
        prefix: String,
    },

    /// Search the DuckDuckGo Instant Answer API
    #[command(aliases = ["duck", "search", "google", "goog"])]
    Ddg {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Step through images interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Knowledge-engine pod tree
    Pod,
    /// Instant-answer search object
    Search,
}

impl From<KindArg> for ResponseKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Pod => ResponseKind::PodTree,
            KindArg::Search => ResponseKind::Search,
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CmdResult {
    let rt = tokio::runtime::Runtime::new()?;

    // Dropping the command future on Ctrl-C abandons any in-flight request
    // before anything partial is printed.
    rt.block_on(async {
        tokio::select! {
            result = run_command(cli) => result,
            _ = tokio::signal::ctrl_c() => Err("interrupted".into()),
        }
    })
}

async fn run_command(cli: Cli) -> CmdResult {
    let config = load_config(&cli)?;
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Render {
            input,
            kind,
            interactive,
        } => cmd_render(&input, kind, interactive, config, timeout).await,
        Commands::Wolfram {
            query,
            appid,
            interactive,
        } => cmd_wolfram(&query.join(" "), &appid, interactive, config, timeout).await,
        Commands::Quick {
            query,
            appid,
            prefix,
        } => cmd_quick(&query.join(" "), &appid, &prefix, timeout).await,
        Commands::Ddg { query, interactive } => {
            cmd_ddg(&query.join(" "), interactive, config, timeout).await
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    };

    if let Some(max_len) = cli.max_len {
        config.render.max_len = max_len;
    }
    if let Some(budget) = cli.text_budget {
        config.normalize.text_budget = budget;
    }
    if let Some(ref url) = cli.paste_url {
        config.render.paste_base_url = url.clone();
    }
    Ok(config)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn deliver(
    raw: &RawResponse,
    config: PipelineConfig,
    timeout: Duration,
    interactive: bool,
) -> CmdResult {
    let uploader = HastebinClient::new(config.render.paste_base_url.clone(), timeout)?;
    let transport = StdoutTransport::new(config.render.max_len);
    let pager = TerminalPager::new(interactive);
    let pipeline = Pipeline::new(Arc::new(uploader)).with_config(config);

    match pipeline.run(raw, &transport, &pager).await {
        Ok(outcome) => {
            if let Some(text) = outcome.text {
                if text.kind == RenderKind::PasteLink {
                    log::info!("answer too long, uploaded to {}", text.content);
                }
            }
            Ok(())
        }
        Err(Error::NoResultsFound) => {
            println!("{}", Error::NoResultsFound.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn read_input(input: &Path) -> std::io::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input)
    }
}

async fn cmd_render(
    input: &Path,
    kind: Option<KindArg>,
    interactive: bool,
    config: PipelineConfig,
    timeout: Duration,
) -> CmdResult {
    let json = read_input(input)?;
    let raw = match kind {
        Some(kind) => RawResponse::from_json_str_as(&json, kind.into())?,
        None => RawResponse::from_json_str(&json)?,
    };
    deliver(&raw, config, timeout, interactive).await
}

async fn cmd_wolfram(
    query: &str,
    appid: &str,
    interactive: bool,
    config: PipelineConfig,
    timeout: Duration,
) -> CmdResult {
    let upstream = Upstream::new(timeout, APP_NAME)?;

    let pb = spinner("Querying Wolfram|Alpha...");
    let raw = upstream.wolfram(appid, query).await;
    pb.finish_and_clear();

    deliver(&raw?, config, timeout, interactive).await
}

async fn cmd_quick(query: &str, appid: &str, prefix: &str, timeout: Duration) -> CmdResult {
    if let Some(answer) = quick::canned(query) {
        println!("{}", answer);
        return Ok(());
    }

    let upstream = Upstream::new(timeout, APP_NAME)?;

    let pb = spinner("Querying Wolfram|Alpha...");
    let reply = upstream.wolfram_short(appid, query).await;
    pb.finish_and_clear();

    println!("{}", quick::interpret(query, &reply?, prefix));
    Ok(())
}

async fn cmd_ddg(
    query: &str,
    interactive: bool,
    config: PipelineConfig,
    timeout: Duration,
) -> CmdResult {
    let upstream = Upstream::new(timeout, APP_NAME)?;

    let pb = spinner("Searching DuckDuckGo...");
    let raw = upstream.duckduckgo(query).await;
    pb.finish_and_clear();

    deliver(&raw?, config, timeout, interactive).await
}

fn cmd_version() {
    println!("{} {}", "answerkit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Size-bounded answers from Wolfram|Alpha and DuckDuckGo");
    println!();
    println!("License: MIT");
}
