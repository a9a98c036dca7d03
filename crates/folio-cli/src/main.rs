//! folio - terminal portfolio with an embedded chat assistant

mod config;
mod content;
mod page;
mod ui;
mod utils;

use clap::Parser;
use folio_chat::{ChatEvent, ChatSession, DEFAULT_GREETING, ReplyPolicy, SessionConfig};
use folio_client::{Endpoint, HttpTransport, Role};
use folio_tui::{Theme, widgets::message_list::role_label};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the chat service base URL
const API_URL_ENV: &str = "FOLIO_API_URL";

/// folio - terminal portfolio with an embedded chat assistant
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the chat service (default: http://localhost:5000)
    #[arg(long)]
    api_url: Option<String>,

    /// Send a single message, print the reply and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Color theme (paper, dark)
    #[arg(long)]
    theme: Option<String>,

    /// What to do when the service answers without a reply (surface, ignore)
    #[arg(long)]
    reply_policy: Option<String>,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

fn parse_reply_policy(s: &str) -> anyhow::Result<ReplyPolicy> {
    match s.to_lowercase().as_str() {
        "surface" => Ok(ReplyPolicy::Surface),
        "ignore" => Ok(ReplyPolicy::Ignore),
        other => anyhow::bail!("unknown reply policy '{}' (expected surface or ignore)", other),
    }
}

/// Set up tracing when asked for via `--verbose` or `RUST_LOG`.
///
/// The full-screen UI owns the terminal, so in that mode logs go to a file
/// in the config directory instead of stderr.
fn init_tracing(verbose: bool, use_tui: bool) -> anyhow::Result<()> {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=debug,folio_chat=debug,folio_client=debug"));

    if use_tui {
        let dir = config::Config::config_dir();
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("folio.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    let use_tui = args.command.is_none() && !args.no_tui && cfg.tui.unwrap_or(true);
    init_tracing(args.verbose, use_tui)?;

    // Merge config with CLI args (CLI takes precedence, then environment)
    let endpoint = Endpoint::resolve([
        args.api_url,
        std::env::var(API_URL_ENV).ok(),
        cfg.api_url,
    ])?;

    let reply_policy = match args.reply_policy {
        Some(ref policy) => parse_reply_policy(policy)?,
        None => cfg.reply_policy.unwrap_or_default(),
    };

    let theme = match args.theme.or(cfg.theme) {
        Some(name) => Theme::by_name(&name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme '{}' (expected paper or dark)", name))?,
        None => Theme::default(),
    };

    tracing::info!(base_url = endpoint.base_url(), ?reply_policy, "starting folio");

    let transport = match cfg.request_timeout_secs {
        Some(secs) => HttpTransport::with_timeout(endpoint, Duration::from_secs(secs))?,
        None => HttpTransport::new(endpoint),
    };

    let session_config = SessionConfig {
        greeting: cfg.greeting.unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        reply_policy,
    };
    let (session, events) = ChatSession::new(session_config, Arc::new(transport));

    // Non-interactive mode
    if let Some(message) = args.command {
        return run_command(session, events, &message).await;
    }

    // TUI mode
    if use_tui {
        return ui::run_tui(session, events, theme).await;
    }

    // Interactive mode (simple stdin/stdout)
    run_interactive(session, events).await
}

fn print_turn(role: Role, content: &str) {
    println!("{}> {}", role_label(role), content);
}

async fn run_command(
    mut session: ChatSession,
    mut events: mpsc::UnboundedReceiver<ChatEvent>,
    message: &str,
) -> anyhow::Result<()> {
    print_turn(Role::User, message);

    session.update_input(message);
    session.submit()?;
    tracing::debug!(message = %utils::truncate_chars(message, 80), "one-shot message sent");
    session.wait_settled(&mut events).await;

    match session.widget().messages().last() {
        Some(reply) if reply.role() == Role::Assistant => {
            print_turn(reply.role(), reply.content());
            if reply.is_error() {
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("No reply received.");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_interactive(
    mut session: ChatSession,
    mut events: mpsc::UnboundedReceiver<ChatEvent>,
) -> anyhow::Result<()> {
    for message in session.widget().messages() {
        print_turn(message.role(), message.content());
    }
    println!();

    loop {
        print!("{}> ", role_label(Role::User));
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim_end_matches(['\r', '\n']);
        session.update_input(input);
        if let Err(rejection) = session.submit() {
            tracing::debug!(%rejection, "submit rejected");
            continue;
        }
        tracing::debug!(message = %utils::truncate_chars(input, 80), "message sent");

        let seen = session.widget().messages().len();
        session.wait_settled(&mut events).await;

        for message in &session.widget().messages()[seen..] {
            print_turn(message.role(), message.content());
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_policy() {
        assert_eq!(parse_reply_policy("surface").unwrap(), ReplyPolicy::Surface);
        assert_eq!(parse_reply_policy("IGNORE").unwrap(), ReplyPolicy::Ignore);
        assert!(parse_reply_policy("loud").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "folio",
            "--api-url",
            "https://chat.example.com",
            "-c",
            "hello",
            "--reply-policy",
            "ignore",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("https://chat.example.com"));
        assert_eq!(args.command.as_deref(), Some("hello"));
        assert_eq!(args.reply_policy.as_deref(), Some("ignore"));
        assert!(!args.no_tui);
    }
}
