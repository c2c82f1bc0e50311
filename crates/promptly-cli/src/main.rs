//! promptly CLI: chat with a conversation server from the terminal

use clap::{Parser, Subcommand};
use promptly_widget::{Config, ConversationClient, CookieStore, FileCookieJar, HttpTransport};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

/// Minimal chat client with an auto-growing prompt
#[derive(Parser)]
#[command(name = "promptly")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Send {
        /// Message text
        message: String,
    },

    /// Show the stored conversation identifier
    Cookie {
        /// Forget the identifier and start a new conversation next time
        #[arg(long)]
        clear: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.verbose, tui_mode);

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load_or_default(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config from {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => Config::default(),
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(promptly_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { message }) => cmd_send(&config, &message),
        Some(Commands::Cookie { clear }) => cmd_cookie(&config, clear),
        Some(Commands::Config) => cmd_config(&config, config_path.as_deref()),
    }
}

/// Set up tracing. The TUI owns the terminal, so in TUI mode logs go to a
/// file in the data dir instead of stderr.
fn init_logging(verbose: bool, tui_mode: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level);

    if !tui_mode {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return;
    }

    let Some(log_path) = log_file_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    if let Ok(file) = File::create(&log_path) {
        let _ = builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
}

fn log_file_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("promptly").join("promptly.log"))
}

fn open_cookie_jar(config: &Config) -> FileCookieJar {
    let Some(path) = config.resolved_cookie_path() else {
        eprintln!("No data directory available; set cookie_path in the config");
        std::process::exit(1);
    };
    FileCookieJar::open(path).unwrap_or_else(|e| {
        eprintln!("Failed to open cookie jar: {e}");
        std::process::exit(1);
    })
}

fn cmd_send(config: &Config, message: &str) {
    if message.is_empty() {
        eprintln!("Nothing to send");
        std::process::exit(1);
    }

    let jar = open_cookie_jar(config);
    let mut client = ConversationClient::new(HttpTransport::new(&config.base_url), jar)
        .cookie_name(config.cookie_name.clone())
        .ttl(config.cookie_ttl());

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(client.send(message)) {
        Ok(response) => println!("{}", response.message),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_cookie(config: &Config, clear: bool) {
    let mut jar = open_cookie_jar(config);

    if clear {
        jar.remove(&config.cookie_name);
        println!("Cleared {}", config.cookie_name);
        return;
    }

    match jar.get(&config.cookie_name) {
        Some(chat_id) => println!("{}={chat_id}", config.cookie_name),
        None => println!("No conversation stored ({})", jar.path().display()),
    }
}

fn cmd_config(config: &Config, path: Option<&Path>) {
    match path {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, using defaults)", path.display()),
        None => println!("# defaults"),
    }
    println!(
        "{}",
        serde_json::to_string_pretty(config).expect("failed to serialize")
    );
}
