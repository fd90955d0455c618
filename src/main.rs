//! mjsonwp - send Android MJSONWP commands to an automation server.
//!
//! Every subcommand issues exactly one request against an existing session and
//! prints the decoded `value` of the response as JSON on stdout. The server
//! and session come from flags, the `APPIUM_SERVER` / `APPIUM_SESSION`
//! environment variables, or the config file, in that order.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser as ClapParser, Subcommand};
use mjsonwp::{
    config::{default_config_path, ClientConfig},
    flags::{parse_flag, FlagParam},
    keys::parse_keycode,
    Dispatcher, ElementId, HideKeyboardStrategy, HttpTransport, KeyPress, SessionId,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// mjsonwp - Android commands over the Mobile JSON Wire Protocol
#[derive(ClapParser, Debug)]
#[command(name = "mjsonwp", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the automation server (e.g. http://127.0.0.1:4723/wd/hub)
    #[arg(long, global = true, env = "APPIUM_SERVER")]
    server: Option<String>,

    /// Session id to address
    #[arg(long, global = true, env = "APPIUM_SESSION")]
    session: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether the soft keyboard is shown
    IsKeyboardShown,

    /// Dismiss the soft keyboard
    HideKeyboard {
        /// Key to press to close the keyboard (e.g. "Done")
        #[arg(long)]
        key: Option<String>,

        /// Dismissal strategy (press, pressKey, swipeDown, tapOut, tapOutside, default)
        #[arg(long)]
        strategy: Option<HideKeyboardStrategy>,
    },

    /// Send a raw key event
    Keyevent {
        /// Keycode as an integer or Android key name (e.g. 86, media_stop)
        #[arg(value_parser = keycode_arg)]
        keycode: u32,

        /// Metastate constant (name, decimal or 0x hex); repeatable
        #[arg(long, value_parser = metastate_arg)]
        metastate: Vec<u32>,
    },

    /// Press a key
    PressKeycode(KeyArgs),

    /// Long-press a key
    LongPressKeycode(KeyArgs),

    /// Set an element's value in one step
    SetImmediateValue {
        /// Element id
        element: String,

        /// Text parts, concatenated in order
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Replace an element's value
    ReplaceValue {
        /// Element id
        element: String,

        /// Text parts, concatenated in order
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
struct KeyArgs {
    /// Keycode as an integer or Android key name (e.g. 86, media_stop)
    #[arg(value_parser = keycode_arg)]
    keycode: u32,

    /// Metastate constant (name, decimal or 0x hex); repeatable
    #[arg(long, value_parser = metastate_arg)]
    metastate: Vec<u32>,

    /// Key event flag constant (name, decimal or 0x hex); repeatable
    #[arg(long, value_parser = flag_arg)]
    flags: Vec<u32>,
}

impl From<KeyArgs> for KeyPress {
    fn from(args: KeyArgs) -> Self {
        KeyPress::new(args.keycode)
            .metastate(args.metastate)
            .flags(args.flags)
    }
}

fn keycode_arg(s: &str) -> Result<u32, String> {
    parse_keycode(s).ok_or_else(|| format!("unknown keycode: {s}"))
}

fn metastate_arg(s: &str) -> Result<u32, String> {
    parse_flag(FlagParam::Metastate, s).ok_or_else(|| format!("unknown metastate: {s}"))
}

fn flag_arg(s: &str) -> Result<u32, String> {
    parse_flag(FlagParam::Flags, s).ok_or_else(|| format!("unknown key event flag: {s}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the command result, so logs go to stderr.
    init_tracing();

    let config = load_config(cli.config.as_deref())?.merge(cli.server, cli.session);
    let server = config
        .server
        .as_deref()
        .ok_or_else(|| anyhow!("no server given: pass --server, set APPIUM_SERVER, or set `server` in the config file"))?;
    let base = server
        .parse::<reqwest::Url>()
        .with_context(|| format!("invalid server url: {server}"))?;
    let session = config
        .session
        .clone()
        .ok_or_else(|| anyhow!("no session given: pass --session, set APPIUM_SESSION, or set `session` in the config file"))?;

    let transport =
        HttpTransport::with_timeouts(base, config.connect_timeout(), config.request_timeout())?;
    let driver = Dispatcher::new(transport, SessionId::new(session)?);

    let value = run(&driver, cli.command).await?;
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}

async fn run(driver: &Dispatcher<HttpTransport>, command: Commands) -> Result<Value, mjsonwp::Error> {
    match command {
        Commands::IsKeyboardShown => driver.is_keyboard_shown().await,
        Commands::HideKeyboard { key, strategy } => {
            driver.hide_keyboard(key.as_deref(), strategy).await
        }
        Commands::Keyevent { keycode, metastate } => driver.keyevent(keycode, &metastate).await,
        Commands::PressKeycode(args) => driver.press_keycode(args).await,
        Commands::LongPressKeycode(args) => driver.long_press_keycode(args).await,
        Commands::SetImmediateValue { element, text } => {
            driver.set_immediate_value(&ElementId::new(element)?, &text).await
        }
        Commands::ReplaceValue { element, text } => {
            driver.replace_value(&ElementId::new(element)?, &text).await
        }
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<ClientConfig> {
    match explicit {
        Some(path) => ClientConfig::load(path)?
            .ok_or_else(|| anyhow!("config file not found: {}", path.display())),
        None => match default_config_path() {
            Some(path) => Ok(ClientConfig::load(&path)?.unwrap_or_default()),
            None => Ok(ClientConfig::default()),
        },
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mjsonwp=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
