use std::fmt;
use std::path::PathBuf;

use listen_core::model::{PracticeSettings, PracticeSettingsDraft, PracticeSettingsError};
use services::{AppServices, Clock};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shell;

use shell::{Shell, run_shell};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDir { raw: String },
    Settings(PracticeSettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDir { raw } => write!(f, "invalid --recordings value: {raw:?}"),
            ArgsError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  listen [--recordings <dir>] [--typing-category <name>]");
    eprintln!("         [--strict-accents] [--no-shuffle] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --recordings recordings");
    eprintln!("  --typing-category for_typing");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LISTEN_RECORDINGS_DIR, LISTEN_TYPING_CATEGORY, LISTEN_STRICT_ACCENTS,");
    eprintln!("  LISTEN_NO_SHUFFLE, LISTEN_SEED, RUST_LOG");
}

#[derive(Debug)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug)]
struct Args {
    recordings_dir: PathBuf,
    settings: PracticeSettings,
}

fn env_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
}

impl Args {
    /// Parse flags, falling back to environment values looked up via `env`.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut recordings_dir = env("LISTEN_RECORDINGS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from("recordings"), PathBuf::from);
        let mut draft = PracticeSettingsDraft {
            diacritic_insensitive: !env_flag(env("LISTEN_STRICT_ACCENTS")),
            typing_category: env("LISTEN_TYPING_CATEGORY"),
            shuffle: !env_flag(env("LISTEN_NO_SHUFFLE")),
            shuffle_seed: None,
        };
        if let Some(raw) = env("LISTEN_SEED") {
            draft.shuffle_seed = Some(parse_seed(raw)?);
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--recordings" => {
                    let value = require_value(args, "--recordings")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDir { raw: value });
                    }
                    recordings_dir = PathBuf::from(value);
                }
                "--typing-category" => {
                    draft.typing_category = Some(require_value(args, "--typing-category")?);
                }
                "--strict-accents" => draft.diacritic_insensitive = false,
                "--no-shuffle" => draft.shuffle = false,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    draft.shuffle_seed = Some(parse_seed(value)?);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = draft.validate().map_err(ArgsError::Settings)?;
        Ok(Parsed::Run(Self {
            recordings_dir,
            settings,
        }))
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_tracing() {
    // Logs go to stderr so stdout stays reserved for the practice shell.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listen=info,services=info,storage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();
    info!(
        recordings = %args.recordings_dir.display(),
        typing_category = %args.settings.typing_category(),
        diacritic_insensitive = args.settings.diacritic_insensitive(),
        shuffle = args.settings.shuffle(),
        "starting listen v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services =
        AppServices::from_recordings_dir(&args.recordings_dir, Clock::default(), args.settings)
            .await?;

    let mut shell = Shell::new(services);
    println!("Type `help` for commands.");
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_shell(&mut shell, stdin, &mut stdout).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
