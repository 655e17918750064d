//! # envfig demo application
//!
//! A sample CLI tool that showcases how to integrate envfig into a real
//! application. It exists purely to demonstrate and manually verify envfig's
//! features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example envfig_demo -- show
//! cargo run --example envfig_demo -- --env development show
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                   |
//! |-------------------------|----------------------------------------------------------------------|
//! | Defaults only           | `cargo run --example envfig_demo -- show`                            |
//! | Base `.env` file        | Create `.env` in cwd with `PORT=9000`, then run `show`               |
//! | Override file           | Add `.env.development`, run with `--env development show`            |
//! | Single file             | `--env-file path/to/file.env show`                                   |
//! | Process env wins        | `PORT=7000 cargo run --example envfig_demo -- show`                  |
//! | Required keys           | `cargo run --example envfig_demo -- --require API_KEY show`          |
//! | Single key lookup       | `cargo run --example envfig_demo -- get DATABASE_URL`                |
//! | Warnings for bad files  | Put a line without `=` in `.env`; run with `RUST_LOG=envfig=warn`    |

mod settings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envfig::{EnvArgs, Envfig, EnvfigBuilder, SharedEnvironment};

use settings::DemoSettings;

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// envfig demo: a sample CLI app for showcasing envfig integration.
#[derive(Parser, Debug)]
#[command(name = "envfig-demo")]
struct Cli {
    #[command(flatten)]
    env: EnvArgs,

    /// Fail unless this key is set (repeatable).
    #[arg(long, global = true)]
    require: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the typed settings the demo understands.
    Show,
    /// Print one raw value.
    Get {
        /// Key to look up, e.g. DATABASE_URL.
        key: String,
    },
    /// Print every resolved key (values of *_KEY / *_SECRET masked).
    List,
}

// ---------------------------------------------------------------------------
// Builder helper
// ---------------------------------------------------------------------------

/// Create an [`EnvfigBuilder`] wired up for the demo app.
fn make_builder(cli: &Cli) -> EnvfigBuilder {
    Envfig::builder()
        .source(cli.env.clone().into_source())
        .defaults([("APP_NAME", "envfig-demo"), ("PORT", "8080")])
        .required_keys(cli.require.iter().cloned())
}

fn masked(key: &str, value: &str) -> String {
    if key.ends_with("_KEY") || key.ends_with("_SECRET") || key.ends_with("_TOKEN") {
        "****".to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let shared = SharedEnvironment::from_builder(make_builder(&cli));

    let env = shared.get_or_init().unwrap_or_else(|e| {
        eprintln!("Failed to load environment:\n{e}");
        std::process::exit(1);
    });

    match cli.command {
        Commands::Show => {
            let settings = DemoSettings::new(&env);
            println!("app_name  {}", settings.app_name());
            println!("port      {}", settings.port());
            println!("debug     {}", settings.debug());
            match settings.database_url() {
                Some(url) => println!("database  {url}"),
                None => println!("database  <not set>"),
            }
        }
        Commands::Get { key } => match env.get(&key) {
            Some(value) => println!("{key}={value}"),
            None => {
                eprintln!("{key} is not set");
                std::process::exit(1);
            }
        },
        Commands::List => {
            for (key, value) in env.iter() {
                println!("{key}={}", masked(key, value));
            }
        }
    }
}
