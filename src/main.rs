use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use co_fitting::app::{self, ConvertOptions};
use co_fitting::config;
use co_fitting::i18n::{self, Translator};
use co_fitting::recipe::ConversionRequest;
use co_fitting::ui_cli;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "co_fitting")]
#[command(about = "Coffee brewing recipe converter")]
struct Cli {
    /// Display language (ja, ko, en or auto)
    #[arg(long, default_value = "auto")]
    lang: String,

    /// Path to the config file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory with translation override files (<lang>.toml)
    #[arg(long)]
    locales: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a recipe file to a target size
    Convert {
        /// Recipe file (.toml or .json)
        recipe: PathBuf,

        /// Explicit magnification; overrides the targets below
        #[arg(short, long)]
        magnification: Option<f64>,

        /// Target beans in grams
        #[arg(long)]
        bean: Option<f64>,

        /// Target water in ml
        #[arg(long)]
        water: Option<f64>,

        /// Target water/bean ratio
        #[arg(long)]
        ratio: Option<f64>,

        /// Show each step's share of the total water
        #[arg(short, long)]
        percentage: bool,

        /// Write the shareable recipe payload (JSON) to this path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Recipe name used in the exported payload
        #[arg(long)]
        name: Option<String>,
    },

    /// Compute the missing one of beans, water and ratio
    Complete {
        #[arg(long)]
        bean: Option<f64>,
        #[arg(long)]
        water: Option<f64>,
        #[arg(long)]
        ratio: Option<f64>,
    },

    /// Show a recipe file's summary
    Show {
        /// Recipe file (.toml or .json)
        recipe: PathBuf,
    },

    /// Interactive menu (default)
    Interactive,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match try_run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_or_default(&cli.config)
        .with_context(|| format!("could not load {}", cli.config.display()))?;
    let lang = i18n::resolve_language(&cli.lang, cfg.language.as_deref());
    let pack = cli.locales.clone().or_else(|| cfg.locales_path());
    let mut tr = Translator::new_with_pack(&lang, pack.as_deref());

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Convert {
            recipe,
            magnification,
            bean,
            water,
            ratio,
            percentage,
            export,
            name,
        } => {
            let opts = ConvertOptions {
                request: ConversionRequest {
                    magnification,
                    bean_g: bean,
                    water_ml: water,
                    ratio,
                },
                show_percentage: percentage || cfg.show_percentage,
                export,
                share_name: name,
            };
            app::run_convert(&recipe, &opts, &tr)
        }
        Commands::Complete { bean, water, ratio } => app::run_complete(bean, water, ratio, &tr),
        Commands::Show { recipe } => app::run_show(&recipe, &tr),
        Commands::Interactive => app::run(&mut cfg, &cli.config, &mut tr),
    };

    if let Err(err) = result {
        bail!(ui_cli::describe_error(&tr, &err));
    }
    Ok(())
}
