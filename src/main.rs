use clap::{Parser, Subcommand};
use routegen::config::{self, ConfigError, Options};
use routegen::engine::Engine;
use routegen::output;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "routegen")]
#[command(about = "File-based route generator for JS single-page apps")]
#[command(long_about = "\
File-based route generator for JS single-page apps

Your pages directory is the router config. Files become routes, [bracket]
names become URL parameters, and a folder named after a file nests its
contents as sub-routes of that file.

Pages structure:

  pages/
  ├── index.js                 # /            (exact)
  ├── about.js                 # /about
  ├── shop.js                  # /shop        (owns the sub-routes below)
  ├── shop/
  │   ├── cart.js              # /shop/cart
  │   └── [id].js              # /shop/:id
  ├── [user].js                # /:user       (sorted after static routes)
  └── docs.page.js             # ignored — more than one dot

Route precedence is derived, not configured: index and static routes come
first, folder subtrees next, dynamic catch-alls last. Conflicting entries
(two dynamic siblings, routes shadowed by a nested index) are skipped and
logged, never fatal.

Options come from routegen.toml in the working directory; command-line
flags override it.")]
#[command(version = version_string())]
struct Cli {
    /// Pages directory to scan
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Directory the routes file is written to
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Name of the generated file
    #[arg(long, global = true)]
    output_filename: Option<String>,

    /// Directory with 'imports' and 'component' template overrides
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// File extension treated as a page (repeatable)
    #[arg(long = "ext", global = true)]
    extensions: Vec<String>,

    /// Named export copied onto route entries (repeatable)
    #[arg(long = "keyword", global = true)]
    keywords: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the route tree and print it without writing anything
    Scan,
    /// Generate the routes file
    Build {
        /// Keep running and regenerate on filesystem changes
        #[arg(long)]
        watch: bool,
    },
    /// Verify the routes file on disk is up to date
    Check,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = resolve_options(&cli)?;
    let mut engine = Engine::new(options)?;

    match cli.command {
        Command::Scan => {
            let tree = engine.scan()?;
            output::print_route_tree(&tree);
        }
        Command::Build { watch: false } => {
            engine.run()?;
        }
        Command::Build { watch: true } => {
            engine.run_watch()?;
        }
        Command::Check => {
            let output_path = engine.options().output_path();
            if !engine.check()? {
                eprintln!("{} is stale — run 'routegen build'", output_path.display());
                return Ok(ExitCode::FAILURE);
            }
            println!("{} is up to date", output_path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Defaults ← routegen.toml ← command-line flags.
fn resolve_options(cli: &Cli) -> Result<Options, ConfigError> {
    let mut options = Options::default();
    if let Some(file) = config::load_file_config(Path::new("."))? {
        options.merge_file(file);
    }

    if let Some(input) = &cli.input {
        options.input_dir = input.clone();
    }
    if let Some(output) = &cli.output {
        options.output_dir = output.clone();
    }
    if let Some(name) = &cli.output_filename {
        options.output_filename = name.clone();
    }
    if let Some(templates) = &cli.templates {
        options.template_dir = Some(templates.clone());
    }
    if !cli.extensions.is_empty() {
        options.allowed_extensions = cli.extensions.clone();
    }
    if !cli.keywords.is_empty() {
        options.keywords = cli.keywords.clone();
    }
    options.watch = matches!(cli.command, Command::Build { watch: true });

    options.normalize();
    options.validate()?;
    Ok(options)
}
