use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use meal_groups::config::{WebConfig, DEFAULT_BIND, DEFAULT_MAX_ATTEMPTS, DEFAULT_PORT, DRAW_ARCHIVE_CAPACITY};
use meal_groups::display::{render_participants, render_report, write_report_to_file};
use meal_groups::draw::{prepare, run_prepared};
use meal_groups::export::{to_csv_string, to_json};
use meal_groups::input::read_message;
use meal_groups::seed::resolve_seed;
use meal_groups::{web, DrawError};

#[derive(Parser, Debug)]
#[command(name = "meal-groups")]
#[command(version)]
#[command(about = "Splits a pasted list of people into balanced lunch and dinner groups")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one draw in the terminal
    Draw(DrawArgs),

    /// Serve the web page
    Web(WebArgs),
}

#[derive(clap::Args, Debug)]
struct DrawArgs {
    /// File holding the message (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed: a number or any word. Derived from the clock when omitted
    #[arg(short, long)]
    seed: Option<String>,

    /// Maximum number of construction attempts
    #[arg(long, env = "MEAL_GROUPS_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct WebArgs {
    /// Port to listen on
    #[arg(long, env = "MEAL_GROUPS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "MEAL_GROUPS_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Number of past draws kept for export
    #[arg(long, default_value_t = DRAW_ARCHIVE_CAPACITY)]
    archive_capacity: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn exit_code(error: &DrawError) -> i32 {
    match error {
        DrawError::NoPeople => 2,
        DrawError::NoEligibleSlots(_) => 3,
        DrawError::Infeasible { .. } => 4,
        _ => 5,
    }
}

fn fail(error: DrawError) -> ! {
    match &error {
        DrawError::NoPeople => eprintln!("No people detected. Check the message format."),
        _ => eprintln!("{}", error),
    }
    process::exit(exit_code(&error));
}

fn run_draw_command(args: DrawArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Paste the whole message here.");
                eprintln!("To finish: press Enter twice (two blank lines), or type FIN on its own line.\n");
            }
            read_message(stdin.lock())?
        }
    };

    if text.trim().is_empty() {
        eprintln!("No text received. Run again and paste the message.");
        process::exit(1);
    }

    let model = prepare(&text).unwrap_or_else(|e| fail(e));
    if args.format == OutputFormat::Text && args.output.is_none() {
        println!("{}", render_participants(&model.people));
    }

    let seed = resolve_seed(args.seed.as_deref());
    let draw = run_prepared(&model, seed, args.max_attempts).unwrap_or_else(|e| fail(e));

    let rendered = match args.format {
        OutputFormat::Text => render_report(&draw, Utc::now()),
        OutputFormat::Csv => to_csv_string(&draw)?,
        OutputFormat::Json => to_json(&draw)?,
    };

    match &args.output {
        Some(path) => {
            write_report_to_file(&rendered, path)?;
            eprintln!("Saved to {} (seed {})", path.display(), draw.seed.value);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Draw(draw_args) => {
            init_logging("warn");
            run_draw_command(draw_args)
        }
        Commands::Web(web_args) => {
            init_logging("info");
            println!("Access the site at http://localhost:{}", web_args.port);
            web::start_server(WebConfig {
                bind: web_args.bind,
                port: web_args.port,
                archive_capacity: web_args.archive_capacity,
            })
            .await?;
            Ok(())
        }
    }
}
