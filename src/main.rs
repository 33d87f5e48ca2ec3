use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use anniversary::config::{config_dir, init_config_dir, load_settings, Settings};
use anniversary::error::{AnniversaryError, Result};
use anniversary::record::{parse_date, AddressUpdate, Anniversary, AnniversaryUpdate};
use anniversary::shell::{render_details, render_listing, render_upcoming, Shell};
use anniversary::store::{load_session, RecordStore};

#[derive(Parser)]
#[command(name = "anniversary")]
#[command(version, about = "Minimal terminal anniversary minder", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.anniversary or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Schema file to validate against (overrides config.toml)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Data file holding the anniversaries (overrides config.toml)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config directory with config.toml and the default schema
    Init,

    /// List saved anniversaries
    List,

    /// Show every field of one anniversary
    Show {
        /// Number from 'list' (e.g., 1)
        number: String,
    },

    /// Add a new anniversary
    Add {
        /// Name(s) of the people involved
        #[arg(long)]
        names: String,

        /// Anniversary date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Anniversary type (e.g., Wedding, Birthday)
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Edit an anniversary; omitted or empty values keep the current field
    Edit {
        /// Number from 'list' (e.g., 1)
        number: String,

        #[arg(long)]
        names: Option<String>,

        /// New anniversary date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Delete an anniversary
    Delete {
        /// Number from 'list' (e.g., 1)
        number: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List anniversaries coming up soon
    Upcoming {
        /// Window in days (default: [upcoming] days from config.toml)
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Interactive menu
    Menu,
}

/// Optional fields shared by add and edit
#[derive(Args)]
struct DetailArgs {
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Street address
    #[arg(long)]
    street: Option<String>,

    #[arg(long)]
    municipality: Option<String>,

    /// Province code accepted by the schema (e.g., ON)
    #[arg(long)]
    province: Option<String>,

    #[arg(long)]
    postal_code: Option<String>,
}

impl DetailArgs {
    fn address(&self) -> AddressUpdate {
        AddressUpdate {
            street_address: self.street.clone(),
            municipality: self.municipality.clone(),
            province: self.province.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let (schema, data) = (cli.schema, cli.data);
    let settings = || -> Result<Settings> {
        let mut settings = load_settings(&cfg_dir)?;
        if let Some(schema) = &schema {
            settings.schema_path = schema.clone();
        }
        if let Some(data) = &data {
            settings.data_path = data.clone();
        }
        Ok(settings)
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List => cmd_list(&settings()?),
        Commands::Show { number } => cmd_show(&settings()?, &number),
        Commands::Add {
            names,
            date,
            kind,
            details,
        } => cmd_add(&settings()?, names, &date, kind, &details),
        Commands::Edit {
            number,
            names,
            date,
            kind,
            details,
        } => cmd_edit(
            &settings()?,
            &number,
            names,
            date.as_deref(),
            kind,
            &details,
        ),
        Commands::Delete { number, yes } => cmd_delete(&settings()?, &number, yes),
        Commands::Upcoming { days } => cmd_upcoming(&settings()?, days),
        Commands::Menu => cmd_menu(&settings()?),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    let settings = init_config_dir(cfg_dir)?;

    println!("Initialized anniversary config at: {}", cfg_dir.display());
    println!();
    println!("  Schema: {}", settings.schema_path.display());
    println!("  Data:   {}", settings.data_path.display());
    println!();
    println!("Then add your first anniversary:");
    println!("  anniversary add --names <names> --date <YYYY-MM-DD> --type <type>");

    Ok(())
}

/// Turn a 1-based listing number into a store index
fn resolve_index(reference: &str) -> Result<usize> {
    reference
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| AnniversaryError::InvalidIndex(reference.to_string()))
}

fn cmd_list(settings: &Settings) -> Result<()> {
    let store = load_session(settings)?;

    println!("{}", render_listing(store.list()));
    if !store.is_empty() {
        println!();
        println!("Total: {} anniversaries", store.len());
    }
    Ok(())
}

fn cmd_show(settings: &Settings, number: &str) -> Result<()> {
    let store = load_session(settings)?;
    let record = store.get(resolve_index(number)?)?;

    println!("{}", render_details(record));
    Ok(())
}

fn cmd_add(
    settings: &Settings,
    names: String,
    date: &str,
    kind: String,
    details: &DetailArgs,
) -> Result<()> {
    let mut store = load_session(settings)?;

    let candidate = Anniversary {
        names,
        anniversary_date: parse_date(date)?,
        anniversary_type: kind,
        description: non_empty(&details.description),
        email: non_empty(&details.email),
        phone: non_empty(&details.phone),
        address: details.address().to_address(),
    };
    let summary = format!(
        "\"{}\" anniversary for \"{}\"",
        candidate.anniversary_type, candidate.names
    );

    store.add(candidate)?;

    println!("Added {summary} as #{}", store.len());
    println!("  Saved: {}", store.data_path().display());
    Ok(())
}

fn cmd_edit(
    settings: &Settings,
    number: &str,
    names: Option<String>,
    date: Option<&str>,
    kind: Option<String>,
    details: &DetailArgs,
) -> Result<()> {
    let mut store = load_session(settings)?;
    let index = resolve_index(number)?;

    let anniversary_date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };

    let update = AnniversaryUpdate {
        names,
        anniversary_date,
        anniversary_type: kind,
        description: details.description.clone(),
        email: details.email.clone(),
        phone: details.phone.clone(),
        address: details.address(),
    };

    store.edit(index, &update)?;

    let record = store.get(index)?;
    println!("Updated #{}", index + 1);
    println!("{}", render_details(record));
    Ok(())
}

fn cmd_delete(settings: &Settings, number: &str, yes: bool) -> Result<()> {
    let mut store = load_session(settings)?;
    let index = resolve_index(number)?;
    let record = store.get(index)?;

    if !yes && !confirm_delete(record)? {
        println!("Nothing deleted.");
        return Ok(());
    }

    let removed = store.delete(index)?;
    println!(
        "Deleted \"{}\" anniversary for \"{}\"",
        removed.anniversary_type, removed.names
    );
    Ok(())
}

fn confirm_delete(record: &Anniversary) -> Result<bool> {
    print!(
        "Delete \"{}\" anniversary for \"{}\"? (y/N): ",
        record.anniversary_type, record.names
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn cmd_upcoming(settings: &Settings, days: Option<i64>) -> Result<()> {
    let store = load_session(settings)?;
    let days = days.unwrap_or(settings.upcoming_days);
    let today = chrono::Local::now().date_naive();

    let upcoming = store.upcoming(today, days);
    println!("Upcoming anniversaries (next {days} days)");
    println!("{}", render_upcoming(store.list(), &upcoming, days));
    Ok(())
}

fn cmd_menu(settings: &Settings) -> Result<()> {
    let mut store: RecordStore = load_session(settings)?;
    let today = chrono::Local::now().date_naive();

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(
        &mut store,
        stdin.lock(),
        stdout.lock(),
        today,
        settings.upcoming_days,
    )
    .run()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}
