use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tick::config::{Config, Theme};
use tick::convert::{ExportFormat, ImportFormat};
use tick::output::{Format, Printer};
use tick::store::{CompletionMode, TaskEdit};
use tick::view::{StatusFilter, ViewFilter};

#[derive(Parser)]
#[command(name = "tick", version, about = "A small todo list kept in a JSON file")]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Shorthand for --format json
    #[arg(long, global = true)]
    json: bool,
    /// Task file (overrides TICK_FILE and the config file)
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,
    /// Config file to read instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Colour theme for pretty output
    #[arg(long, global = true, value_enum)]
    theme: Option<Theme>,
    #[command(subcommand)]
    command: Commands,
}

/// Narrow the listing that display indices refer to.
#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Only completed tasks
    #[arg(long, conflicts_with = "pending")]
    completed: bool,
    /// Only pending tasks
    #[arg(long)]
    pending: bool,
    /// Only tasks carrying this tag
    #[arg(long)]
    tag: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> ViewFilter {
        ViewFilter::new(StatusFilter::from_flags(self.completed, self.pending), self.tag)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description
        description: String,
        /// high, medium or low (default medium)
        #[arg(long, short)]
        priority: Option<String>,
        /// Tags to attach (comma-separated)
        #[arg(long, short, value_delimiter = ',')]
        tags: Vec<String>,
        /// Due date, e.g. 2024-01-31 or 2024-01-31T09:00:00Z
        #[arg(long, short)]
        due: Option<String>,
    },
    /// List tasks, highest priority first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Change fields of a listed task
    Edit {
        /// Display index from `list`
        #[arg(allow_hyphen_values = true)]
        index: i64,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New priority
        #[arg(long, short)]
        priority: Option<String>,
        /// Replace tags (comma-separated, empty to clear)
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        tags: Option<Vec<String>>,
        /// New due date (empty to clear)
        #[arg(long)]
        due: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Remove a listed task
    Remove {
        /// Display index from `list`
        #[arg(allow_hyphen_values = true)]
        index: i64,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Mark a listed task as completed
    Complete {
        /// Display index from `list`
        #[arg(allow_hyphen_values = true)]
        index: i64,
        /// Flip the completion state instead of setting it
        #[arg(long)]
        toggle: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Remove every task
    Clear,
    /// Show completion statistics
    Stats,
    /// Write all tasks to a CSV, Markdown or iCalendar file
    Export {
        #[arg(value_enum, id = "export_format", value_name = "FORMAT")]
        format: ExportFormat,
        /// Output path (default todos.<ext>)
        output: Option<PathBuf>,
    },
    /// Append tasks from a CSV or Markdown file
    Import {
        #[arg(value_enum, id = "import_format", value_name = "FORMAT")]
        format: ImportFormat,
        input: PathBuf,
    },
}

fn run(cli: Cli, format: Format) -> tick::error::Result<()> {
    let config = Config::load(cli.config.as_ref())?;
    let store_path = config.resolve_store_path(cli.file);
    let printer = Printer::new(format, cli.theme.unwrap_or(config.theme));
    log::debug!("using task file {}", store_path.display());

    match cli.command {
        Commands::Add {
            description,
            priority,
            tags,
            due,
        } => tick::commands::add::run(
            &store_path,
            &description,
            priority.as_deref(),
            tags,
            due,
            &printer,
        ),
        Commands::List { filter } => {
            tick::commands::list::run(&store_path, &filter.into_filter(), &printer)
        }
        Commands::Edit {
            index,
            description,
            priority,
            tags,
            due,
            filter,
        } => {
            let edit = TaskEdit {
                description,
                priority,
                tags,
                due,
            };
            tick::commands::edit::run(&store_path, &filter.into_filter(), index, edit, &printer)
        }
        Commands::Remove { index, filter } => {
            tick::commands::remove::run(&store_path, &filter.into_filter(), index, &printer)
        }
        Commands::Complete {
            index,
            toggle,
            filter,
        } => {
            let mode = if toggle {
                CompletionMode::Toggle
            } else {
                CompletionMode::Complete
            };
            tick::commands::complete::run(&store_path, &filter.into_filter(), index, mode, &printer)
        }
        Commands::Clear => tick::commands::clear::run(&store_path, &printer),
        Commands::Stats => tick::commands::stats::run(&store_path, &printer),
        Commands::Export { format, output } => {
            tick::commands::export::run(&store_path, format, output, &printer)
        }
        Commands::Import { format, input } => {
            tick::commands::import::run(&store_path, format, &input, &printer)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let format = if cli.json { Format::Json } else { cli.format };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
