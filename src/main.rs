use anyhow::{Context, Result, ensure};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;

use mcx::client::params::{QueryDraft, wire_params};
use mcx::client::ApiClient;
use mcx::export::ExportSink;
use mcx::formatters::{format_analysis, format_guard_result, format_message, format_text_verdict};
use mcx::interactive::InteractiveApp;
use mcx::logging;
use mcx::orchestrator::{AnalysisData, GuardData, SearchData};
use mcx::schemas::{HAZARD_CATEGORIES, TextVerdict};

#[derive(Parser)]
#[command(
    name = "mcx",
    version,
    about = "Interactive client for exploring a message corpus via its search, analyze, and guard API",
    long_about = None
)]
struct Cli {
    /// Base URL of the corpus backend
    #[arg(long, env = "MCX_API_URL", default_value = "http://127.0.0.1:8000", global = true)]
    api_url: String,

    /// Directory for exported JSON artifacts (default: the download directory)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Skip writing export artifacts
    #[arg(long, global = true)]
    no_export: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus with any subset of the known parameters
    Search(SearchArgs),
    /// Run the full-dataset aggregation and render its series
    Analyze,
    /// Screen content against hazard categories
    Guard {
        #[command(subcommand)]
        action: GuardAction,
    },
    /// List the hazard category codes the guard service understands
    Categories,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query
    #[arg(short, long)]
    query: Option<String>,

    /// Receiver name
    #[arg(long)]
    receiver: Option<String>,

    /// Delivery status (backend-defined, passed through verbatim)
    #[arg(long)]
    status: Option<String>,

    /// Group name
    #[arg(long)]
    group: Option<String>,

    /// Own phone number
    #[arg(long)]
    own_phone: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Peer phone number
    #[arg(long)]
    phone: Option<String>,

    /// Source app
    #[arg(long)]
    app: Option<String>,

    /// Only deleted messages
    #[arg(long)]
    deleted: bool,

    /// Start date (forwarded as entered)
    #[arg(long)]
    start_date: Option<String>,

    /// End date (forwarded as entered)
    #[arg(long)]
    end_date: Option<String>,

    /// Latitude of the search center
    #[arg(long)]
    latitude: Option<String>,

    /// Longitude of the search center
    #[arg(long)]
    longitude: Option<String>,

    /// Radius around the search center
    #[arg(long)]
    radius: Option<String>,
}

impl SearchArgs {
    fn into_draft(self) -> QueryDraft {
        QueryDraft {
            q: self.query.unwrap_or_default(),
            name_of_receiver: self.receiver.unwrap_or_default(),
            message_status: self.status.unwrap_or_default(),
            group_name: self.group.unwrap_or_default(),
            own_phone: self.own_phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            app: self.app.unwrap_or_default(),
            is_deleted: self.deleted,
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            radius: self.radius.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum GuardAction {
    /// Find stored messages matching a hazard category
    Category {
        /// Category code (see `mcx categories`)
        code: String,

        /// Maximum number of matches to return
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Classify a single text
    Text {
        /// The text to check
        text: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);

    let export = if cli.no_export {
        ExportSink::disabled()
    } else {
        ExportSink::new(
            cli.export_dir
                .clone()
                .unwrap_or_else(ExportSink::default_dir),
        )
    };
    let use_color = !cli.no_color;

    match cli.command {
        None => {
            let client = ApiClient::new(&cli.api_url)?;
            let mut app = InteractiveApp::new(client, export);
            app.run()
        }
        Some(Commands::Search(args)) => {
            let client = ApiClient::new(&cli.api_url)?;
            run_search(&client, args.into_draft(), &export, cli.format, use_color)
        }
        Some(Commands::Analyze) => {
            let client = ApiClient::new(&cli.api_url)?;
            run_analyze(&client, &export, cli.format, use_color)
        }
        Some(Commands::Guard { action }) => {
            let client = ApiClient::new(&cli.api_url)?;
            match action {
                GuardAction::Category { code, limit } => {
                    run_guard_category(&client, &code, limit, &export, cli.format, use_color)
                }
                GuardAction::Text { text } => {
                    run_guard_text(&client, &text, cli.format, use_color)
                }
            }
        }
        Some(Commands::Categories) => {
            print_categories();
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "mcx", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_search(
    client: &ApiClient,
    draft: QueryDraft,
    export: &ExportSink,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let params = wire_params(&draft);
    tracing::debug!(?params, "search parameters");
    let envelope = client.search(&params)?;
    let data = SearchData::decode(envelope)?;

    match format {
        OutputFormat::Json => print_json(&data.envelope)?,
        OutputFormat::Text => {
            if data.messages.is_empty() {
                println!("No messages found.");
            } else {
                println!("Found {} messages:\n", data.messages.len());
                for message in &data.messages {
                    println!("{}\n", format_message(message, use_color));
                }
            }
        }
    }

    save_best_effort(export, &data.envelope, "search_result");
    Ok(())
}

fn run_analyze(
    client: &ApiClient,
    export: &ExportSink,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let envelope = client.analyze()?;
    let data = AnalysisData::decode(envelope)?;

    match format {
        OutputFormat::Json => print_json(&data.envelope)?,
        OutputFormat::Text => println!("{}", format_analysis(&data.payload, use_color)),
    }

    save_best_effort(export, &data.envelope, "analyze_result");
    Ok(())
}

fn run_guard_category(
    client: &ApiClient,
    code: &str,
    limit: u32,
    export: &ExportSink,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    ensure!(!code.is_empty(), "the category code must not be empty");
    let envelope = client.guard_category(code, limit)?;
    let data = GuardData::decode(envelope)?;

    match format {
        OutputFormat::Json => print_json(&data.envelope)?,
        OutputFormat::Text => println!("{}", format_guard_result(&data.result, use_color)),
    }

    save_best_effort(
        export,
        &data.envelope,
        &format!("guard_result_{}", data.result.category),
    );
    Ok(())
}

fn run_guard_text(
    client: &ApiClient,
    text: &str,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    ensure!(!text.trim().is_empty(), "the text to check must not be empty");
    let envelope = client.guard_text(text)?;

    match format {
        OutputFormat::Json => print_json(&envelope)?,
        OutputFormat::Text => {
            let verdict: TextVerdict = serde_json::from_value(envelope)
                .context("guard response is not a verdict")?;
            println!("{}", format_text_verdict(&verdict, use_color));
        }
    }
    Ok(())
}

fn print_json(envelope: &Value) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, envelope)?;
    writeln!(&mut handle)?;
    Ok(())
}

fn print_categories() {
    println!("Hazard categories:\n");
    for (code, label) in HAZARD_CATEGORIES {
        println!("  {code:<4} {label}");
    }
}

fn save_best_effort(export: &ExportSink, envelope: &Value, stem: &str) {
    match export.save_json(envelope, stem) {
        Ok(Some(path)) => eprintln!("Saved {}", path.display()),
        Ok(None) => {}
        Err(error) => eprintln!("Warning: export failed (result shown above): {error:#}"),
    }
}
