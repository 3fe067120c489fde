use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use engine::Engine;
use flags::{ChartKindFlag, SchemaKind, TopicAxisFlag};
use heatmap_catalog::{extract_bracket_values, ChartSynthesizer, NormalizedKey, RandomSeries};
use heatmap_matrix::{
    checklist_payload, column_options, toggle_selection, MatrixError, MatrixFilters, ValueRange,
};
use heatmap_protocol::{
    schema_json, serialize_json, serialize_json_pretty, CellDetailPayload, ChartPayload,
    ChecklistPayload, ErrorEnvelope, LabelPayload, MatrixPayload,
};
use serde::Serialize;
use std::path::PathBuf;

mod engine;
mod flags;

#[derive(Parser)]
#[command(name = "heatmap")]
#[command(about = "Measurement heat-map matrix and drill-down resolution", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the mock chart series (overrides chart.seed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the heat-map matrix
    Matrix(MatrixArgs),

    /// Resolve a clicked cell from its rendered axis labels
    Resolve(ResolveArgs),

    /// Synthesize one detail chart
    Chart(ChartArgs),

    /// Encode or decode axis labels
    #[command(subcommand)]
    Label(LabelCommand),

    /// Column filter options and select-all toggle state
    Columns(ColumnsArgs),

    /// Catalog index statistics
    Stats(CatalogArgs),

    /// Print the JSON schema of an output payload
    Schema(SchemaArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Measurement catalog (JSON array of records)
    #[arg(long)]
    catalog: PathBuf,
}

#[derive(Args)]
struct MatrixArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Per-cell backing values (JSON array of topic rows)
    #[arg(long)]
    backing: PathBuf,

    /// Keep only these columns (repeat or comma-separate)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Lower bound of the value filter (default: config value_range)
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper bound of the value filter (default: config value_range)
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Override which axis the backing topic field names
    #[arg(long, value_enum)]
    topic_axis: Option<TopicAxisFlag>,
}

#[derive(Args)]
struct ResolveArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Column label as rendered (x)
    #[arg(long)]
    x: String,

    /// Row label as rendered (y)
    #[arg(long)]
    y: String,
}

#[derive(Args)]
struct ChartArgs {
    /// Chart kind
    #[arg(long, value_enum, default_value = "bar")]
    kind: ChartKindFlag,

    /// Free text whose first bracketed list becomes the categories
    #[arg(long)]
    text: Option<String>,
}

#[derive(Subcommand)]
enum LabelCommand {
    /// Canonical key to decorated label
    Encode { key: String },
    /// Rendered markup back to the canonical key
    Decode { markup: String },
}

#[derive(Args)]
struct ColumnsArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Click count of the select-all toggle
    #[arg(long, default_value_t = 0)]
    clicks: u32,
}

#[derive(Args)]
struct SchemaArgs {
    #[arg(value_enum)]
    kind: SchemaKind,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(err) = run(cli) {
        let envelope = classify_error(&err);
        match serialize_json(&envelope) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = engine::load_config(cli.config.as_deref(), cli.seed)?;
    let pretty = cli.pretty;

    match cli.command {
        Commands::Matrix(args) => {
            let mut config = config;
            if let Some(axis) = args.topic_axis {
                config.backing.topic_axis = axis.as_domain();
            }
            let payload = run_matrix(&args, config)?;
            emit(&payload, pretty)
        }
        Commands::Resolve(args) => {
            let engine = Engine::load(&args.catalog.catalog, config)?;
            let payload: CellDetailPayload = heatmap_matrix::CellResolver::new(
                &engine.index,
                engine.codec(),
            )
            .resolve_markup(&args.x, &args.y)
            .to_payload();
            if !payload.found {
                log::info!("no data for ({}, {})", args.x, args.y);
            }
            emit(&payload, pretty)
        }
        Commands::Chart(args) => emit(&run_chart(&args, &config)?, pretty),
        Commands::Label(command) => emit(&run_label(command, &config)?, pretty),
        Commands::Columns(args) => {
            let engine = Engine::load(&args.catalog.catalog, config)?;
            let options = column_options(&engine.assembler, &engine.index);
            let selected = toggle_selection(&options, args.clicks);
            let payload: ChecklistPayload = checklist_payload(&options, &selected);
            emit(&payload, pretty)
        }
        Commands::Stats(args) => {
            let engine = Engine::load(&args.catalog, config)?;
            emit(engine.index.stats(), pretty)
        }
        Commands::Schema(args) => {
            let schema = match args.kind {
                SchemaKind::Matrix => schema_json::<MatrixPayload>(),
                SchemaKind::Cell => schema_json::<CellDetailPayload>(),
                SchemaKind::Chart => schema_json::<ChartPayload>(),
                SchemaKind::Checklist => schema_json::<ChecklistPayload>(),
                SchemaKind::Label => schema_json::<LabelPayload>(),
                SchemaKind::Error => schema_json::<ErrorEnvelope>(),
            }?;
            println!("{schema}");
            Ok(())
        }
    }
}

fn run_matrix(args: &MatrixArgs, config: heatmap_matrix::MatrixConfig) -> Result<MatrixPayload> {
    let engine = Engine::load(&args.catalog.catalog, config)?;
    let backing = engine.load_backing(&args.backing)?;

    let (default_min, default_max) = engine.config.value_range;
    let range = ValueRange::new(
        args.min.unwrap_or(default_min),
        args.max.unwrap_or(default_max),
    );
    let filters = MatrixFilters::all(range).with_columns(&args.columns);

    let view = engine.assembler.assemble(&engine.index, &backing, &filters);
    Ok(view.to_payload(engine.codec(), &engine.config.bands))
}

fn run_chart(args: &ChartArgs, config: &heatmap_matrix::MatrixConfig) -> Result<ChartPayload> {
    let synthesizer =
        ChartSynthesizer::try_new(config.chart.clone()).context("Invalid chart config")?;
    let extracted = args.text.as_deref().and_then(extract_bracket_values);
    let mut series = RandomSeries::new(&config.chart);
    let chart = synthesizer.synthesize(args.kind.as_domain(), extracted.as_deref(), &mut series);
    Ok(ChartPayload {
        kind: chart.kind().as_str().to_string(),
        categories: chart.categories().to_vec(),
        series: chart.series().to_vec(),
    })
}

fn run_label(command: LabelCommand, config: &heatmap_matrix::MatrixConfig) -> Result<LabelPayload> {
    let codec = heatmap_matrix::LabelCodec::new(&config.labels).context("Invalid label config")?;
    let key = match command {
        LabelCommand::Encode { key } => NormalizedKey::new(&key),
        LabelCommand::Decode { markup } => codec.decode_markup(&markup),
    };
    let label = codec.encode(&key);
    Ok(LabelPayload {
        key: key.into_string(),
        markup: codec.render_display(&label),
        plain: codec.render_plain(&label),
    })
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serialize_json_pretty(value)?
    } else {
        serialize_json(value)?
    };
    println!("{output}");
    Ok(())
}

fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");
    for cause in err.chain() {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return ErrorEnvelope::new("not_found", message).with_hint("check the file path");
            }
        }
        if let Some(matrix) = cause.downcast_ref::<MatrixError>() {
            let code = match matrix {
                MatrixError::InvalidConfig(_) | MatrixError::TomlError(_) => "invalid_config",
                MatrixError::InvalidBacking(_) => "invalid_backing",
                _ => continue,
            };
            return ErrorEnvelope::new(code, message);
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return ErrorEnvelope::new("invalid_json", message);
        }
        if let Some(heatmap_catalog::CatalogError::InvalidCatalog(_)) =
            cause.downcast_ref::<heatmap_catalog::CatalogError>()
        {
            return ErrorEnvelope::new("invalid_catalog", message)
                .with_hint("the catalog must be a JSON array of records");
        }
    }
    ErrorEnvelope::new("internal", message)
}
