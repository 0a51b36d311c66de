use anyhow::{Context, Result};
use atlas_graph::{build_forest, GraphAssembler};
use atlas_model::ResourceRef;
use atlas_store::InventorySnapshot;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;
mod flags;
mod report;

use config::CliConfig;
use flags::{TreeKind, TypeFlag};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Inventory relationship graphs and hierarchy trees", long_about = None)]
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

    /// Config file with default graph options
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the relationship graph around a root resource
    Graph(GraphArgs),

    /// Build a collapsible hierarchy forest from snapshot records
    Tree(TreeArgs),

    /// Summarize a snapshot file
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GraphArgs {
    /// Snapshot JSON file
    #[arg(long)]
    snapshot: PathBuf,

    /// Root resource, e.g. "organization:1"
    #[arg(long)]
    root: String,

    /// Expansion levels outward from the root (1-10)
    #[arg(long)]
    max_hops: Option<u32>,

    /// Node budget for the rendered graph
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Restrict the graph to these resource types
    #[arg(long, value_enum, value_delimiter = ',')]
    types: Vec<TypeFlag>,

    /// Skip parent/child and membership relations
    #[arg(long)]
    skip_hierarchy: bool,

    /// Skip dependency relations
    #[arg(long)]
    skip_dependencies: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct TreeArgs {
    /// Snapshot JSON file
    #[arg(long)]
    snapshot: PathBuf,

    /// Which record set to arrange into a forest
    #[arg(long, value_enum)]
    kind: TreeKind,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Snapshot JSON file
    #[arg(long)]
    snapshot: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Graph(args) => run_graph(args, &config),
        Commands::Tree(args) => run_tree(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn load_snapshot(path: &Path) -> Result<InventorySnapshot> {
    InventorySnapshot::from_path(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))
}

fn run_graph(args: GraphArgs, config: &CliConfig) -> Result<()> {
    let root: ResourceRef = args
        .root
        .parse()
        .with_context(|| format!("invalid --root {:?}", args.root))?;
    let snapshot = load_snapshot(&args.snapshot)?;

    let mut opts = config.graph_options();
    if let Some(max_hops) = args.max_hops {
        opts.max_hops = max_hops;
    }
    if let Some(max_nodes) = args.max_nodes {
        opts.max_nodes = max_nodes;
    }
    if !args.types.is_empty() {
        opts.allowed_types = args.types.iter().map(|t| t.as_domain()).collect();
    }
    if args.skip_hierarchy {
        opts.include_hierarchy = false;
    }
    if args.skip_dependencies {
        opts.include_dependencies = false;
    }

    let graph = GraphAssembler::new(&snapshot).build(&root, &opts)?;
    report::print_json(&graph, args.pretty)
}

fn run_tree(args: TreeArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    match args.kind {
        TreeKind::Organizations => {
            report::print_json(&build_forest(&snapshot.organizations()), args.pretty)
        }
        TreeKind::Entities => report::print_json(&build_forest(&snapshot.entities()), args.pretty),
        TreeKind::Prefixes => report::print_json(&build_forest(snapshot.prefixes()), args.pretty),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    report::print_json(&snapshot.summary(), args.pretty)
}
