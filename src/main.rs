use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use poregraph::{Design, DesignConfig, DesignType, PhaseType, Pipeline, logging};

/// Generate random porous metamaterial unit cells and report their topology.
#[derive(Parser)]
#[command(name = "poregraph")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    design: DesignArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a structure and print its metrics (default behavior)
    Generate,
}

#[derive(Args, Debug, Default)]
struct DesignArgs {
    /// Number of nodes in the structure
    #[arg(short, long, global = true)]
    nodes: Option<usize>,

    /// Connectivity radius in [0, 1]
    #[arg(short, long, global = true)]
    connectivity: Option<f64>,

    /// Seed for a reproducible structure
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Phase type recorded with the design (solid, pore, dual)
    #[arg(long, global = true)]
    phase: Option<PhaseType>,

    /// Record the design as not symmetric
    #[arg(long, global = true)]
    no_symmetry: bool,

    /// Design type recorded with the design (simple, complex, custom)
    #[arg(long, global = true)]
    design: Option<DesignType>,

    /// YAML or JSON file with design and layout settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Metric and property tables
    #[default]
    Summary,
    /// The full design as JSON
    Json,
}

/// Defaults, then the config file, then flags
fn resolve_config(args: &DesignArgs) -> anyhow::Result<DesignConfig> {
    let mut config = match &args.config {
        Some(path) => DesignConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DesignConfig::default(),
    };

    if let Some(nodes) = args.nodes {
        config.node_count = nodes;
    }
    if let Some(connectivity) = args.connectivity {
        config.connectivity = connectivity;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(phase) = args.phase {
        config.phase_type = phase;
    }
    if args.no_symmetry {
        config.symmetry = false;
    }
    if let Some(design) = args.design {
        config.design_type = design;
    }

    config.validate()?;
    Ok(config)
}

fn render_summary(design: &Design, out: &mut impl Write) -> io::Result<()> {
    let graph = &design.output.graph;
    writeln!(out, "Structure Analysis")?;
    writeln!(out, "{:<20}{}", "Nodes", graph.node_count())?;
    writeln!(out, "{:<20}{}", "Edges", graph.edge_count())?;
    write!(out, "{}", design.output.metrics)?;
    writeln!(out)?;
    writeln!(out, "Structure Properties")?;
    write!(out, "{}", design.properties)?;
    writeln!(out, "{:<20}{}", "Design Type", design.properties.design_type)?;
    Ok(())
}

fn generate(args: &DesignArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let pipeline = Pipeline::with_config(config.pipeline_config())?;
    let design = pipeline.run_design(&config.request())?;

    info!(
        nodes = design.output.graph.node_count(),
        edges = design.output.graph.edge_count(),
        "generated design"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Summary => render_summary(&design, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &design)?;
            writeln!(out)?;
        }
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate) | None => generate(&cli.design)?,
    }

    Ok(())
}
