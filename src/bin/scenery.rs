use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scenery", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a visualization document and print its id.
    Validate(InArgs),
    /// Print resolved node geometry as JSON.
    Layout(LayoutArgs),
    /// Build the scene on a headless surface and print a summary.
    Build(BuildArgs),
    /// List bundled visualizations.
    List,
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input visualization JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input visualization JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width used for responsive column overrides.
    #[arg(long)]
    width: Option<f64>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input visualization JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width of the headless surface.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height of the headless surface.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Build(args) => cmd_build(args),
        Command::List => cmd_list(),
    }
}

fn read_spec(path: &Path) -> anyhow::Result<scenery::VisualizationSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read visualization '{}'", path.display()))?;
    let spec = scenery::VisualizationSpec::from_json_str(&text)
        .with_context(|| format!("load visualization '{}'", path.display()))?;
    Ok(spec)
}

fn cmd_validate(args: InArgs) -> anyhow::Result<()> {
    let spec = read_spec(&args.in_path)?;
    println!("ok {}", spec.id);
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let spec = read_spec(&args.in_path)?;
    let mut diagnostics = scenery::Diagnostics::new();
    let layout = scenery::apply_layout_with(
        &spec.scene,
        &scenery::LayoutOptions {
            viewport_width: args.width,
        },
        &mut diagnostics,
    );
    let out = if args.pretty {
        serde_json::to_string_pretty(&layout)
    } else {
        serde_json::to_string(&layout)
    }
    .context("serialize layout")?;
    println!("{out}");
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let spec = read_spec(&args.in_path)?;
    let surface = scenery::HeadlessSurface::new(scenery::Size::new(args.width, args.height));
    let mut graph = scenery::SceneGraph::new(surface, &spec.scene, spec.graph_options())
        .context("build scene")?;

    let canvas = graph.canvas_size();
    println!("{} ({}x{})", spec.title, canvas.width, canvas.height);
    for layer in graph.get_layers() {
        println!(
            "layer {} z={} visible={} nodes={} edges={}",
            layer.id(),
            layer.z_index(),
            layer.is_visible(),
            layer.node_ids().len(),
            layer.edge_ids().len()
        );
    }
    for node in graph.get_all_nodes() {
        let b = node.bounds();
        println!(
            "  node {} [{}] at ({}, {}) size {}x{}",
            node.id(),
            node.kind(),
            b.x,
            b.y,
            b.width,
            b.height
        );
    }
    for edge in graph.get_all_edges() {
        let flat = edge.route().flat_points();
        println!("  edge {} {} -> {} {:?}", edge.id(), edge.from(), edge.to(), flat);
    }
    for d in graph.diagnostics() {
        println!("warning: {d}");
    }
    println!(
        "{} surface ops, {} animations",
        graph.surface().ops().len(),
        graph.surface().live_animations()
    );
    graph.destroy();
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = scenery::SpecRegistry::with_builtins();
    for entry in registry.list() {
        println!("{}\t{}", entry.id, entry.title);
    }
    Ok(())
}
