//! Command-line interface for the `isokit` binary.
//!
//! `compile` turns a saved diagram into a standalone document, `anchors`
//! lists the attachment choices of a single shape template.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use isokit_designer::{
    update_available_attachment_points, ComponentLibrary, DesignerState, DiagramComponent,
    FixedWidthMetrics, JsonFileStore, LabelRequest, ShapeLibrary,
};
use isokit_settings::Config;

/// Command-line arguments for the isokit diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a diagram file into an SVG document
    Compile {
        /// Diagram file (component array or full diagram file)
        #[arg(short, long)]
        diagram: PathBuf,

        /// Shape library index (JSON)
        #[arg(short, long)]
        shapes: Option<PathBuf>,

        /// Output SVG file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file (JSON or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Render anchor markers
        #[arg(long)]
        show_anchors: bool,

        /// Compute and log label placements, one per component
        #[arg(long)]
        labels: bool,
    },

    /// List the attachment points of one shape
    Anchors {
        /// Shape library index (JSON)
        #[arg(short, long)]
        shapes: Option<PathBuf>,

        /// Shape name
        shape: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn load_shapes(path: &Path) -> isokit_core::Result<ShapeLibrary> {
    Ok(ShapeLibrary::load_index(path)?)
}

fn shapes_path(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => config
            .shape_library_path()
            .context("No shape library given and no default location"),
    }
}

/// Builds a session from configuration: canvas, rendering, layout and the
/// persisted component library when it exists.
pub fn session(config: &Config, shapes: ShapeLibrary) -> Result<DesignerState> {
    let library = match config.component_library_path() {
        Ok(path) if path.exists() => ComponentLibrary::open(JsonFileStore::new(&path))
            .with_context(|| format!("Failed to open component library {}", path.display()))?,
        _ => ComponentLibrary::in_memory(),
    }
    .with_anchor_radius(config.rendering.anchor_radius);

    let mut state = DesignerState::new(shapes)
        .with_component_library(library)
        .with_canvas(config.canvas_size())
        .with_history_depth(config.history.max_depth);
    state.show_anchors = config.rendering.show_anchors;
    state.layout_options = config.to_layout_options();
    Ok(state)
}

fn label_requests(components: &[DiagramComponent]) -> Vec<LabelRequest> {
    components
        .iter()
        .map(|c| LabelRequest::new(c.id.clone(), c.shape.clone()))
        .collect()
}

/// Runs one command.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Compile {
            diagram,
            shapes,
            out,
            config,
            show_anchors,
            labels,
        } => {
            let config = load_config(config.as_deref())?;
            let shapes_path = shapes_path(shapes, &config)?;
            let shapes = load_shapes(&shapes_path)
                .with_context(|| format!("Failed to load shapes {}", shapes_path.display()))?;

            let mut state = session(&config, shapes)?;
            state.show_anchors |= show_anchors;
            state.load_from_file(&diagram)?;

            let document = state.render_document();
            if labels {
                let placed = state
                    .layout_labels(&label_requests(&state.components), &FixedWidthMetrics::default());
                for label in &placed {
                    tracing::info!(
                        component = %label.component_id,
                        x = label.position.x,
                        y = label.position.y,
                        align = ?label.align,
                        lines = label.lines.len(),
                        "Placed label"
                    );
                }
            }

            match out {
                Some(path) => {
                    std::fs::write(&path, &document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Wrote diagram");
                }
                None => println!("{document}"),
            }
            Ok(())
        }
        Command::Anchors { shapes, shape } => {
            let config = Config::default();
            let shapes_path = shapes_path(shapes, &config)?;
            let library = load_shapes(&shapes_path)
                .with_context(|| format!("Failed to load shapes {}", shapes_path.display()))?;

            if !library.contains(&shape) {
                anyhow::bail!("Unknown shape '{shape}'");
            }

            let mut state = DesignerState::new(library);
            let id = state
                .add_3d_shape(&shape, "center", None)
                .context("Failed to place shape")?;
            let compiled = state.compile();
            let component = compiled
                .component(&id)
                .with_context(|| format!("Shape '{shape}' did not compile"))?;
            for name in update_available_attachment_points(component) {
                println!("{name}");
            }
            Ok(())
        }
    }
}
