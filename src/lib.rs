//! # isokit
//!
//! An isometric diagram engine. Diagrams are built from isometric blocks
//! stacked relative to one another through named attachment points, then
//! compiled into a single markup document with optional labels.
//!
//! ## Architecture
//!
//! isokit is organized as a workspace with multiple crates:
//!
//! 1. **isokit-core** - Value types, anchor naming, error taxonomy
//! 2. **isokit-designer** - Scene graph, attachment geometry, compiler,
//!    label layout, shape and component libraries, editing session
//! 3. **isokit-settings** - Configuration files
//! 4. **isokit** - This facade plus the `isokit` command-line binary

pub mod cli;

pub use isokit_designer as designer;
pub use isokit_settings as settings;

pub use isokit_core::{
    AttachmentPoint, BoundingBox, CanvasSize, DiagramError, Error, LibraryError, Placement,
    Point, Result, Shape, ShapeKind, ShapeLibraryError,
};

pub use isokit_designer::{
    compile_diagram, layout_labels, CompiledDiagram, ComponentLibrary, DesignerState,
    DiagramComponent, DiagramFile, FixedWidthMetrics, LabelLayoutOptions, LabelRequest,
    LayoutStrategy, PlacedLabel, ShapeLibrary,
};

pub use isokit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, leaving stdout for documents
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
