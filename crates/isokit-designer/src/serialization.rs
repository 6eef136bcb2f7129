//! Serialization and deserialization for diagram files.
//!
//! The durable form of a scene graph is a JSON array of
//! [`SerializedDiagramComponent`]. Loading validates the whole document
//! before anything is built, so a malformed file never yields a partial
//! scene graph. Geometry is never stored; it is rederived on compile.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use isokit_core::DiagramError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::{Attached2DShape, DiagramComponent, SerializedDiagramComponent};
use crate::scene_graph::validate_order;

/// Diagram file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Serializes the durable subset of every component.
pub fn serialize_components(components: &[DiagramComponent]) -> serde_json::Result<String> {
    let durable: Vec<SerializedDiagramComponent> =
        components.iter().map(DiagramComponent::to_serialized).collect();
    serde_json::to_string_pretty(&durable)
}

/// Parses and validates a persisted component array.
pub fn deserialize_components(json: &str) -> std::result::Result<Vec<DiagramComponent>, DiagramError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DiagramError::InvalidJson {
        reason: e.to_string(),
    })?;
    components_from_value(&value)
}

/// Validates an already parsed component array.
pub fn components_from_value(value: &Value) -> std::result::Result<Vec<DiagramComponent>, DiagramError> {
    let entries = value.as_array().ok_or(DiagramError::NotAnArray)?;
    let components: Vec<DiagramComponent> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_component(index, entry).map(DiagramComponent::from))
        .collect::<std::result::Result<_, _>>()?;
    validate_order(&components)?;
    Ok(components)
}

fn required_str(obj: &Map<String, Value>, index: usize, field: &str) -> std::result::Result<String, DiagramError> {
    obj.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DiagramError::InvalidField {
            index,
            field: field.to_string(),
        })
}

fn parse_component(index: usize, entry: &Value) -> std::result::Result<SerializedDiagramComponent, DiagramError> {
    let obj = entry.as_object().ok_or(DiagramError::NotAnObject { index })?;
    let invalid = |field: &str| DiagramError::InvalidField {
        index,
        field: field.to_string(),
    };

    let relative_to_id = match obj.get("relativeToId") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(_) => return Err(invalid("relativeToId")),
    };

    let decorations = obj
        .get("attached2DShapes")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("attached2DShapes"))?;
    let attached_2d_shapes = decorations
        .iter()
        .enumerate()
        .map(|(decoration, d)| {
            let name = d.get("name").and_then(Value::as_str);
            let attached_to = d.get("attachedTo").and_then(Value::as_str);
            match (name, attached_to) {
                (Some(name), Some(attached_to)) => Ok(Attached2DShape::new(name, attached_to)),
                _ => Err(DiagramError::InvalidDecoration { index, decoration }),
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(SerializedDiagramComponent {
        id: required_str(obj, index, "id")?,
        shape: required_str(obj, index, "shape")?,
        position: required_str(obj, index, "position")?,
        relative_to_id,
        attached_2d_shapes,
    })
}

/// Diagram metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Complete diagram file: the component array plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramFile {
    pub version: String,
    pub metadata: DiagramMetadata,
    pub components: Vec<SerializedDiagramComponent>,
}

impl DiagramFile {
    /// Create a new, empty diagram file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DiagramMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            components: Vec::new(),
        }
    }

    /// File holding the durable subset of `components`.
    pub fn from_components(name: impl Into<String>, components: &[DiagramComponent]) -> Self {
        let mut file = Self::new(name);
        file.components = components.iter().map(DiagramComponent::to_serialized).collect();
        file
    }

    /// Rebuilds live components.
    pub fn to_components(&self) -> Vec<DiagramComponent> {
        self.components
            .iter()
            .cloned()
            .map(DiagramComponent::from)
            .collect()
    }

    /// Parses either a full diagram file or a bare component array,
    /// validating the components in both cases.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DiagramError::InvalidJson {
                reason: e.to_string(),
            })
            .context("Failed to parse diagram file")?;

        let (components, metadata, version) = match &value {
            Value::Array(_) => (&value, None, None),
            Value::Object(obj) => (
                obj.get("components").unwrap_or(&Value::Null),
                obj.get("metadata"),
                obj.get("version").and_then(Value::as_str),
            ),
            _ => return Err(DiagramError::NotAnArray).context("Invalid diagram file"),
        };

        let components = components_from_value(components).context("Invalid diagram components")?;
        let mut file = Self::from_components("Untitled", &components);
        if let Some(metadata) = metadata {
            file.metadata = serde_json::from_value(metadata.clone())
                .context("Failed to parse diagram metadata")?;
        }
        if let Some(version) = version {
            file.version = version.to_string();
        }
        Ok(file)
    }

    /// Save diagram to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize diagram")?;
        std::fs::write(path.as_ref(), json).context("Failed to write diagram file")?;
        Ok(())
    }

    /// Load diagram from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read diagram file")?;
        Self::from_json(&content)
    }
}
