use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("layer {layer} has no rows")]
    EmptyLayer { layer: usize },
    #[error("layer {layer} row {row} is {found} wide, expected {expected}")]
    RaggedRow {
        layer: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("layer {layer} row {row} column {col}: no material mapped for '{key}'")]
    UnmappedKey {
        layer: usize,
        row: usize,
        col: usize,
        key: char,
    },
    #[error("the space character always means \"any block\" and cannot be mapped")]
    ReservedKey,
    #[error("layer {layer} is {rows} x {cols}, beyond the coordinate range")]
    LayerTooLarge {
        layer: usize,
        rows: usize,
        cols: usize,
    },
    #[error("{count} layers is beyond the coordinate range")]
    TooManyLayers { count: usize },
    #[error("layer index {index} out of range for a structure with {len} layers")]
    LayerOutOfRange { index: usize, len: usize },
    #[error("structure '{structure}' refers to unknown material '{material}'")]
    UnknownMaterial { structure: String, material: String },
    #[error("structure '{structure}' has key '{key}', keys must be a single character")]
    BadKey { structure: String, key: String },
    #[error("structure '{0}' is already registered")]
    DuplicateName(String),
    #[error("no structure named '{0}'")]
    UnknownStructure(String),
    #[error("failed to parse structure definitions: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid structure '{structure}': {source}")]
    Definition {
        structure: String,
        #[source]
        source: Box<StructureError>,
    },
}

impl StructureError {
    /// True for pattern shape problems caught when compiling a template.
    pub fn is_validation(&self) -> bool {
        match self {
            StructureError::EmptyLayer { .. }
            | StructureError::RaggedRow { .. }
            | StructureError::UnmappedKey { .. }
            | StructureError::ReservedKey
            | StructureError::LayerTooLarge { .. }
            | StructureError::TooManyLayers { .. } => true,
            StructureError::Definition { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    pub(crate) fn at_layer(self, index: usize) -> Self {
        match self {
            StructureError::EmptyLayer { .. } => StructureError::EmptyLayer { layer: index },
            StructureError::RaggedRow {
                row,
                expected,
                found,
                ..
            } => StructureError::RaggedRow {
                layer: index,
                row,
                expected,
                found,
            },
            StructureError::UnmappedKey { row, col, key, .. } => StructureError::UnmappedKey {
                layer: index,
                row,
                col,
                key,
            },
            StructureError::LayerTooLarge { rows, cols, .. } => StructureError::LayerTooLarge {
                layer: index,
                rows,
                cols,
            },
            other => other,
        }
    }
}
