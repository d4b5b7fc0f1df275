use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Identity of a block material. `0` is always air.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);

    #[inline]
    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub tag: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read material catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse material catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("material '{name}' requests id {id} which is already used by '{owner}'")]
    IdInUse {
        name: String,
        id: u16,
        owner: String,
    },
    #[error("material '{0}' cannot take id 0, it is reserved for air")]
    ReservedAir(String),
    #[error("material '{0}' is already registered")]
    DuplicateName(String),
    #[error("material id space exhausted")]
    Exhausted,
}

/// Name <-> id registry of block materials.
#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    by_id: hashbrown::HashMap<MaterialId, Material>,
    by_key: hashbrown::HashMap<String, MaterialId>,
    next_id: u16,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    pub const AIR_KEY: &'static str = "air";

    pub fn new() -> Self {
        let mut catalog = Self {
            by_id: hashbrown::HashMap::new(),
            by_key: hashbrown::HashMap::new(),
            next_id: 1,
        };
        catalog.insert(Material {
            id: MaterialId::AIR,
            key: Self::AIR_KEY.to_string(),
            tag: None,
        });
        catalog
    }

    fn insert(&mut self, material: Material) {
        self.by_key.insert(material.key.clone(), material.id);
        self.by_id.insert(material.id, material);
    }

    fn next_free_id(&mut self) -> Result<MaterialId, CatalogError> {
        while self.by_id.contains_key(&MaterialId(self.next_id)) {
            self.next_id = self.next_id.checked_add(1).ok_or(CatalogError::Exhausted)?;
        }
        Ok(MaterialId(self.next_id))
    }

    /// Registers `key` under the next free id, or returns the existing id.
    pub fn register(&mut self, key: &str) -> Result<MaterialId, CatalogError> {
        if let Some(id) = self.get_id(key) {
            return Ok(id);
        }
        let id = self.next_free_id()?;
        self.insert(Material {
            id,
            key: key.to_string(),
            tag: None,
        });
        Ok(id)
    }

    /// Registers `key` under a caller-chosen id.
    pub fn register_with_id(
        &mut self,
        key: &str,
        id: MaterialId,
        tag: Option<String>,
    ) -> Result<MaterialId, CatalogError> {
        if key == Self::AIR_KEY {
            return if id.is_air() {
                Ok(id)
            } else {
                Err(CatalogError::IdInUse {
                    name: key.to_string(),
                    id: id.0,
                    owner: Self::AIR_KEY.to_string(),
                })
            };
        }
        if id.is_air() {
            return Err(CatalogError::ReservedAir(key.to_string()));
        }
        if self.by_key.contains_key(key) {
            return Err(CatalogError::DuplicateName(key.to_string()));
        }
        if let Some(owner) = self.by_id.get(&id) {
            return Err(CatalogError::IdInUse {
                name: key.to_string(),
                id: id.0,
                owner: owner.key.clone(),
            });
        }
        self.insert(Material {
            id,
            key: key.to_string(),
            tag,
        });
        Ok(id)
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.by_id.get(&id)
    }

    /// Name of `id`, or `None` for ids the catalog never issued.
    pub fn name(&self, id: MaterialId) -> Option<&str> {
        self.by_id.get(&id).map(|m| m.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Materials ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        let mut all: Vec<&Material> = self.by_id.values().collect();
        all.sort_by_key(|m| m.id);
        all.into_iter()
    }

    pub fn from_config(cfg: MaterialsConfig) -> Result<Self, CatalogError> {
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        // Pinned ids first so auto-assigned ones never steal them.
        let (pinned, auto): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|(_, e)| e.id().is_some());
        for (key, entry) in pinned {
            let id = entry.id().map(MaterialId).unwrap_or_default();
            catalog.register_with_id(&key, id, entry.tag())?;
        }
        for (key, entry) in auto {
            if key == Self::AIR_KEY {
                continue;
            }
            let id = catalog.next_free_id()?;
            catalog.register_with_id(&key, id, entry.tag())?;
        }
        Ok(catalog)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MaterialsConfig {
    #[serde(default)]
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Pinned: stone = 1
    Id(u16),
    // Detailed: obsidian = { id = 49, tag = "hard" } or glass = {}
    Detail {
        #[serde(default)]
        id: Option<u16>,
        #[serde(default)]
        tag: Option<String>,
    },
}

impl MaterialEntry {
    fn id(&self) -> Option<u16> {
        match self {
            MaterialEntry::Id(id) => Some(*id),
            MaterialEntry::Detail { id, .. } => *id,
        }
    }

    fn tag(&self) -> Option<String> {
        match self {
            MaterialEntry::Id(_) => None,
            MaterialEntry::Detail { tag, .. } => tag.clone(),
        }
    }
}
