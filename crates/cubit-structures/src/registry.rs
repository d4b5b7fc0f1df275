use cubit_blocks::{BlockSource, MaterialCatalog, MaterialId};
use cubit_geom::{BlockPos, Space};

use crate::def::StructuresConfig;
use crate::error::StructureError;
use crate::structure::Structure;

/// A structure found complete by [`StructureRegistry::observe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub name: String,
    pub space: Space,
    pub origin: BlockPos,
    /// The observed block that completed it.
    pub trigger: BlockPos,
}

pub type CompletionHook = Box<dyn Fn(&Completion) + Send + Sync>;

struct Entry {
    name: String,
    structure: Structure,
    hook: Option<CompletionHook>,
}

/// Named structures checked together against each observed block change.
#[derive(Default)]
pub struct StructureRegistry {
    entries: Vec<Entry>,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every definition in `cfg` against `catalog`.
    pub fn from_config(
        cfg: &StructuresConfig,
        catalog: &MaterialCatalog,
    ) -> Result<Self, StructureError> {
        let mut reg = Self::new();
        for def in &cfg.structures {
            let structure = def.compile(catalog)?;
            reg.register(&def.name, structure)?;
        }
        Ok(reg)
    }

    pub fn register(&mut self, name: &str, structure: Structure) -> Result<(), StructureError> {
        if self.get(name).is_some() {
            return Err(StructureError::DuplicateName(name.to_string()));
        }
        self.entries.push(Entry {
            name: name.to_string(),
            structure,
            hook: None,
        });
        Ok(())
    }

    /// Installs the callback run whenever `name` completes, replacing any previous one.
    pub fn on_completion<F>(&mut self, name: &str, hook: F) -> Result<(), StructureError>
    where
        F: Fn(&Completion) + Send + Sync + 'static,
    {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| StructureError::UnknownStructure(name.to_string()))?;
        entry.hook = Some(Box::new(hook));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Structure> {
        let i = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(i).structure)
    }

    pub fn get(&self, name: &str) -> Option<&Structure> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.structure)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks every structure against a block of `material` observed at `pos`,
    /// running completion hooks for each match.
    pub fn observe<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        space: &Space,
        pos: BlockPos,
        material: MaterialId,
    ) -> Vec<Completion> {
        let mut out = Vec::new();
        for entry in &self.entries {
            let Some(origin) = entry.structure.find_origin(source, space, pos, material) else {
                continue;
            };
            let done = Completion {
                name: entry.name.clone(),
                space: space.clone(),
                origin,
                trigger: pos,
            };
            log::info!("structure '{}' completed in {} at {}", done.name, space, origin);
            if let Some(hook) = &entry.hook {
                hook(&done);
            }
            out.push(done);
        }
        out
    }
}

impl std::fmt::Debug for StructureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureRegistry")
            .field("structures", &self.entries.iter().map(|e| &e.name).collect::<Vec<_>>())
            .finish()
    }
}
