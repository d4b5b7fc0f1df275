use cubit_geom::Space;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("cannot combine space '{left}' with space '{right}'")]
    SpaceMismatch { left: Space, right: Space },
    #[error("invalid region record: {0}")]
    InvalidRecord(String),
}
