use cubit_geom::Location;

use crate::error::RegionError;
use crate::region::Region;

/// Two independently set corners that become a [`Region`] once both are present.
#[derive(Clone, Debug, Default)]
pub struct SelectionBuilder {
    first: Option<Location>,
    second: Option<Location>,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corners(first: Location, second: Location) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    pub fn set_first(&mut self, at: Location) -> &mut Self {
        self.first = Some(at);
        self
    }

    pub fn set_second(&mut self, at: Location) -> &mut Self {
        self.second = Some(at);
        self
    }

    pub fn first(&self) -> Option<&Location> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&Location> {
        self.second.as_ref()
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }

    /// `Ok(None)` until both corners are set.
    pub fn build(&self) -> Result<Option<Region>, RegionError> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => Region::from_locations(a, b).map(Some),
            _ => Ok(None),
        }
    }
}
