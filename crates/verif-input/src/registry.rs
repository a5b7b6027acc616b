//! Location identity registry.
//!
//! Rows of a text file refer to locations by id, or only by coordinates when
//! the file has no id column. The registry keeps one [`Location`] per
//! identity in first-seen order and hands out its index.

use std::collections::HashMap;

use tracing::debug;
use verif_common::Location;

use crate::error::{InputError, InputResult};
use crate::key::CoordKey;

/// Outcome of [`LocationRegistry::get_or_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The identity was already registered at this index
    Existing(usize),
    /// A new location was registered at this index
    Created(usize),
}

impl Lookup {
    pub fn index(self) -> usize {
        match self {
            Lookup::Existing(index) | Lookup::Created(index) => index,
        }
    }
}

#[derive(Debug, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    by_id: HashMap<i64, usize>,
    by_coords: HashMap<CoordKey, usize>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the location for an identity, registering it if it is new.
    ///
    /// Identities with an id are matched by id only; their coordinates are
    /// never updated by later rows. Identities without an id are matched by
    /// coordinates. Missing (NaN) coordinates of a new location default to 0.
    pub fn get_or_create(&mut self, id: Option<i64>, lat: f64, lon: f64, elev: f64) -> Lookup {
        let lat = or_zero(lat);
        let lon = or_zero(lon);
        let elev = or_zero(elev);
        let coords = CoordKey::new(lat, lon, elev);

        let existing = match id {
            Some(id) => self.by_id.get(&id),
            None => self.by_coords.get(&coords),
        };
        if let Some(&index) = existing {
            return Lookup::Existing(index);
        }

        let index = self.locations.len();
        self.locations.push(Location::new(id, lat, lon, elev));
        if let Some(id) = id {
            self.by_id.insert(id, index);
        }
        self.by_coords.entry(coords).or_insert(index);
        Lookup::Created(index)
    }

    /// Give every location without an id a fresh one.
    ///
    /// New ids start one above the largest assigned id (or at 0) and follow
    /// registration order. Returns how many ids were assigned. Fails when
    /// the ids would run past `i64::MAX`.
    pub fn resolve_unassigned_ids(&mut self) -> InputResult<usize> {
        let mut next = match self.locations.iter().filter_map(Location::id).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        };

        let mut assigned = 0;
        for (index, location) in self.locations.iter_mut().enumerate() {
            if location.id().is_some() {
                continue;
            }
            let id = next.ok_or_else(|| {
                InputError::InvalidFormat(format!("no location id left above {} to assign", i64::MAX))
            })?;
            location.assign_id(id);
            self.by_id.insert(id, index);
            next = id.checked_add(1);
            assigned += 1;
        }
        if assigned > 0 {
            debug!(assigned = assigned, "Assigned ids to locations without one");
        }
        Ok(assigned)
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn index_of_id(&self, id: i64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn into_locations(self) -> Vec<Location> {
        self.locations
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
