use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{AtlasError, Result};

/// Administrative tier of a place; drives glyph size and label text size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    Capital,
    Province,
    Prefecture,
    County,
    Town,
}

impl PlaceKind {
    pub const ALL: [PlaceKind; 5] = [
        PlaceKind::Capital,
        PlaceKind::Province,
        PlaceKind::Prefecture,
        PlaceKind::County,
        PlaceKind::Town,
    ];

    /// Parse the lowercase feed name (`capital`, `province`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "capital" => Some(PlaceKind::Capital),
            "province" => Some(PlaceKind::Province),
            "prefecture" => Some(PlaceKind::Prefecture),
            "county" => Some(PlaceKind::County),
            "town" => Some(PlaceKind::Town),
            _ => None,
        }
    }
}

/// A named point on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub kind: PlaceKind,
}

impl Place {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64, kind: PlaceKind) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            kind,
        }
    }
}

/// A river polyline. `width` is a thickness tier, not a pixel count.
#[derive(Debug, Clone, PartialEq)]
pub struct River {
    width: u8,
    points: Vec<(f64, f64)>,
}

impl River {
    pub const MIN_WIDTH: u8 = 1;
    pub const MAX_WIDTH: u8 = 10;

    /// Build a river from (lon, lat) vertices
    pub fn new(width: i64, points: Vec<(f64, f64)>) -> Result<Self> {
        if !(Self::MIN_WIDTH as i64..=Self::MAX_WIDTH as i64).contains(&width) {
            return Err(AtlasError::RiverWidth(width));
        }
        Ok(Self {
            width: width as u8,
            points,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Places and rivers valid for one historical date.
/// Place order is draw priority: earlier places win contested label space.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    date: NaiveDate,
    places: Vec<Place>,
    rivers: Vec<River>,
}

impl Snapshot {
    /// Names must be unique within the snapshot
    pub fn new(date: NaiveDate, places: Vec<Place>, rivers: Vec<River>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(places.len());
        for place in &places {
            if !seen.insert(place.name.as_str()) {
                return Err(AtlasError::DuplicatePlace {
                    name: place.name.clone(),
                    date: date.to_string(),
                });
            }
        }
        Ok(Self {
            date,
            places,
            rivers,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Places in insertion (priority) order
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn rivers(&self) -> &[River] {
        &self.rivers
    }

    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }
}

/// Date-ordered sequence of snapshots with a cursor.
/// Never empty; the cursor always stays within `[0, count - 1]`.
#[derive(Debug, Clone)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl Timeline {
    /// Sort by date ascending (stable for equal dates) and start at the earliest
    pub fn new(mut snapshots: Vec<Snapshot>) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(AtlasError::EmptyTimeline);
        }
        snapshots.sort_by_key(|s| s.date);
        Ok(Self {
            snapshots,
            index: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.index]
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current().date
    }

    /// Move one snapshot earlier; no-op at the first
    pub fn step_back(&mut self) {
        self.seek(self.index.saturating_sub(1));
    }

    /// Move one snapshot later; no-op at the last
    pub fn step_forward(&mut self) {
        self.seek(self.index.saturating_add(1));
    }

    /// Jump to an index, clamped to the valid range
    pub fn seek(&mut self, index: usize) {
        let clamped = index.min(self.snapshots.len() - 1);
        if clamped != self.index {
            debug!(from = self.index, to = clamped, date = %self.snapshots[clamped].date, "snapshot changed");
        }
        self.index = clamped;
    }
}
