pub mod builtin;
mod config;
mod snapshot;
mod tile_store;

pub use config::{load_manifest, parse_manifest, AtlasConfig, SnapshotEntry, TileConfig, TransformConfig, ViewConfig};
pub use snapshot::{Place, PlaceKind, River, Snapshot, Timeline};
pub use tile_store::{DirTileStore, TileImage};

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use geojson::{Feature, GeoJson, Value};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{AtlasError, Result};
use crate::time_format::parse_date;

/// Manifest file name inside the data directory
pub const MANIFEST: &str = "atlas.json";

/// Load the manifest and every snapshot it lists.
/// Without a manifest, or with an empty snapshot list, the built-in atlas is used.
pub fn load_atlas(data_dir: &Path) -> Result<(AtlasConfig, Timeline)> {
    let manifest = data_dir.join(MANIFEST);
    if !manifest.exists() {
        info!(dir = %data_dir.display(), "no manifest, using built-in atlas");
        return Ok((AtlasConfig::default(), builtin::timeline()?));
    }

    let config = load_manifest(&manifest)?;
    if config.snapshots.is_empty() {
        info!(manifest = %manifest.display(), "manifest lists no snapshots, using built-in timeline");
        return Ok((config, builtin::timeline()?));
    }

    let snapshots = config
        .snapshots
        .par_iter()
        .map(|entry| load_snapshot(&data_dir.join(&entry.file), &entry.date))
        .collect::<Result<Vec<_>>>()?;

    let timeline = Timeline::new(snapshots)?;
    info!(snapshots = timeline.count(), "atlas loaded");
    Ok((config, timeline))
}

/// Read one GeoJSON snapshot file
pub fn load_snapshot(path: &Path, date: &str) -> Result<Snapshot> {
    let date = parse_date(date).ok_or_else(|| AtlasError::Date(date.to_string()))?;
    let content = fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let geojson: GeoJson = content.parse().map_err(|source| AtlasError::GeoJson {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    parse_snapshot(&geojson, date)
}

/// Build a snapshot from a feature collection.
/// Points become places in feature order; line strings become rivers.
pub fn parse_snapshot(geojson: &GeoJson, date: NaiveDate) -> Result<Snapshot> {
    let mut places = Vec::new();
    let mut rivers = Vec::new();

    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                process_feature(feature, &mut places, &mut rivers)?;
            }
        }
        GeoJson::Feature(f) => process_feature(f, &mut places, &mut rivers)?,
        GeoJson::Geometry(_) => warn!(%date, "bare geometry has no properties, skipped"),
    }

    info!(%date, places = places.len(), rivers = rivers.len(), "snapshot parsed");
    Snapshot::new(date, places, rivers)
}

fn process_feature(feature: &Feature, places: &mut Vec<Place>, rivers: &mut Vec<River>) -> Result<()> {
    let props = feature.properties.as_ref();
    let Some(geometry) = feature.geometry.as_ref() else {
        warn!("feature without geometry skipped");
        return Ok(());
    };

    match &geometry.value {
        Value::Point(coords) => {
            let Some(name) = props.and_then(|p| p.get("name")).and_then(|v| v.as_str()) else {
                warn!("place without a name skipped");
                return Ok(());
            };
            if coords.len() < 2 {
                warn!(name, "place with short coordinates skipped");
                return Ok(());
            }
            // Unlabelled kinds are the lowest tier
            let kind = match props.and_then(|p| p.get("kind")).and_then(|v| v.as_str()) {
                Some(kind) => PlaceKind::parse(kind).ok_or_else(|| AtlasError::UnknownKind {
                    name: name.to_string(),
                    kind: kind.to_string(),
                })?,
                None => PlaceKind::Town,
            };
            places.push(Place::new(name, coords[0], coords[1], kind));
        }
        Value::LineString(coords) => {
            rivers.push(River::new(river_width(feature)?, line(coords))?);
        }
        Value::MultiLineString(lines) => {
            let width = river_width(feature)?;
            for coords in lines {
                rivers.push(River::new(width, line(coords))?);
            }
        }
        _ => {
            let name = props.and_then(|p| p.get("name")).and_then(|v| v.as_str());
            warn!(name, "unsupported geometry skipped");
        }
    }
    Ok(())
}

fn river_width(feature: &Feature) -> Result<i64> {
    let Some(value) = feature.properties.as_ref().and_then(|p| p.get("width")) else {
        return Ok(1);
    };
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|w| w.fract() == 0.0).map(|w| w as i64))
        .ok_or_else(|| AtlasError::NonIntegerWidth(value.to_string()))
}

fn line(coords: &[Vec<f64>]) -> Vec<(f64, f64)> {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}
