//! Small built-in atlas used when no data directory is available.
//! Coordinates are approximate.

use chrono::NaiveDate;

use crate::data::snapshot::{Place, PlaceKind, River, Snapshot, Timeline};
use crate::error::{AtlasError, Result};

use self::PlaceKind::{Capital, County, Prefecture, Province, Town};

type PlaceRow = (&'static str, f64, f64, PlaceKind);
type RiverRow = (i64, &'static [(f64, f64)]);

const HAN_PLACES: &[PlaceRow] = &[
    ("Chang'an", 108.94, 34.34, Capital),
    ("Luoyang", 112.45, 34.62, Province),
    ("Chengdu", 104.07, 30.67, Province),
    ("Linzi", 118.30, 36.80, Prefecture),
    ("Handan", 114.49, 36.60, Prefecture),
    ("Wan", 112.53, 33.00, Prefecture),
    ("Jiangling", 112.20, 30.35, Prefecture),
    ("Ji", 116.40, 39.90, County),
    ("Wu", 120.60, 31.30, County),
    ("Panyu", 113.26, 23.13, County),
    ("Dunhuang", 94.66, 40.14, County),
    ("Xinye", 112.36, 32.52, Town),
];

const TANG_PLACES: &[PlaceRow] = &[
    ("Chang'an", 108.94, 34.34, Capital),
    ("Luoyang", 112.45, 34.62, Province),
    ("Taiyuan", 112.55, 37.87, Province),
    ("Yangzhou", 119.42, 32.39, Prefecture),
    ("Chengdu", 104.07, 30.67, Prefecture),
    ("Bianzhou", 114.31, 34.80, Prefecture),
    ("Youzhou", 116.40, 39.90, Prefecture),
    ("Guangzhou", 113.26, 23.13, Prefecture),
    ("Suzhou", 120.60, 31.30, County),
    ("Liangzhou", 102.64, 37.93, County),
    ("Jingzhou", 112.20, 30.35, County),
    ("Mawei", 108.20, 34.30, Town),
];

const SONG_PLACES: &[PlaceRow] = &[
    ("Kaifeng", 114.31, 34.80, Capital),
    ("Henan", 112.45, 34.62, Province),
    ("Daming", 115.15, 36.28, Province),
    ("Hangzhou", 120.16, 30.25, Prefecture),
    ("Jiangning", 118.78, 32.04, Prefecture),
    ("Chengdu", 104.07, 30.67, Prefecture),
    ("Jingzhao", 108.94, 34.34, Prefecture),
    ("Suzhou", 120.60, 31.30, County),
    ("Guangzhou", 113.26, 23.13, County),
    ("Quanzhou", 118.59, 24.91, County),
    ("Jingdezhen", 117.18, 29.27, Town),
    ("Zhuxian", 114.20, 34.41, Town),
];

const YANGTZE: &[(f64, f64)] = &[
    (91.0, 33.5),
    (97.2, 33.0),
    (99.5, 28.0),
    (100.2, 26.8),
    (102.9, 26.2),
    (104.6, 28.8),
    (106.5, 29.6),
    (108.5, 30.8),
    (111.3, 30.7),
    (112.2, 30.3),
    (114.3, 30.6),
    (116.4, 29.8),
    (118.8, 32.1),
    (121.0, 31.8),
];

// Yellow River northern course to the sea near Tianjin (before AD 11, again after 1048)
const YELLOW_NORTHERN: &[(f64, f64)] = &[
    (96.0, 35.0),
    (101.7, 36.1),
    (103.8, 36.1),
    (106.3, 37.5),
    (106.7, 39.3),
    (108.5, 40.8),
    (111.0, 40.5),
    (111.2, 39.0),
    (110.4, 36.0),
    (110.3, 34.6),
    (113.7, 34.9),
    (115.5, 36.5),
    (117.5, 38.4),
];

// Eastern course through Shandong
const YELLOW_EASTERN: &[(f64, f64)] = &[
    (96.0, 35.0),
    (101.7, 36.1),
    (103.8, 36.1),
    (106.3, 37.5),
    (106.7, 39.3),
    (108.5, 40.8),
    (111.0, 40.5),
    (111.2, 39.0),
    (110.4, 36.0),
    (110.3, 34.6),
    (113.7, 34.9),
    (116.0, 35.8),
    (118.9, 37.7),
];

const WEI: &[(f64, f64)] = &[(104.6, 35.0), (106.7, 34.4), (108.9, 34.4), (110.3, 34.6)];

const GRAND_CANAL: &[(f64, f64)] = &[
    (120.2, 30.3),
    (120.6, 31.3),
    (119.4, 32.4),
    (118.2, 33.9),
    (116.0, 34.4),
    (114.3, 34.8),
];

fn snapshot(year: i32, places: &[PlaceRow], rivers: &[RiverRow]) -> Result<Snapshot> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| AtlasError::Date(year.to_string()))?;
    let places = places
        .iter()
        .map(|&(name, lon, lat, kind)| Place::new(name, lon, lat, kind))
        .collect();
    let rivers = rivers
        .iter()
        .map(|&(width, points)| River::new(width, points.to_vec()))
        .collect::<Result<Vec<_>>>()?;
    Snapshot::new(date, places, rivers)
}

/// Western Han (AD 2), Tang (AD 742) and Northern Song (AD 1102)
pub fn timeline() -> Result<Timeline> {
    Timeline::new(vec![
        snapshot(2, HAN_PLACES, &[(8, YELLOW_NORTHERN), (8, YANGTZE), (3, WEI)])?,
        snapshot(742, TANG_PLACES, &[(8, YELLOW_EASTERN), (8, YANGTZE), (3, WEI), (2, GRAND_CANAL)])?,
        snapshot(1102, SONG_PLACES, &[(8, YELLOW_NORTHERN), (8, YANGTZE), (2, GRAND_CANAL)])?,
    ])
}
