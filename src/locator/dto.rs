use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};

/// South, west, north, east in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Default for BoundingBox {
    // Florida
    fn default() -> Self {
        Self {
            south: 24.396308,
            west: -87.634938,
            north: 31.000968,
            east: -79.974307,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundingBoxError {
    #[error("not a coordinate: {0:?}")]
    NotACoordinate(String),
    #[error("expected 4 comma separated numbers, got {0}")]
    WrongArity(usize),
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|_| BoundingBoxError::NotACoordinate(p.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [south, west, north, east] => Ok(Self {
                south: *south,
                west: *west,
                north: *north,
                east: *east,
            }),
            _ => Err(BoundingBoxError::WrongArity(parts.len())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryStore {
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassElement {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl From<OverpassElement> for GroceryStore {
    fn from(mut el: OverpassElement) -> Self {
        Self {
            name: el
                .tags
                .remove("name")
                .unwrap_or_else(|| "Unnamed Store".to_string()),
            lat: el.lat,
            lon: el.lon,
        }
    }
}
