use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::geojson::{self, FeatureCollection};
use crate::model::Ring;

const NATURAL_EARTH_LAND_URL: &str =
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_land.geojson";

#[derive(Debug, Clone)]
pub struct LandConfig {
    pub dataset_url: String,
    pub cache_path: PathBuf,
    pub timeout_secs: u64,
}

impl Default for LandConfig {
    fn default() -> Self {
        Self {
            dataset_url: NATURAL_EARTH_LAND_URL.to_string(),
            cache_path: PathBuf::from("ne_110m_land.geojson"),
            timeout_secs: 60,
        }
    }
}

/// Natural Earthの陸地データセットからリング列を取り出す
pub struct LandSource {
    config: LandConfig,
}

impl LandSource {
    pub fn new(config: LandConfig) -> Self {
        Self { config }
    }

    pub fn land_rings(&self) -> Result<Vec<Ring>> {
        let text = self.dataset_text()?;
        rings_from_geojson(&text)
    }

    // キャッシュがあれば読み、なければダウンロードして保存する
    fn dataset_text(&self) -> Result<String> {
        if self.config.cache_path.exists() {
            info!("Using cached land dataset: {:?}", self.config.cache_path);
            return Ok(fs::read_to_string(&self.config.cache_path)?);
        }

        info!("Downloading land dataset: {}", self.config.dataset_url);
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        let body = http
            .get(&self.config.dataset_url)
            .send()?
            .error_for_status()?
            .text()?;

        if let Some(parent) = self.config.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config.cache_path, &body)?;

        Ok(body)
    }
}

/// FeatureCollectionを外周リング列に平坦化する。面以外のジオメトリは読み飛ばす
pub fn rings_from_geojson(text: &str) -> Result<Vec<Ring>> {
    let collection: FeatureCollection = serde_json::from_str(text)?;

    let mut rings = Vec::new();
    for feature in &collection.features {
        match geojson::geometry_rings(&feature.geometry) {
            Ok(feature_rings) => rings.extend(feature_rings),
            Err(Error::UnsupportedGeometry(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    if rings.is_empty() {
        return Err(Error::EmptyGeometry);
    }
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAND_COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"featurecla": "Land"}, "geometry":
                {"type": "Polygon", "coordinates":
                    [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]}},
            {"type": "Feature", "properties": {"featurecla": "Land"}, "geometry":
                {"type": "MultiPolygon", "coordinates": [
                    [[[20.0, 0.0], [25.0, 0.0], [25.0, 5.0], [20.0, 5.0], [20.0, 0.0]]],
                    [[[30.0, 0.0], [31.0, 0.0], [31.0, 1.0], [30.0, 1.0], [30.0, 0.0]]]
                ]}},
            {"type": "Feature", "properties": {"featurecla": "Coastline"}, "geometry":
                {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}}
        ]
    }"#;

    #[test]
    fn test_flatten_features_to_rings() {
        let rings = rings_from_geojson(LAND_COLLECTION).unwrap();

        assert_eq!(rings.len(), 3);
        assert_eq!(rings[0].area(), 100.0);
        assert_eq!(rings[1].area(), 25.0);
        assert_eq!(rings[2].area(), 1.0);
    }

    #[test]
    fn test_non_areal_features_are_skipped() {
        let rings = rings_from_geojson(LAND_COLLECTION).unwrap();
        // LineStringのフィーチャは数に入らない
        assert!(rings.iter().all(|ring| ring.vertices.len() >= 4));
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let result = rings_from_geojson(r#"{"type": "FeatureCollection", "features": []}"#);
        assert!(matches!(result, Err(Error::EmptyGeometry)));
    }

    #[test]
    fn test_garbage_body_is_a_json_error() {
        assert!(matches!(
            rings_from_geojson("not geojson"),
            Err(Error::Json(_))
        ));
    }
}
