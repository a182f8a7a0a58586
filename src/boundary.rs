use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geojson::{self, Geometry};
use crate::model::Ring;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_USER_AGENT: &str = concat!("occgrid/", env!("CARGO_PKG_VERSION"));

/// ジオコーディングクライアントの設定。グローバル状態は持たない
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub log_requests: bool,
    /// レスポンス本文のキャッシュ先。Noneで毎回問い合わせる
    pub cache_dir: Option<PathBuf>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            log_requests: true,
            cache_dir: Some(PathBuf::from(".occgrid_cache")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    display_name: Option<String>,
    geojson: Geometry,
}

pub struct BoundaryClient {
    config: GeocoderConfig,
    http: reqwest::blocking::Client,
}

impl BoundaryClient {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    /// 地名から行政境界のリングを1本解決する
    pub fn resolve(&self, place: &str) -> Result<Ring> {
        let body = self.fetch_search_body(place)?;
        resolve_from_body(&body, place)
    }

    fn fetch_search_body(&self, place: &str) -> Result<String> {
        if let Some(cache) = self.cache_path(place) {
            if cache.exists() {
                if self.config.log_requests {
                    debug!("Using cached geocoder response: {:?}", cache);
                }
                return Ok(fs::read_to_string(&cache)?);
            }
        }

        let url = format!("{}/search", self.config.endpoint.trim_end_matches('/'));
        if self.config.log_requests {
            info!("Querying geocoder: {} q={:?}", url, place);
        }

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("format", "jsonv2"),
                ("polygon_geojson", "1"),
                ("limit", "1"),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(Error::BoundaryNotFound(place.to_string()));
        }
        let body = response.text()?;

        if let Some(cache) = self.cache_path(place) {
            if let Some(parent) = cache.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&cache, &body)?;
        }

        Ok(body)
    }

    fn cache_path(&self, place: &str) -> Option<PathBuf> {
        let dir = self.config.cache_dir.as_ref()?;
        Some(dir.join(format!("{}.json", place_slug(place))))
    }
}

/// 検索レスポンス本文からリングを解決する
pub fn resolve_from_body(body: &str, place: &str) -> Result<Ring> {
    let results: Vec<SearchResult> = serde_json::from_str(body)?;
    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| Error::BoundaryNotFound(place.to_string()))?;

    if let Some(name) = &result.display_name {
        debug!("Resolved {:?} to {:?}", place, name);
    }

    let rings = geojson::geometry_rings(&result.geojson)?;
    geojson::largest_ring(rings).ok_or_else(|| Error::BoundaryNotFound(place.to_string()))
}

/// 出力ファイル名とキャッシュキーに使うスラグ。空白は'_'、','は削除、小文字化
pub fn place_slug(place: &str) -> String {
    place
        .chars()
        .filter(|&c| c != ',')
        .map(|c| if c == ' ' { '_' } else { c })
        .flat_map(|c| c.to_lowercase())
        .collect()
}
