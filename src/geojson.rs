use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Ring;

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

type PolygonCoords = Vec<Vec<[f64; 2]>>;

/// ジオメトリをリング列に正規化する。Polygonは1本、MultiPolygonはメンバーごとに1本
pub fn geometry_rings(geometry: &Geometry) -> Result<Vec<Ring>> {
    match geometry.kind.as_str() {
        "Polygon" => {
            let coords: PolygonCoords = serde_json::from_value(geometry.coordinates.clone())?;
            Ok(exterior_ring(coords).into_iter().collect())
        }
        "MultiPolygon" => {
            let coords: Vec<PolygonCoords> =
                serde_json::from_value(geometry.coordinates.clone())?;
            Ok(coords.into_iter().filter_map(exterior_ring).collect())
        }
        other => Err(Error::UnsupportedGeometry(other.to_string())),
    }
}

// GeoJSONのポリゴンは外周リングが先頭。内側の穴は使わない
fn exterior_ring(mut coords: PolygonCoords) -> Option<Ring> {
    if coords.is_empty() {
        return None;
    }
    let exterior = coords.swap_remove(0);
    Some(Ring::new(
        exterior.into_iter().map(|[lon, lat]| (lon, lat)).collect(),
    ))
}

/// 面積最大のリングを返す。同値の場合は先に現れたものを採用する
pub fn largest_ring(rings: Vec<Ring>) -> Option<Ring> {
    let mut best: Option<(f64, Ring)> = None;
    for ring in rings {
        let area = ring.area();
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, ring)),
        }
    }
    best.map(|(_, ring)| ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(json: &str) -> Geometry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_polygon_to_single_ring() {
        let geom = geometry(
            r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]]}"#,
        );
        let rings = geometry_rings(&geom).unwrap();

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].vertices[0], (0.0, 0.0));
        assert_eq!(rings[0].vertices.len(), 5);
    }

    #[test]
    fn test_polygon_holes_are_dropped() {
        let geom = geometry(
            r#"{"type":"Polygon","coordinates":[
                [[0.0,0.0],[4.0,0.0],[4.0,4.0],[0.0,4.0],[0.0,0.0]],
                [[1.0,1.0],[2.0,1.0],[2.0,2.0],[1.0,2.0],[1.0,1.0]]
            ]}"#,
        );
        let rings = geometry_rings(&geom).unwrap();

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].area(), 16.0);
    }

    #[test]
    fn test_multi_polygon_to_ring_per_member() {
        let geom = geometry(
            r#"{"type":"MultiPolygon","coordinates":[
                [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]],
                [[[5.0,5.0],[7.0,5.0],[7.0,6.0],[5.0,6.0],[5.0,5.0]]]
            ]}"#,
        );
        let rings = geometry_rings(&geom).unwrap();

        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].area(), 1.0);
        assert_eq!(rings[1].area(), 2.0);
    }

    #[test]
    fn test_unsupported_geometry_kind() {
        let geom = geometry(r#"{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}"#);
        match geometry_rings(&geom) {
            Err(Error::UnsupportedGeometry(kind)) => assert_eq!(kind, "LineString"),
            other => panic!("expected UnsupportedGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_ring_selection() {
        // 面積 3, 10, 1 の順
        let rings = vec![
            Ring::new(vec![(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)]),
            Ring::new(vec![(0.0, 0.0), (5.0, 0.0), (5.0, 2.0), (0.0, 2.0)]),
            Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        ];
        let best = largest_ring(rings).unwrap();
        assert_eq!(best.area(), 10.0);
    }

    #[test]
    fn test_largest_ring_tie_keeps_first() {
        let first = Ring::new(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        let second = Ring::new(vec![(9.0, 9.0), (11.0, 9.0), (11.0, 10.0), (9.0, 10.0)]);
        let best = largest_ring(vec![first.clone(), second]).unwrap();
        assert_eq!(best, first);
    }

    #[test]
    fn test_largest_ring_empty_input() {
        assert!(largest_ring(Vec::new()).is_none());
    }
}
