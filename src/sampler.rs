use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{BoundingRegion, OccupancyGrid, Ring};

pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// 射線法（偶奇規則）による内外判定。境界上の点は内側として扱う
pub fn point_in_ring(lon: f64, lat: f64, ring: &Ring) -> bool {
    let vertices = &ring.vertices;
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];

        if on_segment(lon, lat, (xi, yi), (xj, yj)) {
            return true;
        }

        let crosses =
            ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi);
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn on_segment(x: f64, y: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> bool {
    let cross = (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0);
    if cross != 0.0 {
        return false;
    }
    x >= x0.min(x1) && x <= x0.max(x1) && y >= y0.min(y1) && y <= y0.max(y1)
}

pub fn rasterize(
    rings: &[Ring],
    width: usize,
    height: usize,
    region: &BoundingRegion,
) -> Result<OccupancyGrid> {
    if rings.is_empty() {
        return Err(Error::EmptyGeometry);
    }
    let mut grid = OccupancyGrid::new(width, height)?;

    // サンプル点の格子は一度だけ生成し、全リングで共有する
    let lons = linspace(region.min_lon, region.max_lon, width);
    let lats = linspace(region.min_lat, region.max_lat, height);

    debug!(
        "Sampling {}x{} points against {} rings",
        width,
        height,
        rings.len()
    );

    for ring in rings {
        if ring.vertices.len() < 3 {
            continue;
        }

        // リングの包囲矩形で候補点を絞り込む
        let bbox = BoundingRegion::of_rings(std::slice::from_ref(ring))?;
        for (y, &lat) in lats.iter().enumerate() {
            if lat < bbox.min_lat || lat > bbox.max_lat {
                continue;
            }
            for (x, &lon) in lons.iter().enumerate() {
                if lon < bbox.min_lon || lon > bbox.max_lon {
                    continue;
                }
                if grid.get(x, y) {
                    continue;
                }
                if point_in_ring(lon, lat, ring) {
                    grid.set(x, y, true);
                }
            }
        }
    }

    Ok(grid)
}

/// リング群の外接矩形にマージンを加えた領域でサンプリングする
pub fn rasterize_extent(
    rings: &[Ring],
    width: usize,
    height: usize,
    padding: f64,
) -> Result<(OccupancyGrid, BoundingRegion)> {
    let region = BoundingRegion::of_rings(rings)?.padded(padding);
    let grid = rasterize(rings, width, height, &region)?;
    Ok((grid, region))
}
