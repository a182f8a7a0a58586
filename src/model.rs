use crate::error::{Error, Result};

/// 閉じた多角形の外周。頂点は(経度, 緯度)の順
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub vertices: Vec<(f64, f64)>,
}

impl Ring {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        Self { vertices }
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..n {
            let (x0, y0) = self.vertices[i];
            let (x1, y1) = self.vertices[(i + 1) % n];
            sum += x0 * y1 - x1 * y0;
        }
        sum.abs() / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingRegion {
    pub fn of_rings(rings: &[Ring]) -> Result<Self> {
        let mut region = Self {
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
        };

        for ring in rings {
            for &(lon, lat) in &ring.vertices {
                region.min_lon = region.min_lon.min(lon);
                region.max_lon = region.max_lon.max(lon);
                region.min_lat = region.min_lat.min(lat);
                region.max_lat = region.max_lat.max(lat);
            }
        }

        if region.min_lon > region.max_lon || region.min_lat > region.max_lat {
            return Err(Error::EmptyGeometry);
        }
        Ok(region)
    }

    pub fn global() -> Self {
        Self {
            min_lon: -180.0,
            max_lon: 180.0,
            min_lat: -90.0,
            max_lat: 90.0,
        }
    }

    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min_lon: self.min_lon - margin,
            max_lon: self.max_lon + margin,
            min_lat: self.min_lat - margin,
            max_lat: self.max_lat + margin,
        }
    }
}

/// width×heightのブール行列。セル(x, y)はy*width+xに格納される
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.cells[y * self.width + x] = value;
    }
}
