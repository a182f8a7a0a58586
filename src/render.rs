use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::model::{BoundingRegion, OccupancyGrid};

const CELL_PIXELS: u32 = 8;
const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 30;
const Y_LABEL_AREA: u32 = 50;

/// グリッドをPNGとして描画する。領域があれば経度・緯度を軸に使う
pub fn render_png(
    grid: &OccupancyGrid,
    region: Option<&BoundingRegion>,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    let (width, height) = grid.shape();

    let image_width = width as u32 * CELL_PIXELS + 2 * MARGIN + Y_LABEL_AREA;
    let image_height = height as u32 * CELL_PIXELS + 2 * MARGIN + X_LABEL_AREA + 30;

    let root =
        BitMapBackend::new(output_path, (image_width, image_height)).into_drawing_area();
    root.fill(&WHITE).context("Failed to clear drawing area")?;

    let (min_x, max_x, min_y, max_y) = match region {
        Some(r) => (r.min_lon, r.max_lon, r.min_lat, r.max_lat),
        None => (0.0, width as f64, 0.0, height as f64),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(min_x..max_x, min_y..max_y)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .context("Failed to draw axes")?;

    // 1セル = 1矩形。y軸は上向きなのでy=0の行が下端になる
    let step_x = (max_x - min_x) / width as f64;
    let step_y = (max_y - min_y) / height as f64;
    let cells = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.get(x, y))
        .map(|(x, y)| {
            let x0 = min_x + x as f64 * step_x;
            let y0 = min_y + y as f64 * step_y;
            Rectangle::new([(x0, y0), (x0 + step_x, y0 + step_y)], BLACK.filled())
        });

    chart
        .draw_series(cells)
        .context("Failed to draw occupancy cells")?;

    root.present()
        .with_context(|| format!("Failed to write image: {:?}", output_path))?;
    info!("Rendered grid image: {:?}", output_path);

    Ok(())
}
