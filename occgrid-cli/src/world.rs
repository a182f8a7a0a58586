use anyhow::Result;
use std::path::Path;
use tracing::info;

use occgrid::land::{LandConfig, LandSource};
use occgrid::model::BoundingRegion;
use occgrid::render::render_png;
use occgrid::sampler::rasterize;
use occgrid::writer::GridTextWriter;

const GRID_DIM: usize = 50;
const GRID_FILE: &str = "world_map_50x50.txt";
const IMAGE_FILE: &str = "world_map_50x50.png";

fn main() -> Result<()> {
    // ログの初期化
    tracing_subscriber::fmt::init();

    // 処理開始時間を記録
    let start_time = std::time::Instant::now();

    println!("Generating world map...");

    // 陸地ポリゴンの取得。失敗時はそのまま伝播する
    let source = LandSource::new(LandConfig::default());
    let rings = source.land_rings()?;
    info!("Loaded {} land rings", rings.len());

    // 全球の範囲でサンプリング
    let region = BoundingRegion::global();
    let grid = rasterize(&rings, GRID_DIM, GRID_DIM, &region)?;

    // テキスト形式で保存
    let writer = GridTextWriter::new();
    writer.write(&grid, Path::new(GRID_FILE))?;
    info!("Written grid: {}", GRID_FILE);

    // PNGで可視化
    render_png(&grid, None, "World Map", Path::new(IMAGE_FILE))?;

    // 処理時間を表示
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);
    println!("Map generation complete!");

    Ok(())
}
