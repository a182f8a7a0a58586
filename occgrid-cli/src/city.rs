use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use occgrid::boundary::{place_slug, BoundaryClient, GeocoderConfig};
use occgrid::render::render_png;
use occgrid::sampler::rasterize_extent;
use occgrid::writer::GridTextWriter;

/// 外接矩形に加える余白（度）
const BBOX_PADDING: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 都市名（ジオコーディングサービスで解決する）
    #[arg(value_name = "CITY", default_value = "New York, USA")]
    city: String,

    /// グリッドの一辺のセル数
    #[arg(value_name = "DIM", default_value_t = 100)]
    dim: usize,
}

fn main() -> Result<()> {
    // ログの初期化
    tracing_subscriber::fmt::init();

    // CLI引数の解析
    let args = Args::parse();

    println!("Generating map for {} with dim {}...", args.city, args.dim);

    // 失敗してもファイルは書かず、メッセージだけ出して終了する
    if let Err(e) = run(&args) {
        error!("Map generation failed: {}", e);
        println!("Error generating map: {}", e);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    // 処理開始時間を記録
    let start_time = std::time::Instant::now();

    // 都市境界の解決
    let client = BoundaryClient::new(GeocoderConfig::default())?;
    let boundary = client.resolve(&args.city)?;
    info!("Resolved boundary with {} vertices", boundary.vertices.len());

    // グリッドのサンプリング
    let (grid, region) = rasterize_extent(&[boundary], args.dim, args.dim, BBOX_PADDING)?;

    // テキスト形式で保存
    let stem = format!("{}_map_{}x{}", place_slug(&args.city), args.dim, args.dim);
    let grid_path = PathBuf::from(format!("{}.txt", stem));

    let writer = GridTextWriter::new();
    writer.write(&grid, &grid_path)?;
    info!("Written grid: {:?}", grid_path);

    // PNGで可視化
    let image_path = PathBuf::from(format!("{}.png", stem));
    render_png(&grid, Some(&region), &args.city, &image_path)?;

    // 処理時間を表示
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);
    println!("Map generation complete! Saved to {}", grid_path.display());

    Ok(())
}
