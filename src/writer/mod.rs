use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::OccupancyGrid;

#[derive(Default)]
pub struct GridTextWriter {}

impl GridTextWriter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn write(&self, grid: &OccupancyGrid, output_path: &Path) -> Result<()> {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create grid file: {:?}", output_path))?;
        let mut writer = BufWriter::new(file);

        self.write_to(grid, &mut writer)?;

        writer.flush().context("Failed to flush grid file")?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, grid: &OccupancyGrid, writer: &mut W) -> Result<()> {
        let (width, height) = grid.shape();

        // ヘッダ行は "<width>,<height>"
        writeln!(writer, "{},{}", width, height).context("Failed to write grid header")?;

        // 1行が1つのy。xは昇順で'0'/'1'
        let mut row = String::with_capacity(width + 1);
        for y in 0..height {
            row.clear();
            for x in 0..width {
                row.push(if grid.get(x, y) { '1' } else { '0' });
            }
            row.push('\n');
            writer
                .write_all(row.as_bytes())
                .with_context(|| format!("Failed to write grid row {}", y))?;
        }

        Ok(())
    }
}
