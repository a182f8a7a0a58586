use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::OccupancyGrid;

pub fn load_grid_file(path: &Path) -> Result<OccupancyGrid> {
    let file = File::open(path)?;
    parse_grid_text(BufReader::new(file))
}

pub fn parse_grid_text<R: BufRead>(reader: R) -> Result<OccupancyGrid> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::MalformedGridFile("missing header line".to_string())),
    };
    let (width, height) = parse_header(&header)?;

    let mut grid = OccupancyGrid::new(width, height).map_err(|_| {
        Error::MalformedGridFile(format!("non-positive dimensions in header: {:?}", header))
    })?;

    for y in 0..height {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(Error::MalformedGridFile(format!(
                    "expected {} data rows, found {}",
                    height, y
                )))
            }
        };

        // width文字目以降は読まない
        let row: Vec<char> = line.chars().collect();
        if row.len() < width {
            return Err(Error::MalformedGridFile(format!(
                "row {} has {} characters, expected {}",
                y,
                row.len(),
                width
            )));
        }
        for (x, &c) in row.iter().take(width).enumerate() {
            grid.set(x, y, c == '1');
        }
    }

    Ok(grid)
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let mut parts = header.trim().split(',');
    let width = parts.next().and_then(|s| s.trim().parse::<usize>().ok());
    let height = parts.next().and_then(|s| s.trim().parse::<usize>().ok());

    match (width, height, parts.next()) {
        (Some(width), Some(height), None) => Ok((width, height)),
        _ => Err(Error::MalformedGridFile(format!(
            "bad header line: {:?}",
            header
        ))),
    }
}
