pub mod boundary;
pub mod error;
pub mod geojson;
pub mod land;
pub mod model;
pub mod parser;
pub mod render;
pub mod sampler;
pub mod writer;

pub use boundary::{BoundaryClient, GeocoderConfig};
pub use error::Error;
pub use land::{LandConfig, LandSource};
pub use model::{BoundingRegion, OccupancyGrid, Ring};
pub use writer::GridTextWriter;
