//! # coordconv
//!
//! Conversion de coordonnées lat/lon ⇄ UTM ⇄ MGRS en ligne de commande,
//! point par point ou par fichier.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Un point
//! coordconv to-mgrs --lat 48.853 --lon 2.3498
//! coordconv from-utm "31 U 452303 5411318"
//!
//! # Un fichier, une coordonnée par ligne
//! coordconv batch --input points.csv --output points.geojson --config latlon-to-mgrs
//! ```

pub mod batch;
pub mod config;
pub mod export;
pub mod report;

pub use batch::{convert_records, run_batch, split_records, ConvertedRecord, RawRecord};
pub use config::{BatchConfig, Notation};
pub use export::OutputFormat;
pub use report::{BatchReport, BatchStatus, RecordError};
