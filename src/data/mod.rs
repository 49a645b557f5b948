//! Data layer: reads the daily and hourly CSV files into typed tables

pub(crate) mod loader;

pub(crate) use loader::{DataFiles, load_dataset};
