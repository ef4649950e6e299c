// src/config/consts.rs

// Unit conversion
pub const FT_TO_M: f64 = 0.3048;
pub const IN_TO_M: f64 = FT_TO_M / 12.0;
pub const LTONS_TO_MTONS: f64 = 1.016047;
pub const STONS_TO_MTONS: f64 = 0.90718;
pub const MPH_TO_KNOTS: f64 = 1.0 / 1.15078;

// Rounding (decimal places)
pub const LENGTH_DP: i32 = 3;
pub const WEIGHT_DP: i32 = 0;
pub const SPEED_DP: i32 = 3;

// Cells
pub const NOT_APPLICABLE: &str = "N/A";
pub const DUP_SUFFIX_SEP: char = '_';

// Infobox rows that hold dates
pub const DATE_COLS: &[&str] = &[
    "Acquired", "Active", "Cancelled", "Christened", "Commissioned", "Completed",
    "Decommissioned", "Laid down", "Launched", "Lost", "Maiden voyage", "Ordered",
    "Out of service", "Recommissioned", "Renamed", "Retired", "Stricken",
];

// Linear measurements: feet, metres
pub const LENGTH_COLS: &[&str] = &["Beam", "Draft", "Draught", "Length"];

// Weight measurements: long/short/metric tons
pub const WEIGHT_COLS: &[&str] = &["Displacement", "Tonnage"];

pub const SPEED_COLS: &[&str] = &["Speed"];

// Identifier sources and outputs
pub const ID_FIELD_COL: &str = "Identification";
pub const ID_FALLBACK_COL: &str = "vessel_url";
pub const ID_TYPE_COL: &str = "type";
pub const ID_NUMBER_COL: &str = "number";
