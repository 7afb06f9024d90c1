//! Application constants for the retail ETL pipeline.
//!
//! Target table names, unit conversion factors, and the known data repairs
//! that are fixed properties of the upstream sources rather than tunables.

/// Warehouse table names produced by the six cleaning routines.
pub mod tables {
    pub const DIM_USERS: &str = "dim_users";
    pub const DIM_CARD_DETAILS: &str = "dim_card_details";
    pub const DIM_STORE_DETAILS: &str = "dim_store_details";
    pub const DIM_PRODUCTS: &str = "dim_products";
    pub const ORDERS_TABLE: &str = "orders_table";
    pub const DIM_DATE_TIMES: &str = "dim_date_times";
}

/// Mass unit conversion factors, canonical unit is the kilogram.
pub mod units {
    /// 1 oz is approximately 0.0283495 kg.
    pub const OZ_TO_KG: f64 = 0.0283495;
    /// Grams per kilogram.
    pub const G_PER_KG: f64 = 1000.0;
    /// 1 ml weighs approximately 1 g (density-of-water assumption, liquids only).
    pub const ML_PER_KG: f64 = 1000.0;
}

/// Known corrupted continent spellings in the store source and their repairs.
pub const CONTINENT_FIXES: &[(&str, &str)] = &[("eeAmerica", "America"), ("eeEurope", "Europe")];

/// Sentinel text the store API uses for absent coordinates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Literal text some sources use instead of a missing value.
pub const NULL_TEXT: &str = "NULL";

/// Minimum non-null values (index plus one real field) a store row must have
/// to survive the all-null sweep.
pub const STORE_MIN_NON_NULL: u32 = 2;
