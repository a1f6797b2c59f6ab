pub mod binning;
pub mod frequency;
pub mod weekday;
