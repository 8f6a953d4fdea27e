pub mod filter;
pub mod numeric;
pub mod rollup;
pub mod status_style;
