pub mod api_utils;
pub mod components;
pub mod fetch;
pub mod formatters;
