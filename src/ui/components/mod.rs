pub mod footer;
pub mod results;
pub mod stats_bar;
pub mod typing_area;
