pub mod family_chart;
pub mod toolbar;
