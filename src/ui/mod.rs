//! Rendering layer: side panel widgets and the dashboard charts.

pub mod charts;
pub mod panels;
