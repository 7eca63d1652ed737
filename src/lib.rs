//! Scatterplot of the fastest Alpe d'Huez climbs, coloured by doping
//! allegation status, with a hover tooltip per rider.
//!
//! The chart is laid out once as a [`chart::ChartScene`] and then either
//! painted in an egui window ([`app::DopingScatterApp`]) or written out as
//! SVG ([`render::render_svg`]).

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod state;
pub mod ui;

pub use chart::{ChartScene, Tooltip};
pub use config::ChartConfig;
pub use data::model::{Dataset, RaceTime, Record};
pub use error::ChartError;
