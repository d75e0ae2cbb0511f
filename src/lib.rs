//! Headless core of a mock trading dashboard: snapshot and synthetic data
//! sources, a daily-bar normalizer, a chart renderer driving an abstract
//! drawing surface, and a three-handle range selector.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod models;
pub mod normalizer;
pub mod range;
pub mod selection;
pub mod source;
pub mod utils;

pub use crate::dashboard::Dashboard;
pub use crate::error::DashboardError;
