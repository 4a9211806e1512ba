//! Dataset Dashboard - Client-side analysis pipeline
//!
//! Submits a tabular dataset to an external analysis service, turns the
//! returned statistics into chart-ready views, and generates and exports a
//! stochastic "scenario" projected from the column means.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
