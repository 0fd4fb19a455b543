//! agroarea - Polygon geometry and vertex editing for drawing farm areas on a map

pub mod config;
pub mod domain;
pub mod editor;
pub mod geometry;
pub mod persist;
pub mod session;
