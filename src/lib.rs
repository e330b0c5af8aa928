//! Library crate for inventory-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Item and inventory model (`inventory`)
//! - Case-insensitive search projection (`search`)
//! - CSV export (`export`)
//! - Error and result types (`error`)
//! - Application state, surface operations and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - Command-line options and log setup (`cli`, `logging`)
//!
//! It is used by the `inventory-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod inventory;
pub mod logging;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{DynError, InventoryError, Result, Severity};
pub use inventory::{Inventory, Item};
