// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
//! YAML instrument catalogs.
//!
//! A catalog file lists instrument definitions plus the directory their
//! samples live in and the format samples are decoded to. The built-in
//! catalog can be written back out in the same shape.
mod catalog;
mod error;
mod instrument;

pub use catalog::{load_catalog, CatalogFile, LoadedCatalog};
pub use error::ConfigError;
pub use instrument::InstrumentDefinition;
