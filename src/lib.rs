//! tick: a local, single-user todo list persisted to one JSON file.
//!
//! Tasks live in storage order inside [`store::TaskStore`]. Users address
//! them by display index, the position in the priority-sorted and filtered
//! listing produced by [`view::display_list`]; every mutation resolves that
//! index back to a storage position before touching the collection.

pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod output;
pub mod stats;
pub mod store;
pub mod view;
