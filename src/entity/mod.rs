//! SeaORM entity definitions for PostgreSQL database.

pub mod case;
pub mod document;
