//! Input/output adapters around the engine. Currently CSV only.

pub mod csv;
