//! Helpers shared by the table client's test binaries.

pub mod test_logging;
