//! paymatch
//!
//! paymatch finds the sets of outstanding invoices a payment settles exactly, and
//! ranks them so the most plausible grouping comes first.

pub mod amounts;
pub mod combinations;
pub mod fixtures;
pub mod invoices;
pub mod prelude;
pub mod ranking;
pub mod report;
pub mod utils;
