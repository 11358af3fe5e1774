//! API endpoint handlers.
//!
//! Each module corresponds to one resource. Handlers reuse the scanner and
//! repository functions directly.

pub mod accounts;
pub mod health;
pub mod medicines;
pub mod scan;
pub mod session;
