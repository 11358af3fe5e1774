//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Audit logger: method, path, status and latency per request
//! 2. Cache-Control: `no-store` on every response (tower-http)

pub mod audit;
