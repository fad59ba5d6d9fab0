//! API middleware.
//!
//! Only the access logger: the screen API is bound to the local machine and
//! serves the app's own web view.

pub mod audit;
