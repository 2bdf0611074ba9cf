//! Session cookie contract shared by the marketplace service and its tests.
//!
//! The cookie carries an opaque session token; the binding from token to user
//! lives server-side.

pub mod cookie;
