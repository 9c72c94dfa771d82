//! Request dispatch for the serving loop.
//!
//! Each decoded request line is interpreted as an action against the
//! connection's selected target:
//!
//! ```text
//! {'action': 'get_rpc_method_list'}
//! {'action': 'call', 'name': 'add', 'args': (4, 9), 'kwargs': {}}
//! ```
//!
//! The result (or the failure message) is wrapped in an [`Envelope`] so the
//! client always receives exactly one reply per request line.

mod errors;
mod request;
mod response;
mod router;

#[cfg(test)]
mod tests;

pub use self::errors::DispatchError;
pub use self::request::RpcRequest;
pub use self::response::Envelope;
pub use self::router::ActionRouter;
