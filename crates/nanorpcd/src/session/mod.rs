//! The connection protocol.
//!
//! Every connection walks the same handshake before requests are served:
//!
//! 1. The client sends the magic line `ARTIQ pc_rpc`. Anything else closes
//!    the connection without a reply.
//! 2. The server replies with the catalog
//!    `{'targets': [...], 'description': '...'}`.
//! 3. The client names a target. An unknown name closes the connection
//!    without a reply.
//! 4. The server replies with the set of the target's method names.
//! 5. Each further line is a request answered by exactly one envelope.
//!
//! Reset, aborted, and broken-pipe failures end the session quietly.

mod context;
mod errors;
mod handler;
mod machine;


pub use self::context::ServerContext;
pub use self::errors::SessionError;
pub use self::handler::RpcConnectionHandler;
pub use self::machine::{MAGIC, Phase, Session, SessionEnd};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");
