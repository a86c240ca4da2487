//! Orders: session context, assembly and submission
//!
//! ```text
//! CustomerSession ─► OrderAssembler::assemble ─► OrderPayload
//!                                                    │
//!                          OrderSink::submit_order ◄─┘ (one in flight)
//!                                   │
//!                          Ok: cart cleared / Err: cart kept
//! ```

pub mod assembler;
pub mod error;
pub mod session;

pub use assembler::{OrderAssembler, place_order};
pub use error::{OrderError, OrderResult};
pub use session::{CustomerSession, SessionContext};
