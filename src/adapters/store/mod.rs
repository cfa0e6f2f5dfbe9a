//! Profile store adapters.
//!
//! - `InMemoryProfileStore` - the lightweight stand-in used when no
//!   backend is configured, with a configurable capability set so the
//!   adaptive paths can be exercised.
//! - `PostgrestStore` - the real backend, speaking the PostgREST dialect
//!   over HTTP.

mod memory;
mod postgrest;

pub use memory::InMemoryProfileStore;
pub use postgrest::PostgrestStore;
