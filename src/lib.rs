//! Clubcard - membership-card service core.
//!
//! Authenticated users get a QR-ready membership card; admins list every
//! profile and toggle membership. The load-bearing piece is the
//! capability-adaptive profile store: the same resolution, roster, and
//! mutation logic runs against a rich PostgREST backend or a minimal
//! stand-in client, picking the best path from an explicit capability
//! descriptor.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
