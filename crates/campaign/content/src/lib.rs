//! Data-driven campaign content and loaders.
//!
//! Static catalogs the campaign rules consult through oracles:
//! - Species catalog (RON), whose order defines the global alien index
//! - Item catalog (RON)
//! - Research progress (TOML)
//! - Campaign configuration (TOML)
//!
//! Content is consumed by the runtime as an [`campaign_core::OracleSnapshot`]
//! and never appears in campaign state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, ItemSpec, ResearchLoader, SpeciesLoader, SpeciesSpec,
};
