//! Co-simulation federates and the proxy model that exposes network
//! variables to the co-simulator.

pub mod connection;
pub mod federate;
pub mod synthesis;

pub use connection::{Cosimulation, SimulationConnection};
pub use federate::{
    split_variable_reference, CosimulationFederate, Publication, Subscription,
    DEFAULT_FEDERATE_NAME,
};
pub use synthesis::{extend_models, synthesize, CosimInterface, PROXY_ID, PROXY_LIBRARY};
