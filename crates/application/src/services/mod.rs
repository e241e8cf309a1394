//! Application services

mod card_assembly;

pub use card_assembly::{
    CardAssemblyConfig, CardAssemblyPorts, CardAssemblyService, CardOutcome, CardResult,
};
