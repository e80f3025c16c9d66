//! Application wiring.

use std::sync::Arc;

use alphafx_engine::Engine;
use alphafx_gateway::run_server;
use alphafx_persistence::{MemoryStore, PriceStore};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::simulator;

/// The assembled process: store, engine, gateway, optional simulator.
pub struct Application {
    config: AppConfig,
    engine: Engine,
}

impl Application {
    /// Build the engine over a fresh in-memory store.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = Arc::new(MemoryStore::new()) as Arc<dyn PriceStore>;
        let engine = Engine::new(config.engine.clone(), store)?;
        Ok(Self { config, engine })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run until the gateway stops or a shutdown signal arrives.
    pub async fn run(self) -> AppResult<()> {
        if self.config.simulator.enabled {
            let engine = self.engine.clone();
            let sim_config = self.config.simulator.clone();
            tokio::spawn(simulator::run_simulator(engine, sim_config));
        }

        tokio::select! {
            result = run_server(self.engine.clone(), self.config.gateway.clone()) => {
                result?;
                Ok(())
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                Ok(())
            }
        }
    }
}
