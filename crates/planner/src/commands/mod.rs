//! Command implementations.
//!
//! Every command opens the saved session, does its work and, if it changed
//! anything, writes the session back.

pub mod form;
pub mod housing;
pub mod leads;
pub mod relay;
pub mod report;
pub mod wizard;

use river_poultry_planner::{
    FileStore, LeadTracker, PlannerConfig, PlannerError, RelayClient, Session,
    relay_client::user_agent, report::ReportEmitter,
};

/// Services shared by all commands, built once from configuration.
pub struct Context {
    pub config: PlannerConfig,
    pub store: FileStore,
    pub relay: RelayClient,
    pub leads: LeadTracker,
}

impl Context {
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(user_agent())
            .build()
            .map_err(river_poultry_planner::relay_client::RelayError::from)?;
        let store = FileStore::new(&config.data_dir);
        let relay = RelayClient::with_client(http.clone(), config.relay_url.clone());
        let leads = LeadTracker::new(store.clone(), http, config.tracking_url.clone());
        Ok(Self {
            config,
            store,
            relay,
            leads,
        })
    }

    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    pub fn session(&self) -> Result<Session, PlannerError> {
        Ok(Session::open(self.store.clone())?)
    }

    #[must_use]
    pub fn emitter(&self) -> ReportEmitter {
        ReportEmitter::new(self.relay.clone(), &self.config.output_dir).with_mail_client(true)
    }
}

/// Write a line of command output.
#[allow(clippy::print_stdout)]
pub fn say(text: impl std::fmt::Display) {
    println!("{text}");
}
