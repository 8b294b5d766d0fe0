// Reconciler for the hosts file

//! Reconciliation state machine
//!
//! The [`Reconciler`] owns the applied snapshot and decides on every tick
//! whether the output file needs to be re-rendered. A tick either leaves
//! everything untouched or ends with the file replaced and the snapshot
//! updated; a failure anywhere in between leaves both as they were.
//!
//! Nothing is applied before the first tick, so the first successful tick
//! always renders, even when the interface carries no addresses.

use crate::addresses::AddressSource;
use crate::error::{Error, ErrorClass, Result};
use crate::hosts_file::write_atomic;
use crate::identity::HostResolver;
use crate::render::{render_template, TemplateContext, TemplateEngine};
use crate::snapshot::AppliedSnapshot;
use crate::types::HostIdentity;
use std::path::PathBuf;

/// Reconciler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    /// Startup reading not done yet
    Initializing,
    /// Polling
    Steady,
}

/// Result of a tick that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Addresses match the applied snapshot
    Unchanged,
    /// Output file re-rendered and snapshot updated
    Applied,
    /// Startup reading has not succeeded yet; nothing was read
    NotInitialized,
}

/// Polling reconciler for one output file
pub struct Reconciler {
    state: ReconcilerState,
    source: Box<dyn AddressSource>,
    resolver: Box<dyn HostResolver>,
    engine: Box<dyn TemplateEngine>,
    template: PathBuf,
    output: PathBuf,
    applied: Option<AppliedSnapshot>,
    identity: Option<HostIdentity>,
}

impl Reconciler {
    /// Create a reconciler rendering `template` into `output`
    pub fn new(
        source: Box<dyn AddressSource>,
        resolver: Box<dyn HostResolver>,
        engine: Box<dyn TemplateEngine>,
        template: PathBuf,
        output: PathBuf,
    ) -> Self {
        Self {
            state: ReconcilerState::Initializing,
            source,
            resolver,
            engine,
            template,
            output,
            applied: None,
            identity: None,
        }
    }

    /// Take the startup reading of addresses and host identity
    ///
    /// Errors here are meant to be fatal; nothing is rendered.
    pub fn initialize(&mut self) -> Result<()> {
        let addresses = self.source.read()?;
        let identity = self.resolver.resolve()?;

        log::info!(
            "Initial addresses: v4 {:?}, v6 {:?} (host {})",
            addresses.v4,
            addresses.v6,
            identity.hostname
        );

        self.identity = Some(identity);
        self.state = ReconcilerState::Steady;
        Ok(())
    }

    /// Run one poll: read, compare, and re-render on change
    ///
    /// Does nothing until [`Reconciler::initialize`] has succeeded.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.state != ReconcilerState::Steady {
            log::warn!("Tick before initialization, skipping");
            return Ok(TickOutcome::NotInitialized);
        }

        let current = self.source.read()?;

        let changed = match &self.applied {
            Some(applied) => applied.differs_from(&current),
            None => true,
        };
        if !changed {
            log::debug!("Addresses unchanged");
            return Ok(TickOutcome::Unchanged);
        }

        log::info!(
            "Addresses changed (v4 {:?}, v6 {:?}), updating {}",
            current.v4,
            current.v6,
            self.output.display()
        );

        let identity = self.current_identity()?;
        let ctx = TemplateContext::new(&current, &identity);
        let rendered = render_template(self.engine.as_ref(), &self.template, &ctx)?;
        write_atomic(&self.output, &rendered)?;

        self.identity = Some(identity.clone());
        self.applied = Some(AppliedSnapshot {
            addresses: current,
            identity,
        });

        log::info!("Updated {}", self.output.display());
        Ok(TickOutcome::Applied)
    }

    /// Run one tick and log any error by class; never fails
    pub fn poll(&mut self) -> Option<TickOutcome> {
        match self.tick() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                match e.class() {
                    ErrorClass::Read => log::warn!("Skipping tick, read failed: {}", e),
                    ErrorClass::Render => log::error!("Skipping tick, render failed: {}", e),
                    ErrorClass::Write => log::error!("Skipping tick, write failed: {}", e),
                }
                None
            }
        }
    }

    /// Resolve the hostname, falling back to the last known identity
    fn current_identity(&self) -> Result<HostIdentity> {
        match (self.resolver.resolve(), &self.identity) {
            (Ok(identity), _) => Ok(identity),
            (Err(Error::HostnameUnavailable), Some(cached)) => {
                log::warn!("Hostname unavailable, reusing {}", cached.hostname);
                Ok(cached.clone())
            }
            (Err(e), _) => Err(e),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    /// Snapshot matching the output file, if anything was written yet
    pub fn applied(&self) -> Option<&AppliedSnapshot> {
        self.applied.as_ref()
    }
}
