// Labgen: Synthesizing Network Lab Configurations
// Copyright (C) 2026  Labgen Contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Daemon extension interface
//!
//! A protocol module plugs into the pipeline through three capabilities:
//!
//! - [`DaemonParser`]: loads the module's JSON description and *merges* it against the topology:
//!   it constructs the daemon, binds the protocol-specific per-router facts, and attaches the
//!   daemon to every participating router.
//! - [`Daemon`]: the per-topology protocol instance owning that state. Routers reference daemons
//!   by [`DaemonId`] into the orchestrator's [`DaemonRegistry`], so the topology never needs to
//!   know protocol specifics.
//! - [`Configurer`]: the stateless renderer paired with a daemon, emitting one router's
//!   configuration fragment into that router's output directory. Rendering twice over unchanged
//!   state produces byte-identical output.
//!
//! Adding a new protocol means implementing these three traits and registering the parser in the
//! orchestrator; neither [`Topology`] nor the render loop change.

pub mod bgp;
pub mod dns;
pub mod frr;
pub mod ospf;
pub mod rip;

use crate::error::Error;
use crate::topology::{RouterId, Topology};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Daemon identification (index into the [`DaemonRegistry`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonId(usize);

/// A per-topology protocol instance, tracking which routers participate and owning whatever
/// per-router or per-LAN facts the protocol needs.
pub trait Daemon {
    /// Short protocol name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Return the renderer paired with this daemon.
    fn configurer(&self) -> Box<dyn Configurer + '_>;

    /// The system service this daemon needs started at boot on the given router, if any. The
    /// startup-script writer deduplicates services across daemons.
    fn boot_service(&self, router: RouterId) -> Option<&'static str>;
}

/// The stateless renderer paired with a [`Daemon`]. Must be side-effect-free beyond writing into
/// the given output directory.
pub trait Configurer {
    /// Emit this daemon's configuration fragment for one router into the router's output
    /// directory (`out` is the per-router root, e.g. `target/r1`).
    fn configure(&self, net: &Topology, router: RouterId, out: &Path) -> Result<(), Error>;
}

/// Loader and merge step of a protocol module.
pub trait DaemonParser: Sized {
    /// The daemon type this parser constructs.
    type Daemon: Daemon + 'static;

    /// File name of the module's description inside the config directory. The module is skipped
    /// entirely if the file is absent.
    const FILE_NAME: &'static str;

    /// Load the raw description from disk.
    fn load(path: &Path) -> Result<Self, Error>;

    /// Merge the raw description against the topology: construct the daemon under the given id,
    /// bind per-router facts, and attach the daemon to every router that participates. Any name
    /// that cannot be resolved aborts the merge.
    fn merge(self, net: &mut Topology, id: DaemonId) -> Result<Self::Daemon, Error>;
}

/// Deserialize a JSON input document. Shared by all daemon parsers.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    Ok(serde_json::from_reader(File::open(path)?)?)
}

/// # Daemon registry
///
/// Ordered list of the protocol modules attached to one synthesis run. Hands out [`DaemonId`]s
/// and resolves them back to the daemons during the render phase.
#[derive(Default)]
pub struct DaemonRegistry {
    daemons: Vec<Box<dyn Daemon>>,
}

impl std::fmt::Debug for DaemonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.daemons.iter().map(|d| d.name())).finish()
    }
}

impl DaemonRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next registered daemon will receive. A parser needs this before `merge`, since
    /// attaching routers requires the id.
    pub fn next_id(&self) -> DaemonId {
        DaemonId(self.daemons.len())
    }

    /// Register a merged daemon and return its id.
    pub fn register(&mut self, daemon: Box<dyn Daemon>) -> DaemonId {
        self.daemons.push(daemon);
        DaemonId(self.daemons.len() - 1)
    }

    /// Resolve an id back to the daemon. **Panics** if the id was not handed out by this
    /// registry.
    pub fn get(&self, id: DaemonId) -> &dyn Daemon {
        self.daemons[id.0].as_ref()
    }

    /// Number of registered daemons.
    pub fn len(&self) -> usize {
        self.daemons.len()
    }

    /// Whether no daemon is registered.
    pub fn is_empty(&self) -> bool {
        self.daemons.is_empty()
    }
}
