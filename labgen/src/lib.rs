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

#![deny(missing_docs)]

//! # Labgen: Synthesizing Network Lab Configurations
//!
//! This library turns a declarative description of a network topology (routers, LANs, addressing
//! and per-protocol parameters) into a complete set of per-router configuration artifacts for a
//! multi-daemon routing stack (OSPF, RIP, BGP via FRRouting) and a DNS hierarchy (authoritative
//! servers, resolvers and resolver clients). It is a one-shot, offline compiler: given a config
//! directory of JSON documents, it deterministically produces the `lab.conf`, per-router boot
//! scripts, routing-daemon configuration and zone files of a network lab.
//!
//! ## Structure
//!
//! - **[`Topology`](topology::Topology)**: The addressing model. Routers and LANs live in a
//!   single arena (a [`petgraph`] stable graph supplies the handles), interfaces link the two and
//!   derive their dotted address from the LAN prefix and a host byte.
//!
//! - **[`Daemon`](daemon::Daemon) / [`Configurer`](daemon::Configurer) /
//!   [`DaemonParser`](daemon::DaemonParser)**: The extension interface. Each protocol module owns
//!   its per-router state, registers itself on the routers that participate, and later renders
//!   one configuration fragment per router without the orchestrator knowing any protocol
//!   specifics.
//!
//! - **Protocol modules**: [`Ospf`](daemon::ospf::Ospf) (areas and link costs),
//!   [`Rip`](daemon::rip::Rip) (plain network announcements), [`Bgp`](daemon::bgp::Bgp) (AS
//!   membership and internal/external neighbor classification) and [`Dns`](daemon::dns::Dns)
//!   (a zone tree with authoritative servers, resolvers and resolver clients).
//!
//! - **[`synthesize_lab`](synthesize::synthesize_lab)**: The orchestrator driving the pipeline:
//!   load topology, merge every present protocol description, then render every attached daemon
//!   into per-router output directories.
//!
//! The entire run is single-threaded and synchronous; any lookup failure aborts the run with an
//! [`Error`] identifying the offending name.

pub mod daemon;
pub mod error;
pub mod synthesize;
pub mod topology;

#[cfg(test)]
mod test;

pub use error::Error;
pub use synthesize::synthesize_lab;
pub use topology::{LanId, RouterId, Topology};
