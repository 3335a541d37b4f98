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

//! Module containing all error types

use thiserror::Error;

/// Main error type
///
/// Every failure during synthesis is one of three classes: a *reference error* (the input names a
/// router, LAN, interface or zone server that does not exist in the already-built state), a
/// *structural error* (the input itself is malformed), or an *IO failure*. All of them abort the
/// run; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum Error {
    /// The input references a router name which is not part of the topology.
    #[error("Reference to unknown router: {0}")]
    UndefinedRouter(String),
    /// The input references a LAN name which is not part of the topology.
    #[error("Reference to unknown LAN: {0}")]
    UndefinedLan(String),
    /// The input references an interface which does not exist on the given router.
    #[error("Router {router} has no interface named {interface}")]
    UndefinedInterface {
        /// Name of the router on which the interface was searched
        router: String,
        /// Name of the missing interface
        interface: String,
    },
    /// A DNS zone was declared in the zone tree without a matching server declaration.
    #[error("No authoritative server declared for zone: {0}")]
    UndefinedZoneServer(String),
    /// The DNS input contains no `root` entry in its server declarations.
    #[error("The DNS server declarations are missing the root zone")]
    MissingRootZone,
    /// A router has a default gateway which shares no LAN with it, so no next-hop address exists.
    #[error("Router {client} shares no LAN with its default gateway {gateway}")]
    GatewayUnreachable {
        /// Name of the router asking for a default route
        client: String,
        /// Name of the configured gateway router
        gateway: String,
    },
    /// A LAN base address was not given in `address/netmask` form.
    #[error("LAN address is not in CIDR form: {0}")]
    MalformedLanAddress(String),
    /// A whitespace-separated input line does not have the expected number of fields.
    #[error("Malformed {kind} entry: {line:?}")]
    MalformedEntry {
        /// Which kind of input line was malformed (e.g. `interface`, `cost`, `AS`)
        kind: &'static str,
        /// The offending line, verbatim
        line: String,
    },
    /// Error while reading input files or writing output files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// One of the JSON input documents could not be deserialized.
    #[error("Cannot parse JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
