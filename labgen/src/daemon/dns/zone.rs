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

//! The DNS zone tree: a rooted arena of zones, each with one authoritative server and zero or
//! more child zones and plain names.

use crate::topology::RouterId;

/// Zone identification (index into the [`ZoneTree`] arena)
pub type ZoneId = usize;

/// # Zone
///
/// A node in the zone tree. The fully-qualified name is the concatenation of the name segments
/// root-ward, joined by `.`; the root's own segment is empty, so every non-root name carries a
/// trailing dot and the root's fully-qualified name is the empty string.
#[derive(Debug)]
pub struct Zone {
    name: String,
    parent: Option<ZoneId>,
    children: Vec<ZoneId>,
    server: RouterId,
    names: Vec<RouterId>,
}

impl Zone {
    /// Return the zone's own name segment (empty for the root)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the parent zone, if this is not the root
    pub fn parent(&self) -> Option<ZoneId> {
        self.parent
    }

    /// Return the child zones, in declaration order
    pub fn children(&self) -> &[ZoneId] {
        &self.children
    }

    /// Return the authoritative server of this zone
    pub fn server(&self) -> RouterId {
        self.server
    }

    /// Return the plain-name routers registered directly under this zone
    pub fn names(&self) -> &[RouterId] {
        &self.names
    }
}

/// # Zone tree
///
/// Arena owning all zones of one DNS hierarchy; cross-references are [`ZoneId`] handles. The root
/// zone is created with the tree and always has id `0`.
#[derive(Debug)]
pub struct ZoneTree {
    zones: Vec<Zone>,
}

impl ZoneTree {
    /// Create a tree holding only the root zone (empty name segment).
    pub fn new(root_server: RouterId, names: Vec<RouterId>) -> Self {
        Self {
            zones: vec![Zone {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                server: root_server,
                names,
            }],
        }
    }

    /// The root zone.
    pub fn root(&self) -> ZoneId {
        0
    }

    /// Add a child zone under `parent` and return its id. **Panics** if the parent id is not
    /// part of this tree.
    pub fn add_zone(
        &mut self,
        name: &str,
        parent: ZoneId,
        server: RouterId,
        names: Vec<RouterId>,
    ) -> ZoneId {
        let id = self.zones.len();
        self.zones.push(Zone {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            server,
            names,
        });
        self.zones[parent].children.push(id);
        id
    }

    /// Get a reference to a zone. **Panics** if the id is not part of this tree.
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id]
    }

    /// Iterate over all zones in creation order (root first).
    pub fn zones(&self) -> impl Iterator<Item = ZoneId> {
        0..self.zones.len()
    }

    /// The fully-qualified name of a zone: its own segment, then every ancestor's segment,
    /// joined by `.`. The root yields the empty string; every other zone ends in a trailing dot.
    pub fn full_name(&self, id: ZoneId) -> String {
        let zone = self.zone(id);
        match zone.parent {
            Some(parent) => format!("{}.{}", zone.name, self.full_name(parent)),
            None => zone.name.clone(),
        }
    }
}
