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

use super::test_dir;
use crate::synthesize::synthesize_lab;
use maplit::hashset;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a complete config directory: two routers on one LAN, OSPF on both, r1 as DNS root
/// server and resolver with r2 as its client, and r1 as r2's default gateway.
fn write_config(dir: &Path) {
    fs::write(
        dir.join("topology.json"),
        r#"{
            "lans": { "lan0": "10.0.0.0/24" },
            "routers": {
                "r1": { "eth0": "1 lan0" },
                "r2": { "eth0": "2 lan0" }
            },
            "gateways": [ "r2 r1" ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("ospf.json"),
        r#"{
            "areas": { "backbones": { "area0": "lan0" } },
            "routers": [ "r1", "r2" ],
            "costs": [ "r1 eth0 10" ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("dns.json"),
        r#"{
            "servers": [ "root r1" ],
            "root": {},
            "resolvers": [ "r1 r2" ]
        }"#,
    )
    .unwrap();
}

/// Collect every file below `dir` as relative path -> content.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(dir: &Path, base: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, base, out);
            } else {
                out.insert(path.strip_prefix(base).unwrap().to_path_buf(), fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(dir, dir, &mut out);
    out
}

#[test]
fn full_pipeline() {
    let config = test_dir("synth-config");
    let target = test_dir("synth-target");
    write_config(&config);

    synthesize_lab(&config, &target).unwrap();

    let entries: HashSet<String> = fs::read_dir(&target)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        entries,
        hashset! {
            "lab.conf".to_string(),
            "r1.startup".to_string(),
            "r2.startup".to_string(),
            "r1".to_string(),
            "r2".to_string(),
        }
    );

    assert_eq!(
        fs::read_to_string(target.join("lab.conf")).unwrap(),
        "r1[0]=lan0\nr2[0]=lan0\n"
    );

    // r1 runs frr and named
    assert_eq!(
        fs::read_to_string(target.join("r1.startup")).unwrap(),
        "ip a add 10.0.0.1/24 dev eth0\n\
         systemctl start frr\n\
         systemctl start named\n"
    );
    // r2 is a resolver client: default route and frr only
    assert_eq!(
        fs::read_to_string(target.join("r2.startup")).unwrap(),
        "ip a add 10.0.0.2/24 dev eth0\n\
         ip route add default via 10.0.0.1\n\
         systemctl start frr\n"
    );

    // the ospf fragment landed in r1's frr.conf, cost block first
    let frr_conf = fs::read_to_string(target.join("r1/etc/frr/frr.conf")).unwrap();
    assert!(frr_conf.starts_with("interface eth0\nospf cost 10\n"));
    assert!(frr_conf.contains("router ospf\nnetwork 10.0.0.0/24 area area0\n"));
    let daemons = fs::read_to_string(target.join("r1/etc/frr/daemons")).unwrap();
    assert!(daemons.contains("ospfd=yes"));

    // r1 is the root authority and a resolver
    let named_conf = fs::read_to_string(target.join("r1/etc/bind/named.conf")).unwrap();
    assert!(named_conf.contains("type master"));
    let options = fs::read_to_string(target.join("r1/etc/bind/named.conf.options")).unwrap();
    assert!(options.contains("recursion yes;"));
    assert!(target.join("r1/etc/bind/db.root").exists());

    // r2 only gets the resolver stub
    assert_eq!(
        fs::read_to_string(target.join("r2/etc/resolv.conf")).unwrap(),
        "nameserver 10.0.0.1\n"
    );
    assert!(!target.join("r2/etc/bind").exists());
}

#[test]
fn rerun_is_byte_identical() {
    let config = test_dir("rerun-config");
    let target = test_dir("rerun-target");
    write_config(&config);

    synthesize_lab(&config, &target).unwrap();
    let first = snapshot(&target);
    synthesize_lab(&config, &target).unwrap();
    let second = snapshot(&target);

    assert_eq!(first, second);
}

#[test]
fn reference_errors_abort_the_run() {
    let config = test_dir("abort-config");
    let target = test_dir("abort-target");
    write_config(&config);
    // point the ospf description at a router that does not exist
    fs::write(config.join("ospf.json"), r#"{ "routers": [ "r9" ] }"#).unwrap();

    assert!(synthesize_lab(&config, &target).is_err());
}

#[test]
fn protocol_files_are_optional() {
    let config = test_dir("bare-config");
    let target = test_dir("bare-target");
    fs::write(
        config.join("topology.json"),
        r#"{
            "lans": { "lan0": "10.0.0.0/24" },
            "routers": { "r1": { "eth0": "1 lan0" } }
        }"#,
    )
    .unwrap();

    synthesize_lab(&config, &target).unwrap();
    assert_eq!(fs::read_to_string(target.join("lab.conf")).unwrap(), "r1[0]=lan0\n");
    // no daemon attached, so the startup script only assigns addresses
    assert_eq!(
        fs::read_to_string(target.join("r1.startup")).unwrap(),
        "ip a add 10.0.0.1/24 dev eth0\n"
    );
}
