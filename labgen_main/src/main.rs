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

//! Command-line frontend for the lab synthesizer.

use clap::Parser;
use labgen::synthesize_lab;
use log::*;
use std::path::PathBuf;
use std::process::exit;

/// Synthesize a network lab from a declarative configuration directory.
#[derive(Debug, Parser)]
#[command(name = "labgen", version)]
struct Args {
    /// Directory containing topology.json and the per-protocol descriptions
    config: PathBuf,
    /// Directory receiving the generated lab
    target: PathBuf,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    if let Err(e) = synthesize_lab(&args.config, &args.target) {
        error!("synthesis failed: {}", e);
        exit(1);
    }
}
