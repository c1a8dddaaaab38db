// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use log::{error, info};
use rscs::core::cpu::StopReason;
use rscs::core::system::Machine;
use std::fs;
use std::process::ExitCode;

/// rscs: a small 32-bit load/store architecture instruction-set simulator
#[derive(Parser)]
#[command(name = "rscs")]
#[command(about = "Load/store ISA simulator", long_about = None)]
struct Args {
    /// Path to a raw boot image to preload into DRAM instead of the
    /// built-in four-instruction demo
    boot_image: Option<String>,

    /// Maximum FSM transitions to run before giving up on a program that
    /// never reaches HALT or ERROR
    #[arg(short = 'n', long, default_value = "1000000")]
    max_cycles: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("rscs v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut machine = Machine::new();

    if let Some(path) = &args.boot_image {
        info!("loading boot image from: {path}");
        match fs::read(path) {
            Ok(image) => machine.load_image(&image),
            Err(e) => {
                error!("failed to read boot image {path}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    info!("starting simulation at PC=0x{:08X}", machine.pc());

    match machine.run_capped(args.max_cycles) {
        Some(StopReason::Halt) => {
            info!("machine halted at PC=0x{:08X}", machine.pc());
            ExitCode::SUCCESS
        }
        Some(StopReason::Error) => {
            error!("machine stopped on ERROR at PC=0x{:08X}", machine.pc());
            eprintln!("INSTRUCTION: 0x{:08X}", machine.current_instruction());
            eprintln!("REGISTERS:");
            eprintln!("{}", machine.regfile_dump());
            ExitCode::FAILURE
        }
        None => {
            error!(
                "exceeded {} cycles without reaching HALT or ERROR",
                args.max_cycles
            );
            ExitCode::FAILURE
        }
    }
}
