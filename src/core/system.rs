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

//! System integration
//!
//! This module ties together the register file, MMU, and execution FSM
//! into one `Machine` aggregate, and exposes the free-function boundary
//! (`core_init`/`cycle_state`/`regfile_dump`) described as the host
//! interface, backed by a process-wide singleton.
//!
//! The aggregate is the primary supported shape: construct a `Machine`
//! directly wherever you can (tests, the CLI, multiple simulator
//! instances side by side). The singleton exists only so the free
//! functions can be called without threading a `Machine` through; it is
//! single-threaded by contract, not a concurrency primitive.

use super::cpu::{Cpu, StepOutcome, StopReason};
use super::loader;
use super::memory::region::DRAM_BASE;
use super::memory::Mmu;
use super::regfile::RegisterFile;
use log::info;
use std::sync::{Mutex, OnceLock};

/// The assembled machine: register file, MMU, and FSM.
///
/// # Example
/// ```
/// use rscs::core::system::Machine;
///
/// let mut machine = Machine::new();
/// while machine.cycle_state() {}
/// assert!(machine.regfile().ctrl().halt);
/// ```
pub struct Machine {
    regs: RegisterFile,
    mmu: Mmu,
    cpu: Cpu,
}

impl Machine {
    /// Build a machine with the canonical boot demo preloaded, ready to
    /// run: all GP registers zeroed, PC at the DRAM base, every flag
    /// clear, DRAM zeroed then the boot image written to its first
    /// words, and the serial sink wired to stdout.
    pub fn new() -> Self {
        Self::with_sink(|byte| print!("{}", byte as char))
    }

    /// Build a machine whose serial port forwards bytes to `sink`
    /// instead of stdout — used by the CLI's `--quiet` paths and by
    /// tests that want to observe the byte stream directly.
    pub fn with_sink(sink: impl FnMut(u8) + Send + 'static) -> Self {
        let mut mmu = Mmu::with_sink(sink);
        loader::boot_demo(&mut mmu);

        Self {
            regs: RegisterFile::new(DRAM_BASE),
            mmu,
            cpu: Cpu::new(),
        }
    }

    /// Load a different boot image in place of the canonical demo, then
    /// reset so it takes effect.
    pub fn load_image(&mut self, image: &[u8]) {
        self.mmu.reset();
        loader::boot(&mut self.mmu, image);
        self.reset();
    }

    /// Re-initialize as if the process had just started: zero every GP
    /// register, reset PC to the DRAM base, clear every flag, and
    /// restart the FSM at `INIT`. DRAM contents (the currently loaded
    /// image) are preserved, matching a warm reset rather than a power
    /// cycle that would also need to re-run the loader.
    pub fn reset(&mut self) {
        self.regs.reset(DRAM_BASE);
        self.cpu.reset();
    }

    /// Advance the FSM by exactly one transition.
    ///
    /// Returns `false` once `HALT` or `ERROR` has terminated the
    /// machine, matching the host-loop contract in the external
    /// interface: call this until it returns `false`.
    pub fn cycle_state(&mut self) -> bool {
        match self.cpu.cycle_state(&mut self.regs, &mut self.mmu) {
            StepOutcome::Continue => true,
            StepOutcome::Stopped(_) => false,
        }
    }

    /// Run until the FSM stops, returning why.
    pub fn run_until_stop(&mut self) -> StopReason {
        loop {
            match self.cpu.cycle_state(&mut self.regs, &mut self.mmu) {
                StepOutcome::Continue => continue,
                StepOutcome::Stopped(reason) => return reason,
            }
        }
    }

    /// Run until the FSM stops or `max_cycles` transitions have
    /// elapsed, whichever comes first. Returns `None` if the cap was
    /// hit without the FSM reaching a terminal state.
    pub fn run_capped(&mut self, max_cycles: usize) -> Option<StopReason> {
        for _ in 0..max_cycles {
            match self.cpu.cycle_state(&mut self.regs, &mut self.mmu) {
                StepOutcome::Continue => continue,
                StepOutcome::Stopped(reason) => return Some(reason),
            }
        }
        None
    }

    /// The register file.
    pub fn regfile(&self) -> &RegisterFile {
        &self.regs
    }

    /// The MMU, for tests/tools that want to poke memory directly.
    pub fn mmu(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.regs.pc()
    }

    /// The last instruction word fetched by the FSM, for diagnostics —
    /// on an `ERROR` stop, this is the offending instruction.
    pub fn current_instruction(&self) -> u32 {
        self.cpu.current_instruction()
    }

    /// Diagnostic register dump, same format as `regfile_dump`.
    pub fn regfile_dump(&self) -> String {
        self.regs.dump()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

static SINGLETON: OnceLock<Mutex<Machine>> = OnceLock::new();

fn singleton() -> &'static Mutex<Machine> {
    SINGLETON.get_or_init(|| Mutex::new(Machine::new()))
}

/// Initialize the process-wide machine singleton. Idempotent is not
/// required: calling this again simply re-runs `Machine::new`, which
/// is itself fully deterministic.
pub fn core_init() {
    info!("core_init: machine ready at PC=0x{DRAM_BASE:08X}");
    let mut guard = singleton().lock().expect("machine lock poisoned");
    *guard = Machine::new();
}

/// Advance the singleton machine by one FSM transition.
///
/// # Panics
/// Panics if the singleton's lock is poisoned (a prior panic while
/// holding it), consistent with treating that as an unrecoverable host
/// bug rather than a simulated-machine fault.
pub fn cycle_state() -> bool {
    singleton()
        .lock()
        .expect("machine lock poisoned")
        .cycle_state()
}

/// Diagnostic snapshot of the singleton machine's register file.
pub fn regfile_dump() -> String {
    singleton()
        .lock()
        .expect("machine lock poisoned")
        .regfile_dump()
}
