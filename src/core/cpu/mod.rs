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

//! Execution FSM
//!
//! A tagged finite state machine drives the fetch/decode/execute/check
//! loop, one transition per [`Cpu::cycle_state`] call. `CHECK`'s
//! successor priority is `HALT > ERROR > BREAK > FETCH`: unlike the
//! machine this simulator is modeled on, a fault is never masked by an
//! earlier breakpoint (see DESIGN.md for why this departs from the
//! preserved reference behavior).

pub mod decode;
pub mod instructions;

use super::memory::Mmu;
use super::regfile::RegisterFile;
use decode::{decode, DecodedOperands, InstructionWord};
use log::{debug, error, warn};

/// FSM states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Entered once at `core_init`, falls through to `Fetch`.
    Init,
    /// `iword <- MMU.read(PC, 4)`
    Fetch,
    /// Parse `iword`, fill `(op1, op2)`.
    Decode,
    /// Dispatch by block; mutate register file and/or memory.
    Execute,
    /// Read control flags, pick the successor state.
    Check,
    /// Sticky: a breakpoint was hit.
    Break,
    /// Terminal: an unrecoverable fault occurred.
    Error,
    /// Terminal: the machine halted.
    Halt,
}

/// Why `cycle_state` stopped advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `HLT` executed (or the FSM otherwise reached `HALT`).
    Halt,
    /// A fault set `ctrl.ERROR`.
    Error,
}

/// The outcome of one `cycle_state` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The FSM is still running; call `cycle_state` again.
    Continue,
    /// The FSM reached a terminal state.
    Stopped(StopReason),
}

/// The fetch-decode-execute-check state machine.
///
/// Owns no memory or registers itself: those are passed in by the
/// caller (the `Machine` aggregate) on each `cycle_state` call, the way
/// the `RegisterFile` and `Mmu` are shared with other would-be
/// consumers (a disassembler, a debugger) without the FSM claiming sole
/// ownership.
pub struct Cpu {
    state: CpuState,
    current_instruction: u32,
    scratch: DecodedOperands,
}

impl Cpu {
    /// Start in `INIT`, with no instruction fetched yet.
    pub fn new() -> Self {
        Self {
            state: CpuState::Init,
            current_instruction: 0,
            scratch: DecodedOperands::default(),
        }
    }

    /// Return to the just-constructed state.
    pub fn reset(&mut self) {
        self.state = CpuState::Init;
        self.current_instruction = 0;
        self.scratch = DecodedOperands::default();
    }

    /// Current FSM state, for inspection/debugging.
    pub fn state(&self) -> CpuState {
        self.state
    }

    /// The last instruction word fetched, for diagnostics.
    pub fn current_instruction(&self) -> u32 {
        self.current_instruction
    }

    /// Advance exactly one FSM transition.
    pub fn cycle_state(&mut self, regs: &mut RegisterFile, mmu: &mut Mmu) -> StepOutcome {
        match self.state {
            CpuState::Init => {
                self.state = CpuState::Fetch;
                StepOutcome::Continue
            }

            CpuState::Fetch => {
                self.state = match mmu.read(regs.pc(), 4) {
                    Ok(word) => {
                        self.current_instruction = word;
                        CpuState::Decode
                    }
                    Err(_) => {
                        regs.set_error();
                        CpuState::Check
                    }
                };
                StepOutcome::Continue
            }

            CpuState::Decode => {
                let word = InstructionWord(self.current_instruction);
                match decode(word, regs) {
                    Ok(ops) => self.scratch = ops,
                    Err(e) => warn!("decode fault, leaving stale operands in place: {e}"),
                }
                self.state = CpuState::Execute;
                StepOutcome::Continue
            }

            CpuState::Execute => {
                let word = InstructionWord(self.current_instruction);
                instructions::execute(word, self.scratch, regs, mmu);
                self.state = CpuState::Check;
                StepOutcome::Continue
            }

            CpuState::Check => {
                self.state = check_ctrl_regs(regs);
                StepOutcome::Continue
            }

            CpuState::Break => {
                // Sticky: stays in BREAK. A host debugger can inspect
                // state here and keep driving cycle_state, but the
                // machine never leaves BREAK on its own.
                StepOutcome::Continue
            }

            CpuState::Error => {
                error!("machine halted on error");
                debug!("instruction: 0x{:08X}", self.current_instruction);
                debug!("registers:\n{}", regs.dump());
                StepOutcome::Stopped(StopReason::Error)
            }

            CpuState::Halt => StepOutcome::Stopped(StopReason::Halt),
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// `CHECK`'s successor: `HALT > ERROR > BREAK > FETCH`.
fn check_ctrl_regs(regs: &RegisterFile) -> CpuState {
    let ctrl = regs.ctrl();
    if ctrl.halt {
        CpuState::Halt
    } else if ctrl.error {
        CpuState::Error
    } else if ctrl.brk {
        CpuState::Break
    } else {
        CpuState::Fetch
    }
}
