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

//! Register file
//!
//! 32 general-purpose word registers plus the status flags (ZF/NF/IF) and
//! control flags (HALT/BREAK/ERROR), addressed through one 8-bit index
//! space: 0..31 general purpose, 32..34 status, 35..37 control.
//!
//! Index 0 (`RZ`) always reads 0 and silently discards writes, the
//! canonical "discard result" idiom for instructions decoded with `dst=0`.

use super::error::{CoreError, Result};

/// Register index of the zero register.
pub const RZ: u8 = 0;
/// Register index of the program counter.
pub const PC: u8 = 1;
/// Register index of the frame pointer.
pub const FP: u8 = 2;
/// Register index of the link register.
pub const LR: u8 = 3;
/// Register index of the "current register" scratch slot.
pub const CR: u8 = 4;

const GP_COUNT: usize = 32;

const ZF: u8 = 32;
const NF: u8 = 33;
const IF: u8 = 34;

const HALT: u8 = 35;
const BREAK: u8 = 36;
const ERROR: u8 = 37;

const REGISTER_NAMES: [&str; GP_COUNT] = [
    "rz", "pc", "fp", "lr", "cr", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10",
    "r11", "r12", "r13", "r14", "r15", "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23",
    "r24", "r25", "r26", "r27",
];

/// Status flags, written only by CMP and consumed by conditional branches.
///
/// `IF` is reserved: it is never written by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Zero flag
    pub zf: bool,
    /// Negative flag
    pub nf: bool,
    /// Interrupt flag (reserved)
    pub iflag: bool,
}

/// Control flags observed by the FSM at `CHECK`.
///
/// Monotonic once set within a run: no code path clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFlags {
    /// Halt requested
    pub halt: bool,
    /// Breakpoint hit
    pub brk: bool,
    /// Unrecoverable fault
    pub error: bool,
}

/// The register file: 32 GP registers plus status/control flags.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    gp: [u32; GP_COUNT],
    status: StatusFlags,
    ctrl: ControlFlags,
}

impl RegisterFile {
    /// Create a register file with every GP register zeroed, `PC` at
    /// `pc_reset`, and every flag cleared.
    pub fn new(pc_reset: u32) -> Self {
        let mut gp = [0u32; GP_COUNT];
        gp[PC as usize] = pc_reset;

        Self {
            gp,
            status: StatusFlags::default(),
            ctrl: ControlFlags::default(),
        }
    }

    /// Reset to the same state `new` would produce.
    pub fn reset(&mut self, pc_reset: u32) {
        self.gp = [0u32; GP_COUNT];
        self.gp[PC as usize] = pc_reset;
        self.status = StatusFlags::default();
        self.ctrl = ControlFlags::default();
    }

    /// Read register `idx`. Status/control flags read back as 0 or 1.
    ///
    /// # Errors
    /// `CoreError::InvalidRegister` if `idx` is outside the defined ranges.
    pub fn read(&self, idx: u8) -> Result<u32> {
        match idx {
            0..=31 => Ok(self.gp[idx as usize]),
            ZF => Ok(self.status.zf as u32),
            NF => Ok(self.status.nf as u32),
            IF => Ok(self.status.iflag as u32),
            HALT => Ok(self.ctrl.halt as u32),
            BREAK => Ok(self.ctrl.brk as u32),
            ERROR => Ok(self.ctrl.error as u32),
            _ => Err(CoreError::InvalidRegister { index: idx }),
        }
    }

    /// Write `value` to register `idx`. Writes to `RZ` are silently
    /// discarded. Status/control registers take only the low bit.
    ///
    /// # Errors
    /// `CoreError::InvalidRegister` if `idx` is outside the defined ranges.
    pub fn write(&mut self, idx: u8, value: u32) -> Result<()> {
        match idx {
            RZ => Ok(()),
            1..=31 => {
                self.gp[idx as usize] = value;
                Ok(())
            }
            ZF => {
                self.status.zf = value & 1 != 0;
                Ok(())
            }
            NF => {
                self.status.nf = value & 1 != 0;
                Ok(())
            }
            IF => {
                self.status.iflag = value & 1 != 0;
                Ok(())
            }
            HALT => {
                self.ctrl.halt = value & 1 != 0;
                Ok(())
            }
            BREAK => {
                self.ctrl.brk = value & 1 != 0;
                Ok(())
            }
            ERROR => {
                self.ctrl.error = value & 1 != 0;
                Ok(())
            }
            _ => Err(CoreError::InvalidRegister { index: idx }),
        }
    }

    /// Read a general-purpose register directly, bypassing the fault path.
    ///
    /// Used by the hot decode/execute path, where `idx` always comes from
    /// a 5-bit instruction field and can never be out of range.
    #[inline(always)]
    pub fn gp(&self, idx: u8) -> u32 {
        debug_assert!((idx as usize) < GP_COUNT);
        self.gp[idx as usize]
    }

    /// Write a general-purpose register directly, bypassing the fault
    /// path. Writes to `RZ` are silently discarded.
    #[inline(always)]
    pub fn set_gp(&mut self, idx: u8, value: u32) {
        debug_assert!((idx as usize) < GP_COUNT);
        if idx != RZ {
            self.gp[idx as usize] = value;
        }
    }

    /// Current program counter.
    #[inline(always)]
    pub fn pc(&self) -> u32 {
        self.gp[PC as usize]
    }

    /// Overwrite the program counter directly.
    #[inline(always)]
    pub fn set_pc(&mut self, value: u32) {
        self.gp[PC as usize] = value;
    }

    /// Advance the program counter by one instruction word.
    #[inline(always)]
    pub fn advance_pc(&mut self) {
        self.gp[PC as usize] = self.gp[PC as usize].wrapping_add(4);
    }

    /// Current status flags.
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Set `(ZF, NF)` directly, as CMP does.
    pub fn set_status(&mut self, zf: bool, nf: bool) {
        self.status.zf = zf;
        self.status.nf = nf;
    }

    /// Current control flags.
    pub fn ctrl(&self) -> ControlFlags {
        self.ctrl
    }

    /// Set the sticky `ERROR` flag. Never cleared once set within a run.
    pub fn set_error(&mut self) {
        self.ctrl.error = true;
    }

    /// Set the sticky `HALT` flag.
    pub fn set_halt(&mut self) {
        self.ctrl.halt = true;
    }

    /// Set the sticky `BREAK` flag.
    pub fn set_break(&mut self) {
        self.ctrl.brk = true;
    }

    /// Diagnostic snapshot: one line per GP register, name + unsigned +
    /// signed decimal, matching `regfile_dump` from the machine's
    /// external interface.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, name) in REGISTER_NAMES.iter().enumerate() {
            let value = self.gp[i];
            out.push_str(&format!("{name}: {value} {}\n", value as i32));
        }
        out
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rz_always_reads_zero() {
        let mut rf = RegisterFile::new(0x204);
        rf.write(RZ, 0xDEAD_BEEF).unwrap();
        assert_eq!(rf.read(RZ).unwrap(), 0);
    }

    #[test]
    fn gp_write_read_roundtrip() {
        let mut rf = RegisterFile::new(0x204);
        rf.write(5, 42).unwrap();
        assert_eq!(rf.read(5).unwrap(), 42);
    }

    #[test]
    fn pc_starts_at_reset_value() {
        let rf = RegisterFile::new(0x204);
        assert_eq!(rf.pc(), 0x204);
    }

    #[test]
    fn advance_pc_adds_four() {
        let mut rf = RegisterFile::new(0x204);
        rf.advance_pc();
        assert_eq!(rf.pc(), 0x208);
    }

    #[test]
    fn status_registers_take_only_low_bit() {
        let mut rf = RegisterFile::new(0);
        rf.write(32, 0xFFFF_FFFE).unwrap(); // ZF, low bit clear
        assert_eq!(rf.read(32).unwrap(), 0);
        rf.write(32, 0xFFFF_FFFF).unwrap(); // low bit set
        assert_eq!(rf.read(32).unwrap(), 1);
    }

    #[test]
    fn ctrl_flags_are_sticky_once_set() {
        let mut rf = RegisterFile::new(0);
        rf.set_error();
        assert!(rf.ctrl().error);
        // nothing in the public API clears it; only reset() does
        rf.set_halt();
        assert!(rf.ctrl().error);
    }

    #[test]
    fn invalid_register_index_faults() {
        let rf = RegisterFile::new(0);
        assert_eq!(
            rf.read(38),
            Err(CoreError::InvalidRegister { index: 38 })
        );
    }

    #[test]
    fn dump_contains_every_gp_register() {
        let rf = RegisterFile::new(0);
        let dump = rf.dump();
        for name in REGISTER_NAMES {
            assert!(dump.contains(name), "dump missing {name}");
        }
    }
}
