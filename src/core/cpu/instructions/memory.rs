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

//! MEMORY block: LB, LHW, LW, SB, SHW, SW.
//!
//! Loads write the zero-extended result back into `dst` — the same
//! register used as the store's address base. That's by design: it lets
//! a single register double as "pointer in" and "value out" for a load,
//! at the cost of destroying the pointer the very next time the
//! register is reused as a base. A bus-level fault from the MMU
//! (`NullAccess`/`BusFault`/`Misalignment`) is logged and raises
//! `ctrl.ERROR`, terminating the machine at the next `CHECK`.

use super::super::decode::{DecodedOperands, InstructionWord};
use crate::core::error::CoreError;
use crate::core::memory::Mmu;
use crate::core::regfile::RegisterFile;
use log::warn;

const LB: u8 = 0;
const LHW: u8 = 1;
const LW: u8 = 2;
const SB: u8 = 3;
const SHW: u8 = 4;
const SW: u8 = 5;

pub(super) fn execute(
    word: InstructionWord,
    ops: DecodedOperands,
    regs: &mut RegisterFile,
    mmu: &mut Mmu,
) {
    let dst = word.dst();
    // Captured before the store, since SB/SHW/SW use the pointer that
    // was already in `dst`, not whatever a load would overwrite it with.
    let ptr = regs.gp(dst);

    match word.opcode() {
        LB => load(regs, mmu, dst, ops.op1.wrapping_add(ops.op2), 1),
        LHW => load(regs, mmu, dst, ops.op1.wrapping_add(ops.op2), 2),
        LW => load(regs, mmu, dst, ops.op1.wrapping_add(ops.op2), 4),
        SB => store(regs, mmu, ptr.wrapping_add(ops.op1), 1, ops.op2),
        SHW => store(regs, mmu, ptr.wrapping_add(ops.op1), 2, ops.op2),
        SW => store(regs, mmu, ptr.wrapping_add(ops.op1), 4, ops.op2),
        opcode => {
            let fault = CoreError::InvalidOpcode { block: 1, opcode };
            warn!("{fault}, continuing with prior state");
        }
    }

    regs.advance_pc();
}

fn load(regs: &mut RegisterFile, mmu: &mut Mmu, dst: u8, addr: u32, size: u8) {
    match mmu.read(addr, size) {
        Ok(value) => regs.set_gp(dst, value),
        Err(e) => {
            warn!("load fault at 0x{addr:08X}: {e}");
            raise_if_terminal(regs, &e);
        }
    }
}

fn store(regs: &mut RegisterFile, mmu: &mut Mmu, addr: u32, size: u8, value: u32) {
    if let Err(e) = mmu.write(addr, size, value) {
        warn!("store fault at 0x{addr:08X}: {e}");
        raise_if_terminal(regs, &e);
    }
}

/// NullAccess/BusFault/Misalignment come from the MMU itself and are
/// terminal; InvalidSize (the UART non-byte-write case) is a device-level
/// diagnostic and does not stop the machine.
fn raise_if_terminal(regs: &mut RegisterFile, err: &CoreError) {
    match err {
        CoreError::NullAccess | CoreError::BusFault { .. } | CoreError::Misalignment { .. } => {
            regs.set_error();
        }
        _ => {}
    }
}
