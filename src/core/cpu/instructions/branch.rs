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

//! BRANCH block: BR, BEQ, BLT, BLE, BGT, BGE, CMP.
//!
//! Every opcode but `CMP` computes `take_jump` from the status flags
//! (`ZF`/`NF`) and either jumps (`gp[dst] <- op1 + op2`, no further PC
//! increment — `dst` is typically `PC` itself) or falls through
//! (`PC <- PC + 4`). `CMP` never jumps; it sets `(ZF, NF)` from the
//! signed comparison `op1 - op2` instead.

use super::super::decode::{DecodedOperands, InstructionWord};
use crate::core::error::CoreError;
use crate::core::regfile::RegisterFile;
use log::warn;

const BR: u8 = 0;
const BEQ: u8 = 1;
const BLT: u8 = 2;
const BLE: u8 = 3;
const BGT: u8 = 4;
const BGE: u8 = 5;
const CMP: u8 = 6;

pub(super) fn execute(word: InstructionWord, ops: DecodedOperands, regs: &mut RegisterFile) {
    let status = regs.status();
    let (zf, nf) = (status.zf, status.nf);

    let take_jump = match word.opcode() {
        BR => true,
        BEQ => zf,
        BLT => nf,
        BLE => zf || nf,
        BGT => !zf && !nf,
        BGE => !nf,
        CMP => {
            let comparator = (ops.op1 as i32).wrapping_sub(ops.op2 as i32);
            match comparator.cmp(&0) {
                std::cmp::Ordering::Less => regs.set_status(false, true),
                std::cmp::Ordering::Equal => regs.set_status(true, false),
                std::cmp::Ordering::Greater => regs.set_status(false, false),
            }
            false
        }
        opcode => {
            let fault = CoreError::InvalidOpcode { block: 2, opcode };
            warn!("{fault}, continuing with prior state");
            false
        }
    };

    if take_jump {
        regs.set_gp(word.dst(), ops.op1.wrapping_add(ops.op2));
    } else {
        regs.advance_pc();
    }
}
