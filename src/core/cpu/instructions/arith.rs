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

//! ARITH block: ADD, SUB, SHL, SHR, AND, OR, NOT, XOR.
//!
//! All operations write `gp[dst] <- f(op1, op2)` and wrap modulo 2^32.
//! `NOT` is the one unary opcode: it complements `gp[dst]` in place and
//! ignores the decoded operands. PC always advances by 4 afterward.

use super::super::decode::{DecodedOperands, InstructionWord};
use crate::core::error::CoreError;
use crate::core::regfile::RegisterFile;
use log::warn;

const ADD: u8 = 0;
const SUB: u8 = 1;
const SHL: u8 = 2;
const SHR: u8 = 3;
const AND: u8 = 4;
const OR: u8 = 5;
const NOT: u8 = 6;
const XOR: u8 = 7;

pub(super) fn execute(word: InstructionWord, ops: DecodedOperands, regs: &mut RegisterFile) {
    let dst = word.dst();
    let (op1, op2) = (ops.op1, ops.op2);

    match word.opcode() {
        ADD => regs.set_gp(dst, op1.wrapping_add(op2)),
        SUB => regs.set_gp(dst, op1.wrapping_sub(op2)),
        SHL => regs.set_gp(dst, op1.wrapping_shl(op2 & 31)),
        SHR => regs.set_gp(dst, op1.wrapping_shr(op2 & 31)),
        AND => regs.set_gp(dst, op1 & op2),
        OR => regs.set_gp(dst, op1 | op2),
        NOT => regs.set_gp(dst, !regs.gp(dst)),
        XOR => regs.set_gp(dst, op1 ^ op2),
        opcode => {
            let fault = CoreError::InvalidOpcode { block: 0, opcode };
            warn!("{fault}, continuing with prior state");
        }
    }

    regs.advance_pc();
}
