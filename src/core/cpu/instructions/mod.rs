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

//! Execution: dispatch a decoded instruction word to its block handler.
//!
//! Each block module owns the opcodes within its own functional unit;
//! this file only routes `block` to the right one.

mod arith;
mod branch;
mod control;
mod memory;

use super::decode::{Block, DecodedOperands, InstructionWord};
use crate::core::memory::Mmu;
use crate::core::regfile::RegisterFile;
use log::warn;

/// Execute the instruction carried by `word`, using the operand pair the
/// decoder already produced.
pub fn execute(word: InstructionWord, ops: DecodedOperands, regs: &mut RegisterFile, mmu: &mut Mmu) {
    match word.block() {
        Block::Arith => arith::execute(word, ops, regs),
        Block::Memory => memory::execute(word, ops, regs, mmu),
        Block::Branch => branch::execute(word, ops, regs),
        Block::Control => control::execute(word, regs),
        Block::Reserved(id) => {
            warn!("block {id} is reserved; raising ERROR");
            regs.set_error();
        }
    }
}
