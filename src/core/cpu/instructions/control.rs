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

//! CONTROL block: BRK, HLT. All other opcodes fault.

use super::super::decode::InstructionWord;
use crate::core::error::CoreError;
use crate::core::regfile::RegisterFile;
use log::warn;

const BRK: u8 = 0;
const HLT: u8 = 7;

pub(super) fn execute(word: InstructionWord, regs: &mut RegisterFile) {
    match word.opcode() {
        BRK => regs.set_break(),
        HLT => regs.set_halt(),
        opcode => {
            let fault = CoreError::InvalidOpcode { block: 7, opcode };
            warn!("{fault}, continuing with prior state");
        }
    }

    regs.advance_pc();
}
