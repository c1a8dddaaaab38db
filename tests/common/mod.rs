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

//! Shared helpers for integration tests: a tiny assembler for the
//! instruction word format, used to build small test programs without
//! hand-computing bit layouts in every test.

pub mod fixtures;

/// Coding schemes, matching the 2-bit field.
#[allow(dead_code)]
pub mod scheme {
    pub const R: u32 = 0;
    pub const UI: u32 = 1;
    pub const SI: u32 = 2;
    pub const IB: u32 = 3;
}

/// Block ids, matching the 3-bit field.
#[allow(dead_code)]
pub mod block {
    pub const ARITH: u32 = 0;
    pub const MEMORY: u32 = 1;
    pub const BRANCH: u32 = 2;
    pub const CONTROL: u32 = 7;
}

/// Encode an R/UI/SI-scheme instruction word: `block`, `scheme`,
/// `opcode`, `dst`, `src1`, and a 14-bit payload (ignored for the R
/// scheme's `src2`, use [`encode_r`] for that case).
#[allow(dead_code)]
pub fn encode(block: u32, scheme: u32, opcode: u32, dst: u32, src1: u32, payload: u32) -> u32 {
    (block & 0x7)
        | ((scheme & 0x3) << 3)
        | ((opcode & 0x7) << 5)
        | ((dst & 0x1f) << 8)
        | ((src1 & 0x1f) << 13)
        | ((payload & 0x3fff) << 18)
}

/// Encode an R-scheme instruction word with an explicit `src2`.
#[allow(dead_code)]
pub fn encode_r(block: u32, opcode: u32, dst: u32, src1: u32, src2: u32) -> u32 {
    encode(block, scheme::R, opcode, dst, src1, src2 & 0x1f)
}

/// Encode an IB-scheme instruction word with a 19-bit payload (`src1` is
/// unused and overridden by the payload field).
#[allow(dead_code)]
pub fn encode_ib(block: u32, opcode: u32, dst: u32, imm19: u32) -> u32 {
    (block & 0x7) | ((scheme::IB & 0x3) << 3) | ((opcode & 0x7) << 5) | ((dst & 0x1f) << 8) | ((imm19 & 0x7_ffff) << 13)
}

/// Assemble `words` into a little-endian byte image suitable for
/// `Machine::load_image`.
#[allow(dead_code)]
pub fn assemble(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}
