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

//! Boot image loader
//!
//! The simulator preloads a small program into DRAM at reset. By
//! default that's the canonical four-instruction demo documented below;
//! a host (the CLI, a test) may instead hand in its own raw word stream
//! to run a different program without touching the core.

use super::memory::Mmu;

/// The canonical four-instruction boot demo.
///
/// Encoded little-endian, one instruction per 4-byte DRAM word:
///
/// | Offset | Instruction (informal)    |
/// |--------|---------------------------|
/// | 0      | `ADD r1, rz, #513`        |
/// | 4      | `SB  r1, rz, #'h'` (0x68) |
/// | 8      | `SB  r1, rz, #'\n'` (0x0a)|
/// | 12     | `HLT`                     |
///
/// Run end-to-end, this emits the byte stream `[0x68, 0x0a]` on the
/// serial sink, then halts.
pub const BOOT_DEMO: [u8; 16] = [
    0x08, 0x06, 0x04, 0x08, // ADD r1, rz, #513
    0x69, 0x06, 0xa0, 0x01, // SB  r1, rz, #'h'
    0x69, 0x06, 0x28, 0x00, // SB  r1, rz, #'\n'
    0xe7, 0x00, 0x00, 0x00, // HLT
];

/// Preload `image` into DRAM starting at offset 0.
pub fn boot(mmu: &mut Mmu, image: &[u8]) {
    mmu.load_ram(0, image);
}

/// Preload the canonical boot demo into DRAM.
pub fn boot_demo(mmu: &mut Mmu) {
    boot(mmu, &BOOT_DEMO);
}
