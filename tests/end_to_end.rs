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

//! Black-box scenarios driven entirely through `Machine`'s public API,
//! using the tiny assembler in `tests/common` instead of hand-computed
//! instruction words.

mod common;

use common::{block, encode, encode_ib, encode_r, fixtures, scheme};
use rscs::core::cpu::StopReason;
use rscs::core::memory::region::DRAM_BASE;
use rscs::core::regfile::RZ;

const ADD: u32 = 0;
const SHL: u32 = 2;
const OR: u32 = 5;
const SB: u32 = 3;
const HLT: u32 = 7;
const BEQ: u32 = 1;
const CMP: u32 = 6;

#[test]
fn boot_demo_emits_h_then_newline_and_halts() {
    let (mut machine, seen) = fixtures::machine_with_capture();
    let reason = machine.run_until_stop();

    assert_eq!(reason, StopReason::Halt);
    assert_eq!(*seen.lock().unwrap(), vec![0x68, 0x0a]);
    assert!(machine.regfile().ctrl().halt);
    assert_eq!(machine.pc(), DRAM_BASE + 16);
}

#[test]
fn arithmetic_chain_computes_expected_registers() {
    let words = [
        encode(block::ARITH, scheme::UI, ADD, 5, RZ as u32, 3), // ADD r5, rz, #3
        encode(block::ARITH, scheme::UI, ADD, 6, 5, 4),         // ADD r6, r5, #4
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),        // HLT
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Halt);
    assert_eq!(machine.regfile().read(5).unwrap(), 3);
    assert_eq!(machine.regfile().read(6).unwrap(), 7);
}

#[test]
fn compare_and_branch_taken_reaches_the_target() {
    // [0] ADD r5, rz, #1
    // [1] CMP r5, #1                     -> ZF=1
    // [2] BEQ pc, rz, #<target=idx4>      -> taken
    // [3] reserved block (would ERROR if wrongly reached)
    // [4] HLT (branch target)
    let target = DRAM_BASE + 16;
    let words = [
        encode(block::ARITH, scheme::UI, ADD, 5, RZ as u32, 1),
        encode(block::BRANCH, scheme::UI, CMP, 0, 5, 1),
        encode_ib(block::BRANCH, BEQ, 1, target),
        encode(3, scheme::R, 0, 0, 0, 0), // reserved block id 3
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Halt);
    assert!(machine.regfile().ctrl().halt);
    assert_eq!(machine.pc(), target + 4);
}

#[test]
fn compare_and_branch_not_taken_falls_through() {
    // Same shape, but CMP's immediate is 2 so r5(1) != 2: ZF clears and
    // the branch falls through to the HLT at index 3; index 4 (the
    // branch target) is a reserved-block word that must never execute.
    let target = DRAM_BASE + 16;
    let words = [
        encode(block::ARITH, scheme::UI, ADD, 5, RZ as u32, 1),
        encode(block::BRANCH, scheme::UI, CMP, 0, 5, 2),
        encode_ib(block::BRANCH, BEQ, 1, target),
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),
        encode(3, scheme::R, 0, 0, 0, 0), // reserved block id 3
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Halt);
    assert_eq!(machine.pc(), DRAM_BASE + 16);
}

#[test]
fn signed_immediate_sign_extends_to_all_ones() {
    let words = [
        encode(block::ARITH, scheme::SI, ADD, 5, RZ as u32, 0x3fff), // ADD r5, rz, #-1
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Halt);
    assert_eq!(machine.regfile().read(5).unwrap(), 0xffff_ffff);
}

#[test]
fn store_to_an_unmapped_address_raises_error_and_terminates() {
    // Build r5 = 0xDEADBEEF a byte at a time, then SB r5, rz, #0.
    let words = [
        encode(block::ARITH, scheme::UI, ADD, 5, RZ as u32, 0xDE),
        encode(block::ARITH, scheme::UI, SHL, 5, 5, 8),
        encode(block::ARITH, scheme::UI, OR, 5, 5, 0xAD),
        encode(block::ARITH, scheme::UI, SHL, 5, 5, 8),
        encode(block::ARITH, scheme::UI, OR, 5, 5, 0xBE),
        encode(block::ARITH, scheme::UI, SHL, 5, 5, 8),
        encode(block::ARITH, scheme::UI, OR, 5, 5, 0xEF),
        encode(block::MEMORY, scheme::UI, SB, 5, RZ as u32, 0),
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Error);
    assert!(machine.regfile().ctrl().error);
    assert_eq!(machine.regfile().read(5).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn r_scheme_add_reads_both_registers() {
    // ADD r6, r5, r5 via the R scheme, after seeding r5 with an
    // immediate: exercises encode_r, not just encode.
    let words = [
        encode(block::ARITH, scheme::UI, ADD, 5, RZ as u32, 21),
        encode_r(block::ARITH, ADD, 6, 5, 5),
        encode(block::CONTROL, scheme::R, HLT, 0, 0, 0),
    ];
    let mut machine = fixtures::machine_with_program(&words);

    assert_eq!(machine.run_until_stop(), StopReason::Halt);
    assert_eq!(machine.regfile().read(6).unwrap(), 42);
}
