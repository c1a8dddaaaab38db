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

//! rscs: a small 32-bit load/store instruction-set simulator
//!
//! This library provides the core emulation components for a minimal
//! custom ISA: a 32-register file, a memory-mapped address space
//! multiplexing RAM and a couple of device stubs, an instruction decoder
//! with four operand-coding schemes, and the fetch-decode-execute FSM
//! that drives them.
//!
//! # Example
//!
//! ```
//! use rscs::core::system::Machine;
//!
//! let mut machine = Machine::new();
//! machine.reset();
//! assert_eq!(machine.regfile().read(0).unwrap(), 0); // rz is always 0
//! ```

pub mod core;
