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

//! Core simulation components
//!
//! This module contains all pieces of the machine:
//! - Register file (general-purpose + status + control registers)
//! - Memory unit (MMU, region table, RAM/serial/block devices)
//! - Decoder (instruction word layout and operand-coding schemes)
//! - Execution FSM (fetch/decode/execute/check state machine)
//! - Boot image loader
//! - System integration (`Machine`) and the process-wide singleton boundary

pub mod cpu;
pub mod error;
pub mod loader;
pub mod memory;
pub mod regfile;
pub mod system;

pub use cpu::{Cpu, CpuState, StepOutcome, StopReason};
pub use error::{CoreError, Result};
pub use memory::Mmu;
pub use regfile::RegisterFile;
pub use system::Machine;
