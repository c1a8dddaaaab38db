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

//! Core error types

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Fault kinds the machine can raise.
///
/// Some of these are terminal (they set `ctrl.ERROR` and stop the FSM at
/// the next `CHECK`); others are diagnostics-only and are logged while
/// execution continues with prior state. See `core::cpu` for which is
/// which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// MMU translated address 0
    #[error("null pointer access")]
    NullAccess,

    /// Address maps to no region in the device table
    #[error("bus fault at address 0x{address:08X}")]
    BusFault {
        /// The address that missed every region
        address: u32,
    },

    /// Access straddles a 4-byte boundary
    #[error("misaligned access at 0x{address:08X} (size {size})")]
    Misalignment {
        /// The address that was accessed
        address: u32,
        /// The access size in bytes (1, 2, or 4)
        size: u8,
    },

    /// Read/write to an undefined register index
    #[error("invalid register index {index}")]
    InvalidRegister {
        /// The out-of-range register index
        index: u8,
    },

    /// Opcode not defined for its block, or a reserved block
    #[error("invalid opcode {opcode} in block {block}")]
    InvalidOpcode {
        /// The block id the opcode was decoded under
        block: u8,
        /// The undefined opcode
        opcode: u8,
    },

    /// Decoder saw an unknown scheme code
    #[error("invalid coding scheme {scheme}")]
    InvalidScheme {
        /// The unknown 2-bit scheme code
        scheme: u8,
    },

    /// Device rejected an access size
    #[error("invalid access size {size}")]
    InvalidSize {
        /// The rejected size in bytes
        size: u8,
    },
}
