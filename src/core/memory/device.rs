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

//! Memory-mapped device handlers
//!
//! Each device exposes byte-granular `read`/`write` over an offset that
//! the MMU has already translated to be relative to the device's own
//! region, so a device never sees the global address space.

use super::super::error::{CoreError, Result};
use super::region::DRAM_SIZE;

/// A memory-mapped device.
pub trait Device {
    /// Read `size` bytes (1, 2, or 4) at `offset`, zero-extended to 32
    /// bits, assembled little-endian.
    fn read(&mut self, offset: u32, size: u8) -> Result<u32>;

    /// Write the low `size` bytes of `value` at `offset`, little-endian.
    fn write(&mut self, offset: u32, size: u8, value: u32) -> Result<()>;
}

/// Main system RAM: a flat, byte-addressable 4096-byte block.
pub struct Ram {
    bytes: Box<[u8; DRAM_SIZE as usize]>,
}

impl Ram {
    /// A zeroed RAM block.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0u8; DRAM_SIZE as usize]),
        }
    }

    /// Zero every byte, simulating a power-cycle.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Copy `data` into RAM starting at byte offset `offset`, used by the
    /// boot loader to preload the boot image. Truncated if it would run
    /// past the end of RAM.
    pub fn load(&mut self, offset: usize, data: &[u8]) {
        let end = (offset + data.len()).min(self.bytes.len());
        if offset >= end {
            return;
        }
        let n = end - offset;
        self.bytes[offset..end].copy_from_slice(&data[..n]);
    }

    /// Direct byte-slice view, used by tests that need to assert on raw
    /// memory contents.
    #[cfg(test)]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Ram {
    fn read(&mut self, offset: u32, size: u8) -> Result<u32> {
        let start = offset as usize;
        let mut value = 0u32;
        for i in 0..size as usize {
            value |= (self.bytes[start + i] as u32) << (8 * i);
        }
        Ok(value)
    }

    fn write(&mut self, offset: u32, size: u8, value: u32) -> Result<()> {
        let start = offset as usize;
        for i in 0..size as usize {
            self.bytes[start + i] = ((value >> (8 * i)) & 0xff) as u8;
        }
        Ok(())
    }
}

/// A serial TX port: only byte-sized writes are meaningful, forwarded to
/// an external byte sink (the machine's `putbyte` boundary). Reads
/// always return 0.
pub struct SerialPort {
    sink: Box<dyn FnMut(u8) + Send>,
}

impl SerialPort {
    /// Create a serial port that forwards written bytes to `sink`.
    pub fn new(sink: impl FnMut(u8) + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl Device for SerialPort {
    fn read(&mut self, _offset: u32, _size: u8) -> Result<u32> {
        Ok(0)
    }

    fn write(&mut self, _offset: u32, size: u8, value: u32) -> Result<()> {
        if size != 1 {
            return Err(CoreError::InvalidSize { size });
        }
        (self.sink)((value & 0xff) as u8);
        Ok(())
    }
}

/// Block-device stub: reads return 0, writes are discarded.
#[derive(Debug, Default)]
pub struct BlockDevice;

impl Device for BlockDevice {
    fn read(&mut self, _offset: u32, _size: u8) -> Result<u32> {
        Ok(0)
    }

    fn write(&mut self, _offset: u32, _size: u8, _value: u32) -> Result<()> {
        Ok(())
    }
}
