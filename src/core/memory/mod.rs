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

//! Memory management unit
//!
//! The MMU is the address-to-device router plus the alignment guard: not
//! a virtual-memory translator, just a linear scan over the region table
//! (see [`region`]) followed by a bounds/alignment check and a dispatch
//! to the owning device.
//!
//! # Address space
//!
//! | Region | Base    | Size  | Device       |
//! |--------|---------|-------|--------------|
//! | null   | 0x0     | 1     | fault        |
//! | spi    | 0x1     | 512   | block device |
//! | uart0  | 0x201   | 1     | serial TX    |
//! | uart1  | 0x202   | 1     | serial TX    |
//! | uart2  | 0x203   | 1     | serial TX    |
//! | dram   | 0x204   | 4096  | RAM          |
//!
//! Any address outside all regions raises a bus fault.

pub mod device;
pub mod region;

use super::error::{CoreError, Result};
use device::{BlockDevice, Device, Ram, SerialPort};
use region::{find_region, DeviceId};

/// Address-to-device router and alignment guard.
pub struct Mmu {
    ram: Ram,
    uart: [SerialPort; 3],
    spi: BlockDevice,
}

impl Mmu {
    /// Create an MMU with zeroed RAM and a single byte sink wired to
    /// UART0. UART1 and UART2 discard whatever they're written.
    pub fn with_sink(sink: impl FnMut(u8) + Send + 'static) -> Self {
        Self {
            ram: Ram::new(),
            uart: [
                SerialPort::new(sink),
                SerialPort::new(|_| {}),
                SerialPort::new(|_| {}),
            ],
            spi: BlockDevice,
        }
    }

    /// Reset RAM to all zeros. Device sinks are left wired as-is.
    pub fn reset(&mut self) {
        self.ram.clear();
    }

    /// Preload `data` into RAM at byte offset `offset`.
    pub fn load_ram(&mut self, offset: usize, data: &[u8]) {
        self.ram.load(offset, data);
    }

    fn device_mut(&mut self, id: DeviceId) -> Option<&mut dyn Device> {
        match id {
            DeviceId::Null => None,
            DeviceId::Ram => Some(&mut self.ram),
            DeviceId::Serial(n) => self.uart.get_mut(n as usize).map(|d| d as &mut dyn Device),
            DeviceId::BlockDevice => Some(&mut self.spi),
        }
    }

    /// Translate `addr`, validate alignment against the shared 4-byte
    /// granule, and return the region + device-relative offset.
    fn translate(&self, addr: u32, size: u8) -> Result<(region::Region, u32)> {
        let region = find_region(addr).copied().ok_or(CoreError::BusFault { address: addr })?;

        if region.device == DeviceId::Null {
            return Err(CoreError::NullAccess);
        }

        if (addr % 4) + size as u32 > 4 {
            return Err(CoreError::Misalignment { address: addr, size });
        }

        Ok((region, addr - region.base))
    }

    /// Read `size` bytes (1, 2, or 4) at `addr`.
    pub fn read(&mut self, addr: u32, size: u8) -> Result<u32> {
        let (region, offset) = self.translate(addr, size)?;
        let device = self
            .device_mut(region.device)
            .expect("non-null region always has a device");
        device.read(offset, size)
    }

    /// Write the low `size` bytes of `value` at `addr`.
    pub fn write(&mut self, addr: u32, size: u8, value: u32) -> Result<()> {
        let (region, offset) = self.translate(addr, size)?;
        let device = self
            .device_mut(region.device)
            .expect("non-null region always has a device");
        device.write(offset, size, value)
    }
}
