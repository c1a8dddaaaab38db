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

//! Test fixtures for common scenarios

use rscs::core::system::Machine;

/// A machine whose serial output is captured instead of going to stdout.
#[allow(dead_code)]
pub fn machine_with_capture() -> (Machine, std::sync::Arc<std::sync::Mutex<Vec<u8>>>) {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let machine = Machine::with_sink(move |b| seen_clone.lock().unwrap().push(b));
    (machine, seen)
}

/// A machine loaded with `words` as its boot image, ready to run.
#[allow(dead_code)]
pub fn machine_with_program(words: &[u32]) -> Machine {
    let mut machine = Machine::with_sink(|_| {});
    machine.load_image(&super::assemble(words));
    machine
}
