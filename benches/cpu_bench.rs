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

use criterion::{criterion_group, criterion_main, Criterion};
use rscs::core::system::Machine;
use std::hint::black_box;

fn boot_demo_benchmark(c: &mut Criterion) {
    c.bench_function("boot_demo_run_to_halt", |b| {
        b.iter(|| {
            let mut machine = Machine::with_sink(|_| {});
            black_box(machine.run_until_stop());
        });
    });
}

fn single_cycle_benchmark(c: &mut Criterion) {
    c.bench_function("cycle_state_single_transition", |b| {
        let mut machine = Machine::with_sink(|_| {});
        b.iter(|| {
            black_box(machine.cycle_state());
        });
    });
}

fn regfile_access_benchmark(c: &mut Criterion) {
    c.bench_function("regfile_read_all_gp", |b| {
        let machine = Machine::with_sink(|_| {});
        b.iter(|| {
            for i in 0..32u8 {
                black_box(machine.regfile().read(i).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    boot_demo_benchmark,
    single_cycle_benchmark,
    regfile_access_benchmark
);
criterion_main!(benches);
