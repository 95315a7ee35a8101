//! Benchmarks for register allocation and circuit concatenation
//!
//! Run with: cargo bench -p qcompress-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcompress_ir::{Circuit, QuantumRegister};

/// A circuit with `num_regs` registers of `size` qubits and a layer of
/// H + CX on each.
fn layered(name: &str, num_regs: u32, size: u32) -> Circuit {
    let mut circuit = Circuit::new(name);
    for r in 0..num_regs {
        let q = circuit.add_qreg(format!("{name}{r}"), size).unwrap();
        for &qubit in &q {
            circuit.h(qubit).unwrap();
        }
        for pair in q.windows(2) {
            circuit.cx(pair[0], pair[1]).unwrap();
        }
    }
    circuit
}

/// Benchmark register allocation
fn bench_register_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_allocation");

    for num_regs in &[1u32, 4, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("add_qreg", num_regs),
            num_regs,
            |b, &n| {
                let regs: Vec<_> = (0..n)
                    .map(|i| QuantumRegister::new(format!("r{i}"), 4))
                    .collect();
                b.iter(|| Circuit::from_qregs(black_box("bench"), &regs).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark concatenating two circuits over disjoint registers
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for size in &[2u32, 8, 32] {
        let left = layered("a", 4, *size);
        let right = layered("b", 4, *size);
        group.bench_with_input(BenchmarkId::new("disjoint", size), size, |b, _| {
            b.iter(|| black_box(left.compose(&right).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark circuit depth calculation
fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for size in &[5u32, 20, 50] {
        let circuit = layered("q", 2, *size);
        group.bench_with_input(BenchmarkId::new("depth", size), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_register_allocation,
    bench_compose,
    bench_circuit_depth,
);

criterion_main!(benches);
