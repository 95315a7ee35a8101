//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::{ClassicalRegister, QuantumRegister};

/// A quantum circuit.
///
/// Wires are allocated densely: the n-th qubit added has id `QubitId(n)`.
/// Registers are recorded in declaration order together with the wires they
/// own, so a register name always resolves to the same ordered qubit list.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    qregs: Vec<(QuantumRegister, Vec<QubitId>)>,
    cregs: Vec<(ClassicalRegister, Vec<ClbitId>)>,
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a given number of loose qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Create a circuit over the given quantum registers, in order.
    pub fn from_qregs<'a>(
        name: impl Into<String>,
        registers: impl IntoIterator<Item = &'a QuantumRegister>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name);
        for reg in registers {
            circuit.add_register(reg)?;
        }
        Ok(circuit)
    }

    /// Add a single qubit that belongs to no register.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a single classical bit that belongs to no register.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        self.dag.add_clbit(id);
        id
    }

    /// Add a quantum register and return its qubits in index order.
    ///
    /// Fails if the name is not an identifier, is reserved (an `OpenQASM`
    /// keyword or a loose-wire fallback name), the size is zero, or a quantum
    /// register of the same name already exists.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<QubitId>> {
        let register = QuantumRegister::new(name, size);
        register.validate()?;
        if self.find_qreg(&register.name).is_some() {
            return Err(IrError::DuplicateRegister(register.name));
        }

        let ids: Vec<QubitId> = (0..size)
            .map(|index| {
                let id = QubitId(self.qubits.len() as u32);
                self.qubits
                    .push(Qubit::with_register(id, &register.name, index));
                self.dag.add_qubit(id);
                id
            })
            .collect();

        self.qregs.push((register, ids.clone()));
        Ok(ids)
    }

    /// Add a classical register and return its bits in index order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let register = ClassicalRegister::new(name, size);
        register.validate()?;
        if self.find_creg(&register.name).is_some() {
            return Err(IrError::DuplicateRegister(register.name));
        }

        let ids: Vec<ClbitId> = (0..size)
            .map(|index| {
                let id = ClbitId(self.clbits.len() as u32);
                self.clbits
                    .push(Clbit::with_register(id, &register.name, index));
                self.dag.add_clbit(id);
                id
            })
            .collect();

        self.cregs.push((register, ids.clone()));
        Ok(ids)
    }

    /// Add a quantum register from its descriptor.
    pub fn add_register(&mut self, register: &QuantumRegister) -> IrResult<Vec<QubitId>> {
        self.add_qreg(register.name.clone(), register.size)
    }

    /// Add a classical register from its descriptor.
    pub fn add_classical_register(
        &mut self,
        register: &ClassicalRegister,
    ) -> IrResult<Vec<ClbitId>> {
        self.add_creg(register.name.clone(), register.size)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Tdg, qubit)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::SX, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rz(theta.into()), qubit)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::P(theta.into()), qubit)
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            qubit,
        )
    }

    fn single(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply Fredkin (CSWAP) gate: swap `t1` and `t2` when `control` is |1⟩.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Append a prepared instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to every qubit currently in the circuit.
    ///
    /// On a circuit without qubits the barrier is still recorded, with no
    /// operands.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Concatenation
    // =========================================================================

    /// Concatenate `other` after `self`, returning a new circuit.
    ///
    /// The result keeps the name and every wire of `self`. Registers of
    /// `other` are matched by name: a register already present with the same
    /// size is shared, a missing one is added, and a size mismatch fails with
    /// [`IrError::RegisterConflict`]. Loose wires of `other` become new loose
    /// wires. Instructions of `other` are appended after those of `self`.
    pub fn compose(&self, other: &Circuit) -> IrResult<Circuit> {
        let mut out = self.clone();
        let mut qubit_map: FxHashMap<QubitId, QubitId> = FxHashMap::default();
        let mut clbit_map: FxHashMap<ClbitId, ClbitId> = FxHashMap::default();

        for (reg, ids) in &other.qregs {
            let targets = match out.find_qreg(&reg.name) {
                Some((existing, wires)) if existing.size == reg.size => wires.clone(),
                Some((existing, _)) => {
                    return Err(IrError::RegisterConflict {
                        name: reg.name.clone(),
                        left: existing.size,
                        right: reg.size,
                    });
                }
                None => out.add_register(reg)?,
            };
            qubit_map.extend(ids.iter().copied().zip(targets));
        }

        for (reg, ids) in &other.cregs {
            let targets = match out.find_creg(&reg.name) {
                Some((existing, bits)) if existing.size == reg.size => bits.clone(),
                Some((existing, _)) => {
                    return Err(IrError::RegisterConflict {
                        name: reg.name.clone(),
                        left: existing.size,
                        right: reg.size,
                    });
                }
                None => out.add_classical_register(reg)?,
            };
            clbit_map.extend(ids.iter().copied().zip(targets));
        }

        for qubit in other.qubits.iter().filter(|q| q.slot.is_none()) {
            let id = out.add_qubit();
            qubit_map.insert(qubit.id, id);
        }
        for clbit in other.clbits.iter().filter(|c| c.slot.is_none()) {
            let id = out.add_clbit();
            clbit_map.insert(clbit.id, id);
        }

        for (_, inst) in other.dag.topological_ops() {
            let mapped = inst.remapped(
                |q| qubit_map.get(&q).copied(),
                |c| clbit_map.get(&c).copied(),
            )?;
            out.dag.apply(mapped)?;
        }

        Ok(out)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get the qubits in the circuit, in id order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit, in id order.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Look up a qubit by id.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.0 as usize)
    }

    /// Look up a classical bit by id.
    pub fn clbit(&self, id: ClbitId) -> Option<&Clbit> {
        self.clbits.get(id.0 as usize)
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> impl Iterator<Item = &QuantumRegister> {
        self.qregs.iter().map(|(reg, _)| reg)
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> impl Iterator<Item = &ClassicalRegister> {
        self.cregs.iter().map(|(reg, _)| reg)
    }

    /// Qubits of the named quantum register, in index order.
    pub fn qreg_qubits(&self, name: &str) -> IrResult<&[QubitId]> {
        self.find_qreg(name)
            .map(|(_, ids)| ids.as_slice())
            .ok_or_else(|| IrError::RegisterNotFound(name.to_string()))
    }

    /// Bits of the named classical register, in index order.
    pub fn creg_clbits(&self, name: &str) -> IrResult<&[ClbitId]> {
        self.find_creg(name)
            .map(|(_, ids)| ids.as_slice())
            .ok_or_else(|| IrError::RegisterNotFound(name.to_string()))
    }

    /// Check whether a quantum register with this name exists.
    pub fn has_qreg(&self, name: &str) -> bool {
        self.find_qreg(name).is_some()
    }

    /// Check whether a classical register with this name exists.
    pub fn has_creg(&self, name: &str) -> bool {
        self.find_creg(name).is_some()
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// Number of operations by name, e.g. `{"cswap": 3, "h": 2, ...}`.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions() {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    fn find_qreg(&self, name: &str) -> Option<&(QuantumRegister, Vec<QubitId>)> {
        self.qregs.iter().find(|(reg, _)| reg.name == name)
    }

    fn find_creg(&self, name: &str) -> Option<&(ClassicalRegister, Vec<ClbitId>)> {
        self.cregs.iter().find(|(reg, _)| reg.name == name)
    }
}
