//! The simulated computer: registers, variables, and the handler table that
//! dispatches instructions onto them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::core::algebra::{Complex, ComplexMatrix};
use crate::core::ast::{Instruction, InstructionKind};
use crate::core::error::{CoreError, CoreResult};
use crate::core::handlers::{InitializeHandler, InstructionHandler, SelectHandler, TraceHandler};

/// One `side`x`side` register slot. Starts uninitialized and, once
/// initialized, never goes back.
#[derive(Debug, Clone)]
pub struct QRegister {
    index: usize,
    side: usize,
    value: Option<ComplexMatrix>,
}

impl QRegister {
    pub fn new(index: usize, side: usize) -> Self {
        Self { index, side, value: None }
    }

    pub fn index(&self) -> usize { self.index }
    pub fn side(&self) -> usize { self.side }

    /// Number of cells once flattened.
    pub fn size(&self) -> usize {
        self.side * self.side
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn initialize(&mut self, value: ComplexMatrix) {
        self.value = Some(value);
    }

    pub fn value(&self) -> CoreResult<&ComplexMatrix> {
        self.value.as_ref().ok_or(CoreError::UninitializedRegister(self.index))
    }

    /// Overwrites the value; the shape must stay `side`x`side`.
    pub fn set_value(&mut self, value: ComplexMatrix) -> CoreResult<()> {
        if value.shape() != (self.side, self.side) {
            return Err(CoreError::shape_mismatch("register", (self.side, self.side), value.shape()));
        }
        self.value = Some(value);
        Ok(())
    }
}

/// Content of a named variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Complex),
    Matrix(ComplexMatrix),
}

impl Value {
    pub fn as_matrix(&self) -> Option<&ComplexMatrix> {
        match self {
            Value::Matrix(m) => Some(m),
            Value::Scalar(_) => None,
        }
    }

    fn cells(&self) -> Vec<Vec<String>> {
        match self {
            Value::Scalar(z) => vec![vec![z.to_string()]],
            Value::Matrix(m) => matrix_cells(m),
        }
    }
}

impl From<ComplexMatrix> for Value {
    fn from(m: ComplexMatrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<Complex> for Value {
    fn from(z: Complex) -> Self {
        Value::Scalar(z)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(z) => write!(f, "{}", z),
            Value::Matrix(m) => write!(f, "{}", m),
        }
    }
}

/// Registers and variables, handed mutably to each handler invocation.
#[derive(Debug, Clone)]
pub struct ComputerState {
    side: usize,
    registers: Vec<QRegister>,
    variables: BTreeMap<String, Value>,
}

impl ComputerState {
    pub fn new(side: usize, count: usize) -> Self {
        Self {
            side,
            registers: (0..count).map(|i| QRegister::new(i, side)).collect(),
            variables: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> usize { self.side }

    pub fn registers(&self) -> &[QRegister] {
        &self.registers
    }

    pub fn register(&self, index: usize) -> CoreResult<&QRegister> {
        let count = self.registers.len();
        self.registers
            .get(index)
            .ok_or_else(|| CoreError::out_of_range(format!("register R{} (computer has {} registers)", index, count)))
    }

    pub fn register_mut(&mut self, index: usize) -> CoreResult<&mut QRegister> {
        let count = self.registers.len();
        self.registers
            .get_mut(index)
            .ok_or_else(|| CoreError::out_of_range(format!("register R{} (computer has {} registers)", index, count)))
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Creates or overwrites a variable.
    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }
}

type HandlerRef = Arc<dyn InstructionHandler>;

/// Variant → handlers index, built once and read-only afterwards.
struct HandlerTable {
    registered: Vec<HandlerRef>,
    by_kind: HashMap<InstructionKind, Vec<HandlerRef>>,
}

impl HandlerTable {
    fn build(handlers: Vec<HandlerRef>) -> CoreResult<Self> {
        let mut table = HandlerTable { registered: Vec::new(), by_kind: HashMap::new() };
        for handler in handlers {
            table.register(handler)?;
        }
        Ok(table)
    }

    fn register(&mut self, handler: HandlerRef) -> CoreResult<()> {
        if self.registered.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return Err(CoreError::HandlerAlreadyRegistered(handler.name().to_string()));
        }
        for kind in handler.handled_instructions() {
            self.by_kind.entry(*kind).or_default().push(Arc::clone(&handler));
        }
        debug!("registered {} for {:?}", handler.name(), handler.handled_instructions());
        self.registered.push(handler);
        Ok(())
    }

    fn lookup(&self, kind: InstructionKind) -> CoreResult<&[HandlerRef]> {
        match self.by_kind.get(&kind) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(CoreError::NoHandlerForInstruction(kind)),
        }
    }
}

pub struct Computer {
    state: ComputerState,
    table: HandlerTable,
}

impl Computer {
    /// `count` registers of `side`x`side`, all uninitialized.
    pub fn new(handlers: Vec<Arc<dyn InstructionHandler>>, side: usize, count: usize) -> CoreResult<Self> {
        if side == 0 {
            return Err(CoreError::invalid_operand("register side length must be at least 1"));
        }
        let table = HandlerTable::build(handlers)?;
        Ok(Self { state: ComputerState::new(side, count), table })
    }

    /// Initialize and Select semantics, plus the trace handler when asked for.
    pub fn with_default_handlers(side: usize, count: usize, trace: bool) -> CoreResult<Self> {
        let mut handlers: Vec<Arc<dyn InstructionHandler>> = Vec::new();
        if trace {
            handlers.push(Arc::new(TraceHandler));
        }
        handlers.push(Arc::new(InitializeHandler));
        handlers.push(Arc::new(SelectHandler));
        Self::new(handlers, side, count)
    }

    /// Runs every handler registered for the instruction's variant, in
    /// registration order. Stops at the first handler error.
    pub fn execute(&mut self, instruction: &Instruction) -> CoreResult<()> {
        let handlers = self.table.lookup(instruction.kind())?;
        for handler in handlers {
            debug!("{} <- {}", handler.name(), instruction);
            handler.execute(instruction, &mut self.state)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &ComputerState {
        &self.state
    }

    pub fn side(&self) -> usize {
        self.state.side
    }

    /// Qubits per register.
    pub fn size(&self) -> usize {
        self.state.side * self.state.side
    }

    pub fn registers(&self) -> &[QRegister] {
        self.state.registers()
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        self.state.variables()
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.table.registered.iter().map(|h| h.name()).collect()
    }

    pub fn register_info(&self) -> String {
        let mut info = String::new();
        for reg in self.registers() {
            match &reg.value {
                None => info.push_str(&format!("R{}: Not initialized\n", reg.index)),
                Some(m) => info.push_str(&format!("R{}: {}\n", reg.index, m)),
            }
        }
        info
    }

    pub fn variables_info(&self) -> String {
        self.variables()
            .iter()
            .map(|(k, v)| format!("Var({}): {}\n", k, v))
            .collect()
    }

    /// Human-readable dump of the whole computer.
    pub fn status(&self) -> String {
        format!(
            "Quantum computer with {} registers of {} qubits\n\
             ====== Registers ======\n{}\
             ====== Variables ======\n{}",
            self.registers().len(),
            self.size(),
            self.register_info(),
            self.variables_info()
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            side: self.side(),
            registers: self
                .registers()
                .iter()
                .map(|r| r.value.as_ref().map(matrix_cells))
                .collect(),
            variables: self.variables().iter().map(|(k, v)| (k.clone(), v.cells())).collect(),
        }
    }
}

/// Serializable view of the computer, cells in canonical scalar form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub side: usize,
    pub registers: Vec<Option<Vec<Vec<String>>>>,
    pub variables: BTreeMap<String, Vec<Vec<String>>>,
}

fn matrix_cells(m: &ComplexMatrix) -> Vec<Vec<String>> {
    (0..m.rows())
        .filter_map(|i| m.row(i))
        .map(|row| row.iter().map(|z| z.to_string()).collect())
        .collect()
}
