//! Menu-driven driver over two matrix files.
//!
//! A [`Session`] loads both operands fresh for every requested [`Operation`],
//! runs the arithmetic it names and writes each result to
//! `<results_dir>/<name>_result.txt`. Each arithmetic step reports its own
//! outcome, so a failing step never prevents the others from running.
//!
//! Before addition and subtraction the second operand is transposed when its
//! shape differs from the first one.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

use crate::config::options::ShellOptions;
use crate::error::{MatError, Result};
use crate::matrix::sparse::SparseMatrix;

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Addition, subtraction and multiplication in that order
    All,
    /// Load both files and report their shapes only
    Inspect,
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid choice {0:?}, please select 1-6")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => Ok(Operation::Add),
            "2" | "subtract" => Ok(Operation::Subtract),
            "3" | "multiply" => Ok(Operation::Multiply),
            "4" | "all" => Ok(Operation::All),
            "5" | "inspect" => Ok(Operation::Inspect),
            "6" | "exit" => Ok(Operation::Exit),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

impl Operation {
    /// Arithmetic steps this entry runs.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Operation::Add => &[Step::Add],
            Operation::Subtract => &[Step::Subtract],
            Operation::Multiply => &[Step::Multiply],
            Operation::All => &[Step::Add, Step::Subtract, Step::Multiply],
            Operation::Inspect | Operation::Exit => &[],
        }
    }
}

/// A single arithmetic operation and the file its result goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Add,
    Subtract,
    Multiply,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Step::Add => "addition",
            Step::Subtract => "subtraction",
            Step::Multiply => "multiplication",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Step::Add => "addition_result.txt",
            Step::Subtract => "subtraction_result.txt",
            Step::Multiply => "multiply_result.txt",
        }
    }

    /// Apply to `a` and `b`. Returns the result and whether `b` was transposed.
    pub fn apply(self, a: &SparseMatrix, b: &SparseMatrix) -> Result<(SparseMatrix, bool)> {
        let coerce = matches!(self, Step::Add | Step::Subtract) && a.shape() != b.shape();
        let transposed;
        let b = if coerce {
            transposed = b.transpose();
            warn!(
                "{}: second matrix is {}x{}, using its {}x{} transpose",
                self.name(),
                b.rows(),
                b.cols(),
                transposed.rows(),
                transposed.cols()
            );
            &transposed
        } else {
            b
        };
        let result = match self {
            Step::Add => a.add(b)?,
            Step::Subtract => a.subtract(b)?,
            Step::Multiply => a.multiply(b)?,
        };
        Ok((result, coerce))
    }
}

/// Outcome of one step.
#[derive(Debug)]
pub struct OperationReport {
    pub step: Step,
    pub transposed: bool,
    /// File the result was written to
    pub outcome: Result<PathBuf>,
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(path) => write!(f, "Saved {} result to: {}", self.step.name(), path.display()),
            Err(e) => write!(f, "Error in {}: {e}", self.step.name()),
        }
    }
}

/// Shapes of both operands plus one report per step.
#[derive(Debug)]
pub struct RunReport {
    pub first: (usize, usize, usize),
    pub second: (usize, usize, usize),
    pub steps: Vec<OperationReport>,
}

impl RunReport {
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.is_ok())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, c, n) = self.first;
        writeln!(f, "Matrix 1 dimensions: {r}x{c} ({n} non-zero elements)")?;
        let (r, c, n) = self.second;
        writeln!(f, "Matrix 2 dimensions: {r}x{c} ({n} non-zero elements)")?;
        for s in &self.steps {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}

fn summary(m: &SparseMatrix) -> (usize, usize, usize) {
    (m.rows(), m.cols(), m.nnz())
}

/// Operands and output location for a run of the shell.
pub struct Session {
    pub opts: ShellOptions,
}

impl Session {
    pub fn new(opts: ShellOptions) -> Self {
        Self { opts }
    }

    /// Load both operand files.
    pub fn load(&self) -> Result<(SparseMatrix, SparseMatrix)> {
        let a = SparseMatrix::from_file(&self.opts.first)?;
        let b = SparseMatrix::from_file(&self.opts.second)?;
        Ok((a, b))
    }

    fn ensure_results_dir(&self) -> Result<()> {
        let dir = &self.opts.results_dir;
        fs::create_dir_all(dir).map_err(|source| MatError::Io { path: dir.clone(), source })
    }

    /// Run `op`. Loading failures abort the whole run; step failures are
    /// recorded in the returned report.
    pub fn run(&self, op: Operation) -> Result<RunReport> {
        let (a, b) = self.load()?;
        let steps = op.steps();
        if !steps.is_empty() {
            self.ensure_results_dir()?;
        }
        let steps = steps.iter().map(|&step| self.run_step(step, &a, &b)).collect();
        Ok(RunReport {
            first: summary(&a),
            second: summary(&b),
            steps,
        })
    }

    fn run_step(&self, step: Step, a: &SparseMatrix, b: &SparseMatrix) -> OperationReport {
        let mut transposed = false;
        let outcome = step.apply(a, b).and_then(|(result, t)| {
            transposed = t;
            let path = self.opts.results_dir.join(step.file_name());
            result.save_to_file(&path)?;
            info!("{} result written to {}", step.name(), path.display());
            Ok(path)
        });
        if let Err(e) = &outcome {
            warn!("{} failed: {e}", step.name());
        }
        OperationReport { step, transposed, outcome }
    }
}

const MENU: &str = "\nAvailable operations:
1. Addition
2. Subtraction
3. Multiplication
4. All operations
5. View matrix information
6. Exit";

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Interactive loop: ask for the two input paths (blank keeps the default),
/// then present the menu until `Exit` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    results_dir: PathBuf,
) -> io::Result<()> {
    writeln!(output, "Sparse Matrix Operations")?;
    writeln!(output, "=======================")?;
    writeln!(output, "\nEnter the paths to the input files:")?;
    let first = prompt(&mut input, &mut output, "First matrix file path (or press Enter for default): ")?
        .unwrap_or_default();
    let second = prompt(&mut input, &mut output, "Second matrix file path (or press Enter for default): ")?
        .unwrap_or_default();
    let mut opts = ShellOptions::with_inputs(&first, &second);
    opts.results_dir = results_dir;
    let session = Session::new(opts);

    loop {
        writeln!(output, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut output, "\nSelect operation (1-6): ")? else {
            break;
        };
        let op = match choice.parse::<Operation>() {
            Ok(Operation::Exit) => {
                writeln!(output, "\nExiting program...")?;
                break;
            }
            Ok(op) => op,
            Err(e) => {
                writeln!(output, "\n{e}")?;
                continue;
            }
        };

        writeln!(output, "\nLoading matrices from:")?;
        writeln!(output, "Matrix 1: {}", session.opts.first.display())?;
        writeln!(output, "Matrix 2: {}", session.opts.second.display())?;
        match session.run(op) {
            Ok(report) => {
                write!(output, "\n{report}")?;
                if !report.steps.is_empty() {
                    writeln!(output, "\nOperations completed!")?;
                }
            }
            Err(e) => writeln!(output, "\nError: {e}")?,
        }

        if op == Operation::Inspect {
            continue;
        }
        if prompt(&mut input, &mut output, "\nPress Enter to continue...")?.is_none() {
            break;
        }
    }
    Ok(())
}
