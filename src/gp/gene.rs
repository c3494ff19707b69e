//! Gene contract for tree-shaped chromosomes
//!
//! A gene is one node of a genetic-programming expression tree: either a
//! function drawn from a closed operator set, or an argument referencing
//! one of the problem's input variables.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probability that a freshly generated gene is a function node.
///
/// The default biases generation 3:1 toward functions so random trees
/// develop internal structure instead of collapsing to single terminals.
pub const DEFAULT_FUNCTION_BIAS: f64 = 0.75;

/// The two states a gene can be in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneKind {
    /// Internal node applying an operator to its children
    Function,
    /// Terminal node referencing an input variable
    Argument,
}

/// A node of a genetic-programming expression tree
///
/// Implementations carry whatever configuration they need (operator set,
/// variable count) so that fresh genes created through
/// [`create_new`](Gene::create_new) stay compatible with their ancestor.
pub trait Gene: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The gene's current state
    fn kind(&self) -> GeneKind;

    /// Number of children this gene requires: the fixed arity of the
    /// encoded operator for a function gene, 0 for an argument gene.
    fn arity(&self) -> usize;

    /// Largest arity any gene of this family can have, constant
    /// regardless of the gene's current state.
    fn max_arity(&self) -> usize;

    /// Pick a new random kind and value in place.
    fn generate<R: Rng>(&mut self, rng: &mut R);

    /// Pick a new random value in place, holding the kind fixed.
    fn generate_of_kind<R: Rng>(&mut self, kind: GeneKind, rng: &mut R);

    /// Create an unrelated fresh gene of random kind.
    fn create_new<R: Rng>(&self, rng: &mut R) -> Self;

    /// Create an unrelated fresh gene of the given kind.
    fn create_new_of_kind<R: Rng>(&self, kind: GeneKind, rng: &mut R) -> Self;
}

/// Arithmetic operator set for function genes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Protected division (returns 1.0 when the divisor is near zero)
    Div,
}

impl ArithmeticOp {
    /// The full operator set
    pub fn all() -> &'static [Self] {
        &[Self::Add, Self::Sub, Self::Mul, Self::Div]
    }

    /// Fixed arity of this operator
    pub fn arity(&self) -> usize {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => 2,
        }
    }

    /// Pick a random operator
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let ops = Self::all();
        ops[rng.gen_range(0..ops.len())]
    }

    /// Apply this operator to the given arguments
    pub fn apply(&self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(0.0);
        let b = args.get(1).copied().unwrap_or(0.0);
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => {
                if b.abs() < 1e-10 {
                    1.0
                } else {
                    a / b
                }
            }
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
enum ArithmeticValue {
    Operator(ArithmeticOp),
    Variable(usize),
}

/// Gene over the arithmetic operator set
///
/// Function genes encode one of `{+, -, *, /}`; argument genes index into
/// `[0, variables_count)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticGene {
    value: ArithmeticValue,
    variables_count: usize,
    function_bias: f64,
}

impl ArithmeticGene {
    /// Create a random gene for a problem with the given variable count
    ///
    /// # Panics
    /// Panics if `variables_count` is zero.
    pub fn random<R: Rng>(variables_count: usize, rng: &mut R) -> Self {
        Self::with_function_bias(variables_count, DEFAULT_FUNCTION_BIAS, rng)
    }

    /// Create a random gene with a custom function/argument generation
    /// bias
    ///
    /// # Panics
    /// Panics if `variables_count` is zero or `function_bias` is outside
    /// `[0, 1]`.
    pub fn with_function_bias<R: Rng>(
        variables_count: usize,
        function_bias: f64,
        rng: &mut R,
    ) -> Self {
        assert!(variables_count >= 1, "variables_count must be at least 1");
        assert!(
            (0.0..=1.0).contains(&function_bias),
            "function_bias must be in [0, 1]"
        );
        let mut gene = Self {
            value: ArithmeticValue::Variable(0),
            variables_count,
            function_bias,
        };
        gene.generate(rng);
        gene
    }

    /// The encoded operator, if this is a function gene
    pub fn operator(&self) -> Option<ArithmeticOp> {
        match self.value {
            ArithmeticValue::Operator(op) => Some(op),
            ArithmeticValue::Variable(_) => None,
        }
    }

    /// The encoded variable index, if this is an argument gene
    pub fn variable(&self) -> Option<usize> {
        match self.value {
            ArithmeticValue::Operator(_) => None,
            ArithmeticValue::Variable(i) => Some(i),
        }
    }

    /// Number of input variables this gene family indexes
    pub fn variables_count(&self) -> usize {
        self.variables_count
    }

    /// Evaluate this gene against already-evaluated child values and the
    /// input variable bindings
    pub fn apply(&self, args: &[f64], variables: &[f64]) -> f64 {
        match self.value {
            ArithmeticValue::Operator(op) => op.apply(args),
            ArithmeticValue::Variable(i) => variables.get(i).copied().unwrap_or(0.0),
        }
    }
}

impl Gene for ArithmeticGene {
    fn kind(&self) -> GeneKind {
        match self.value {
            ArithmeticValue::Operator(_) => GeneKind::Function,
            ArithmeticValue::Variable(_) => GeneKind::Argument,
        }
    }

    fn arity(&self) -> usize {
        match self.value {
            ArithmeticValue::Operator(op) => op.arity(),
            ArithmeticValue::Variable(_) => 0,
        }
    }

    fn max_arity(&self) -> usize {
        ArithmeticOp::all()
            .iter()
            .map(|op| op.arity())
            .max()
            .unwrap_or(0)
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) {
        let kind = if rng.gen::<f64>() < self.function_bias {
            GeneKind::Function
        } else {
            GeneKind::Argument
        };
        self.generate_of_kind(kind, rng);
    }

    fn generate_of_kind<R: Rng>(&mut self, kind: GeneKind, rng: &mut R) {
        self.value = match kind {
            GeneKind::Function => ArithmeticValue::Operator(ArithmeticOp::random(rng)),
            GeneKind::Argument => {
                ArithmeticValue::Variable(rng.gen_range(0..self.variables_count))
            }
        };
    }

    fn create_new<R: Rng>(&self, rng: &mut R) -> Self {
        let mut gene = self.clone();
        gene.generate(rng);
        gene
    }

    fn create_new_of_kind<R: Rng>(&self, kind: GeneKind, rng: &mut R) -> Self {
        let mut gene = self.clone();
        gene.generate_of_kind(kind, rng);
        gene
    }
}

impl fmt::Display for ArithmeticGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            ArithmeticValue::Operator(op) => write!(f, "{}", op),
            ArithmeticValue::Variable(i) => write!(f, "x{}", i),
        }
    }
}
