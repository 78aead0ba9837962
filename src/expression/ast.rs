//! Syntax tree of a parsed expression and its evaluation.

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Fixed set of single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
}

impl Function {
    /// `log` is the natural logarithm, like `ln`.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "sec" => Function::Sec,
            "csc" => Function::Csc,
            "cot" => Function::Cot,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "exp" => Function::Exp,
            "ln" | "log" => Function::Ln,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "abs" => Function::Abs,
            _ => return None,
        };
        Some(function)
    }

    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Function::Sin => value.sin(),
            Function::Cos => value.cos(),
            Function::Tan => value.tan(),
            Function::Sec => 1.0 / value.cos(),
            Function::Csc => 1.0 / value.sin(),
            Function::Cot => 1.0 / value.tan(),
            Function::Asin => value.asin(),
            Function::Acos => value.acos(),
            Function::Atan => value.atan(),
            Function::Sinh => value.sinh(),
            Function::Cosh => value.cosh(),
            Function::Tanh => value.tanh(),
            Function::Exp => value.exp(),
            Function::Ln => value.ln(),
            Function::Log10 => value.log10(),
            Function::Log2 => value.log2(),
            Function::Sqrt => value.sqrt(),
            Function::Cbrt => value.cbrt(),
            Function::Abs => value.abs(),
        }
    }
}

/// Expression node. The only variable is `x`; named constants are folded into numbers by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Variable,
    Neg(Box<Node>),
    Binary { op: BinaryOp, lhs: Box<Node>, rhs: Box<Node> },
    Call { function: Function, argument: Box<Node> },
}

impl Node {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Node::Number(value) => *value,
            Node::Variable => x,
            Node::Neg(operand) => -operand.evaluate(x),
            Node::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(x);
                let rhs = rhs.evaluate(x);
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => lhs / rhs,
                    BinaryOp::Pow => power(lhs, rhs),
                }
            }
            Node::Call { function, argument } => function.apply(argument.evaluate(x)),
        }
    }
}

/// Integer exponents go through `powi`, so negative bases raised to whole powers stay real.
fn power(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn function_names() {
        assert_eq!(Some(Function::Ln), Function::from_name("log"));
        assert_eq!(Some(Function::Ln), Function::from_name("ln"));
        assert_eq!(Some(Function::Sec), Function::from_name("sec"));
        assert_eq!(None, Function::from_name("gamma"));
    }

    #[test]
    fn reciprocal_trigonometry() {
        let eps = 1e-12;
        let x = 0.7;

        assert_approx_eq!(Function::Sec.apply(x), 1.0 / x.cos(), eps);
        assert_approx_eq!(Function::Csc.apply(x), 1.0 / x.sin(), eps);
        assert_approx_eq!(Function::Cot.apply(x), x.cos() / x.sin(), eps);
    }

    #[test]
    fn evaluate_tree() {
        // -(x^3) + 2 / x
        let node = Node::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Node::Neg(Box::new(Node::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(Node::Variable),
                rhs: Box::new(Node::Number(3.0)),
            }))),
            rhs: Box::new(Node::Binary {
                op: BinaryOp::Div,
                lhs: Box::new(Node::Number(2.0)),
                rhs: Box::new(Node::Variable),
            }),
        };

        assert_approx_eq!(node.evaluate(-2.0), 7.0, 1e-12);
    }
}
