//! Arithmetic evaluator.
//!
//! ```text
//! Expr = Integer | Float | ("+" Expr Expr) | ("-" Expr Expr)
//!      | ("*" Expr Expr) | ("/" Expr Expr)
//! ```
//!
//! Integer arithmetic stays integral; any float operand promotes the result.
//! `/` always produces a float.

use shapecase::types::{float, integer};
use shapecase::{Error, Methods, Reference, Type, Value};

pub const METHOD: &str = "compute";

pub fn sample() -> Value {
    Value::from(serde_json::json!(["+", 2, ["*", 3, 4]]))
}

#[derive(Clone, Copy)]
enum Op { Add, Sub, Mul, Div }

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }
}

pub fn methods() -> Result<Methods, Error> {
    let expr = Reference::named("Expr");
    let op_expr = |op: Op| Type::tuple([Type::literal(op.symbol()), expr.to_type(), expr.to_type()]);
    let ops = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    let mut alts = vec![integer(), float()];
    alts.extend(ops.iter().map(|&op| op_expr(op)));
    expr.bind(Type::union(alts))?;

    let mut m = Methods::new();
    m.register(METHOD, [integer() | float()], |_, args| Ok(args[0].clone()))?;
    for op in ops {
        m.register(METHOD, [op_expr(op)], move |m, args| {
            let [_, lhs, rhs] = operands(&args[0])?;
            let l = m.invoke(METHOD, std::slice::from_ref(lhs))?;
            let r = m.invoke(METHOD, std::slice::from_ref(rhs))?;
            apply(op, &l, &r)
        })?;
    }
    Ok(m)
}

pub fn run(m: &Methods, input: &Value) -> Result<Value, Error> {
    m.invoke(METHOD, std::slice::from_ref(input))
}

fn operands(v: &Value) -> Result<&[Value; 3], Error> {
    v.as_list()
        .and_then(|items| items.try_into().ok())
        .ok_or_else(|| Error::failed(METHOD, format!("malformed expression {v}")))
}

fn apply(op: Op, l: &Value, r: &Value) -> Result<Value, Error> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            let out = match op {
                Op::Add => a.checked_add(b),
                Op::Sub => a.checked_sub(b),
                Op::Mul => a.checked_mul(b),
                Op::Div => return divide(a as f64, b as f64),
            };
            out.map(Value::Int).ok_or_else(|| Error::failed(METHOD, format!("integer overflow in {a} {} {b}", op.symbol())))
        }
        _ => {
            let (Some(a), Some(b)) = (as_number(l), as_number(r)) else {
                return Err(Error::failed(METHOD, format!("cannot apply {} to {l} and {r}", op.symbol())));
            };
            match op {
                Op::Add => Ok(Value::Float(a + b)),
                Op::Sub => Ok(Value::Float(a - b)),
                Op::Mul => Ok(Value::Float(a * b)),
                Op::Div => divide(a, b),
            }
        }
    }
}

fn divide(a: f64, b: f64) -> Result<Value, Error> {
    if b == 0.0 {
        Err(Error::failed(METHOD, "division by zero"))
    } else {
        Ok(Value::Float(a / b))
    }
}

fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i)   => Some(*i as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}
