//! Host functions installed into the global environment.
//!
//! | name       | arity | behavior                                      |
//! |------------|------:|-----------------------------------------------|
//! | `clock`    | 0     | seconds since the Unix epoch                  |
//! | `print`    | 1     | writes the stringified argument               |
//! | `println`  | 1     | same, followed by a newline                   |
//! | `readln`   | 0     | one line of input, `nil` at end of input      |
//! | `parseNum` | 1     | string → number, error if not a number        |

use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::callable::NativeFunction;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn all() -> Vec<NativeFunction> {
    vec![
        NativeFunction {
            name: "clock",
            arity: 0,
            func: clock,
        },
        NativeFunction {
            name: "print",
            arity: 1,
            func: print,
        },
        NativeFunction {
            name: "println",
            arity: 1,
            func: println,
        },
        NativeFunction {
            name: "readln",
            arity: 0,
            func: readln,
        },
        NativeFunction {
            name: "parseNum",
            arity: 1,
            func: parse_num,
        },
    ]
}

/// Every native as a `(name, value)` pair ready to be defined.
pub fn globals() -> impl Iterator<Item = (&'static str, Value)> {
    all()
        .into_iter()
        .map(|native| (native.name, Value::NativeFunction(Rc::new(native))))
}

fn clock(_: &mut Interpreter, _: &[Value]) -> Result<Value, String> {
    let now = Utc::now();
    let seconds = now.timestamp_millis() as f64 / 1000.0;

    debug!("clock() -> {}", seconds);

    Ok(Value::Number(seconds))
}

fn print(interpreter: &mut Interpreter, args: &[Value]) -> Result<Value, String> {
    interpreter
        .write_output(&args[0].to_string())
        .map_err(|e| format!("Could not write output: {}", e))?;

    Ok(Value::Nil)
}

fn println(interpreter: &mut Interpreter, args: &[Value]) -> Result<Value, String> {
    let mut line = args[0].to_string();
    line.push('\n');

    interpreter
        .write_output(&line)
        .map_err(|e| format!("Could not write output: {}", e))?;

    Ok(Value::Nil)
}

fn readln(interpreter: &mut Interpreter, _: &[Value]) -> Result<Value, String> {
    let line = interpreter
        .read_line()
        .map_err(|e| format!("Could not read input: {}", e))?;

    Ok(line.map_or(Value::Nil, Value::String))
}

fn parse_num(_: &mut Interpreter, args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| format!("Cannot parse '{}' as a number.", s)),
        other => Err(format!(
            "parseNum expects a string but got a {}.",
            other.type_name()
        )),
    }
}
