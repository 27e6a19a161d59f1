//! Helper functions exposed by the std module.

use std::time::{SystemTime, UNIX_EPOCH};

use incant_types::ast::Node;
use incant_types::{EvalError, Result, Value};

use crate::interpreter::Interpreter;
use crate::module::HelperFunction;

fn check_no_args(name: &str, args: &[Node]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(EvalError::InvalidArgument(format!(
            "@{name} takes no arguments"
        )))
    }
}

/// `@me()` resolves to the configured account address.
pub struct MeHelper;

impl HelperFunction for MeHelper {
    fn run(&self, interpreter: &mut Interpreter, args: &[Node]) -> Result<Value> {
        check_no_args("me", args)?;
        interpreter
            .account()
            .map(|a| Value::Address(a.to_owned()))
            .ok_or_else(|| EvalError::Connection("no account configured for @me".into()))
    }
}

/// `@date()` resolves to the current unix timestamp in seconds.
pub struct DateHelper;

impl HelperFunction for DateHelper {
    fn run(&self, _interpreter: &mut Interpreter, args: &[Node]) -> Result<Value> {
        check_no_args("date", args)?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| EvalError::InvalidArgument(format!("system clock error: {e}")))?;
        Ok(Value::Number(now.as_secs() as i128))
    }
}
