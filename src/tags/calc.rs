//! `calc` tag: evaluate one expression per line.

use crate::expr::{evaluate, format_number};
use crate::parser::Attributes;
use crate::render::Context;
use crate::util::split_nonempty;

/// Evaluate an expression and format the result, or `"error"`.
pub fn eval_to_string(expr: &str) -> String {
    match evaluate(expr) {
        Ok(value) => format_number(value),
        Err(err) => {
            log::debug!("calc \"{}\": {}", expr, err);
            "error".to_string()
        }
    }
}

/// `<calc>`: results only. With any attribute each line becomes
/// `expr = result`.
pub fn calc(_ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    split_nonempty(content, '\n')
        .map(|expr| {
            let result = eval_to_string(expr);
            if attrs.is_empty() {
                result
            } else {
                format!("{} = {}", expr, result)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
