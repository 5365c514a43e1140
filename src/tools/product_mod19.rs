//! The `productmod19` tool: multiply two integers and reduce modulo 19.

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::protocol::{ParamSpec, ToolSpec};
use crate::core::registry::{ToolHandler, ToolRegistry};

/// The fixed modulus of the tool.
pub const MODULUS: i64 = 19;

/// Compute `(a * b) mod 19` as a non-negative residue.
///
/// The multiplication is widened to `i128` so that no pair of `i64` operands
/// can overflow, and `rem_euclid` keeps the result in `[0, 18]` regardless of
/// operand signs.
pub fn product_mod19(a: i64, b: i64) -> i64 {
    (i128::from(a) * i128::from(b)).rem_euclid(i128::from(MODULUS)) as i64
}

/// Register the tool with the registry.
pub fn register(registry: &mut ToolRegistry) {
    let spec = ToolSpec::new(
        "productmod19",
        "Compute the product of two integers modulo 19.",
        &[
            ParamSpec::integer("a", "First integer"),
            ParamSpec::integer("b", "Second integer"),
        ],
    );

    let handler: ToolHandler = Box::new(|args: Value| {
        let a = require_i64(&args, "a")?;
        let b = require_i64(&args, "b")?;
        Ok(serde_json::json!({ "result": product_mod19(a, b) }))
    });

    registry.register(spec, handler);
}

/// Decode a required integer argument. Floats, strings, and numbers outside
/// the `i64` range are rejected, never coerced.
fn require_i64(args: &Value, name: &'static str) -> Result<i64, ToolError> {
    args.get(name)
        .ok_or(ToolError::MissingParam { name })?
        .as_i64()
        .ok_or(ToolError::InvalidParam {
            name,
            expected: "integer",
        })
}
