use serde_json::Number;

use crate::ir::Primitive;

/// Integers keep `Integer` while they fit Apex's 32-bit `Integer`;
/// wider ones become `Long`. Anything with a fractional form is `Double`.
pub fn classify_number(n: &Number) -> Primitive {
    if let Some(i) = n.as_i64() {
        integer_width(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        integer_width(i128::from(u))
    } else {
        Primitive::Double
    }
}

fn integer_width(v: i128) -> Primitive {
    if i32::try_from(v).is_ok() { Primitive::Integer } else { Primitive::Long }
}
