//! Variant constructor selection for values crossing into a `Variant`.

/// Wrap `expr` in the `Variant` constructor matching its *native* type name.
///
/// Dispatch is on the raw native type, before lowering. Anything without a
/// dedicated constructor is wrapped by address.
pub fn variant_constructor(native_type: &str, expr: &str) -> String {
    match native_type {
        "float" | "real_t" | "double" => format!("NewVariantFloat64({expr})"),
        "int" | "uint64_t" => format!("NewVariantInt64({expr})"),
        "bool" => format!("NewVariantBool({expr})"),
        "String" => format!("NewVariantString({expr})"),
        "StringName" => format!("NewVariantStringName({expr})"),
        _ => format!("NewVariantWrapped(&{expr})"),
    }
}
