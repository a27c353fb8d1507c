//! Native structure layouts → Go struct field declarations.
//!
//! A layout is the API description's `format` string for a native structure:
//! `;`-separated clauses of the form `<type> <name>[=<default>]`. Clause order
//! is the native memory layout and is preserved exactly.

use anyhow::{Context, Result};
use tracing::debug;

use crate::lower::{OPAQUE_POINTER, decompose, lower_descriptor, lower_type};
use crate::model::StructField;
use crate::naming::{NamingPolicy, default_policy};

/// Lower every clause of `layout` using the default naming policy.
pub fn lower_struct_fields(layout: &str) -> Result<Vec<StructField>> {
    lower_struct_fields_with(default_policy(), layout)
}

/// Lower every clause of `layout`, naming fields with `policy`.
pub fn lower_struct_fields_with(policy: &NamingPolicy, layout: &str) -> Result<Vec<StructField>> {
    let mut fields = Vec::new();
    let clauses: Vec<&str> = layout.split(';').map(str::trim).collect();
    let last = clauses.len() - 1;

    for (i, clause) in clauses.into_iter().enumerate() {
        // Only a trailing `;` may leave an empty clause behind.
        if clause.is_empty() {
            if i == last {
                continue;
            }
            anyhow::bail!(
                "empty clause at position {} in native structure layout `{layout}`",
                i + 1
            );
        }
        let field = lower_clause(policy, clause)
            .with_context(|| format!("in native structure layout `{layout}`"))?;
        fields.push(field);
    }

    debug!(
        clauses = fields.len(),
        unsupported = fields.iter().filter(|f| !f.is_live()).count(),
        "lowered native structure layout"
    );
    Ok(fields)
}

/// Render `layout` as field declaration lines, one per clause, each
/// newline-terminated. Function pointers become comment lines.
pub fn native_structure_format_to_fields(layout: &str) -> Result<String> {
    let mut out = String::new();
    for field in lower_struct_fields(layout)? {
        out.push_str(&field.to_string());
        out.push('\n');
    }
    Ok(out)
}

fn lower_clause(policy: &NamingPolicy, clause: &str) -> Result<StructField> {
    let (ty, name) = split_clause(clause)?;

    // Defaults cannot be expressed on Go struct fields.
    let name = match name.split_once('=') {
        Some((name, _default)) => name.trim(),
        None => name,
    };

    let bare = name.trim_start_matches('*');
    let pointers = name.len() - bare.len();
    let bare = bare.trim();

    // In `void *(*alloc)(int)` the leading `*` belongs to the return type.
    if let Some(rest) = bare.strip_prefix("(*") {
        return lower_function_pointer(policy, ty, pointers, rest)
            .with_context(|| format!("function pointer field `{clause}`"));
    }
    if bare.contains(['(', ')']) {
        anyhow::bail!("unsupported declarator `{name}` in native structure clause `{clause}`");
    }

    let (bare, array_len) = split_array(bare)
        .with_context(|| format!("array field `{clause}`"))?;
    let lowered =
        pointer_type(ty, pointers).with_context(|| format!("type of field `{bare}`"))?;
    let field_ty = match array_len {
        Some(len) => format!("[{len}]{lowered}"),
        None => lowered,
    };

    Ok(StructField::Field {
        name: policy.field_name(bare),
        ty: field_ty,
    })
}

/// Lower `ty` with `pointers` extra `*` markers taken from the declarator.
///
/// The markers stack on top of the type's own indirection. `void` is opaque,
/// so its first level is `unsafe.Pointer` and only the rest become `*`.
fn pointer_type(ty: &str, pointers: usize) -> Result<String> {
    let desc = decompose(ty)?;
    let lowered = lower_descriptor(&desc);
    if pointers == 0 {
        return Ok(lowered.target);
    }
    if desc.base == "void" {
        let levels = desc.indirection.level() + pointers;
        return Ok(format!("{}{OPAQUE_POINTER}", "*".repeat(levels - 1)));
    }
    Ok(format!("{}{}", "*".repeat(pointers), lowered.target))
}

/// Split a clause on the first space into type and name. A leading `const `
/// stays with the type.
fn split_clause(clause: &str) -> Result<(&str, &str)> {
    let skip = if clause.starts_with("const ") { 6 } else { 0 };
    let Some(pos) = clause[skip..].find(' ') else {
        anyhow::bail!("malformed native structure clause `{clause}`: expected `<type> <name>`");
    };
    let (ty, name) = clause.split_at(skip + pos);
    let (ty, name) = (ty.trim(), name.trim());
    if ty.is_empty() || name.is_empty() {
        anyhow::bail!("malformed native structure clause `{clause}`: expected `<type> <name>`");
    }
    Ok((ty, name))
}

/// `collisions[32]` → (`collisions`, Some(`32`)).
fn split_array(name: &str) -> Result<(&str, Option<&str>)> {
    let Some(open) = name.find('[') else {
        return Ok((name, None));
    };
    let Some(len) = name[open + 1..].strip_suffix(']') else {
        anyhow::bail!("unterminated array length in `{name}`");
    };
    Ok((name[..open].trim(), Some(len.trim())))
}

/// `rest` is the name after `(*`, e.g. `callback)(int a, void *ud)`.
fn lower_function_pointer(
    policy: &NamingPolicy,
    ret: &str,
    ret_pointers: usize,
    rest: &str,
) -> Result<StructField> {
    let Some((name, params)) = rest.split_once(')') else {
        anyhow::bail!("missing `)` after function pointer name");
    };
    let params = params.trim();
    let Some(params) = params
        .strip_prefix('(')
        .and_then(|p| p.strip_suffix(')'))
    else {
        anyhow::bail!("missing parameter list");
    };

    let mut lowered_params = Vec::new();
    for param in params.split(',').map(str::trim) {
        if param.is_empty() || param == "void" {
            continue;
        }
        lowered_params.push(lower_type(&param_type(param))?.target);
    }

    let ret = pointer_type(ret, ret_pointers)?;
    let mut signature = format!("func({})", lowered_params.join(", "));
    if !ret.is_empty() {
        signature.push(' ');
        signature.push_str(&ret);
    }

    Ok(StructField::Unsupported {
        name: policy.field_name(name.trim()),
        ty: signature,
    })
}

/// Drop a trailing parameter name, keeping any `*` markers attached to it.
fn param_type(param: &str) -> String {
    let tokens: Vec<&str> = param.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() && !rest.ends_with(&["const"]) => {
            let bare = last.trim_start_matches('*');
            let stars = &last[..last.len() - bare.len()];
            format!("{}{stars}", rest.join(" "))
        }
        _ => param.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::IdentContext;

    #[test]
    fn mixed_layout() {
        let fields =
            lower_struct_fields("int64_t a; void (*b)(int); Variant *c = nullptr;").unwrap();
        assert_eq!(
            fields,
            vec![
                StructField::Field {
                    name: "A".into(),
                    ty: "int64".into()
                },
                StructField::Unsupported {
                    name: "B".into(),
                    ty: "func(int64)".into()
                },
                StructField::Field {
                    name: "C".into(),
                    ty: "*Variant".into()
                },
            ]
        );
    }

    #[test]
    fn rendered_lines() {
        let out =
            native_structure_format_to_fields("int64_t a; void (*b)(int); Variant *c = nullptr;")
                .unwrap();
        assert_eq!(out, "A int64\n/* B func(int64) */\nC *Variant\n");
    }

    #[test]
    fn defaults_are_dropped_and_order_kept() {
        let out = native_structure_format_to_fields(
            "int start = -1;int end = -1;uint8_t count = 0;float x_off = 0.f;RID font_rid",
        )
        .unwrap();
        assert_eq!(
            out,
            "Start int64\nEnd int64\nCount uint8\nXOff float32\nFontRid RID\n"
        );
    }

    #[test]
    fn pointer_marker_adds_to_type_indirection() {
        let fields = lower_struct_fields("Object *collider;Object* owner;void *userdata").unwrap();
        let tys: Vec<String> = fields
            .iter()
            .map(|f| match f {
                StructField::Field { ty, .. } => ty.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(tys, ["*Object", "*Object", "unsafe.Pointer"]);
    }

    #[test]
    fn name_markers_stack_on_type_markers() {
        let out = native_structure_format_to_fields("void** *p;Object* *owner").unwrap();
        assert_eq!(out, "P **unsafe.Pointer\nOwner **Object\n");
    }

    #[test]
    fn function_pointer_returning_pointer() {
        let fields = lower_struct_fields("void *(*alloc)(int size);Object *(*get)(void)").unwrap();
        assert_eq!(
            fields,
            vec![
                StructField::Unsupported {
                    name: "Alloc".into(),
                    ty: "func(int64) unsafe.Pointer".into()
                },
                StructField::Unsupported {
                    name: "Get".into(),
                    ty: "func() *Object".into()
                },
            ]
        );
    }

    #[test]
    fn stray_parentheses_are_an_error() {
        let err = lower_struct_fields("int (count)").unwrap_err();
        assert!(format!("{err:#}").contains("(count)"), "got: {err:#}");
    }

    #[test]
    fn interior_empty_clause_is_an_error() {
        let err = lower_struct_fields("int a;;int b").unwrap_err();
        assert!(format!("{err:#}").contains("position 2"), "got: {err:#}");
        assert!(lower_struct_fields("int a; ;int b").is_err());

        let fields = lower_struct_fields("int a;int b;").unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn arrays_and_const_types() {
        let out = native_structure_format_to_fields(
            "PhysicsServer3DExtensionMotionCollision collisions[32];const Object *source",
        )
        .unwrap();
        assert_eq!(
            out,
            "Collisions [32]PhysicsServer3DExtensionMotionCollision\nSource *Object\n"
        );
    }

    #[test]
    fn function_pointer_signature() {
        let fields =
            lower_struct_fields("bool (*filter)(const Object *p_object, int p_mask, void *ud)")
                .unwrap();
        assert_eq!(
            fields,
            vec![StructField::Unsupported {
                name: "Filter".into(),
                ty: "func(*Object, int64, unsafe.Pointer) bool".into()
            }]
        );
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = lower_struct_fields("float left;floatright").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("floatright"), "got: {msg}");
    }

    #[test]
    fn bad_indirection_surfaces() {
        assert!(lower_struct_fields("void*** p").is_err());
    }

    #[test]
    fn field_names_follow_policy() {
        let fields = lower_struct_fields("Dictionary map").unwrap();
        assert_eq!(fields[0].name(), "Map");

        let policy = NamingPolicy {
            reserved_word_contexts: vec![IdentContext::Field],
        };
        let fields = lower_struct_fields_with(&policy, "Dictionary map").unwrap();
        assert_eq!(fields[0].name(), "ResourceMap");
    }
}
