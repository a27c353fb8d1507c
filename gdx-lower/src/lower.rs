//! Type lowering — native type descriptors → Go type text.
//!
//! Every public entry point goes through [`decompose`] so the lowered type
//! and its encoder flag are always derived from the same stripped base name.

use anyhow::Result;
use tracing::trace;

use crate::model::{Indirection, LoweredType, Qualifier, TypeDescriptor};
use crate::naming::to_camel;

/// Go type for an untyped native pointer.
pub const OPAQUE_POINTER: &str = "unsafe.Pointer";

/// Split a descriptor into qualifier, indirection and base name.
///
/// At most one qualifier is stripped, checked in [`Qualifier::ALL`] order.
/// More than two trailing `*` markers is a schema error.
pub fn decompose(descriptor: &str) -> Result<TypeDescriptor<'_>> {
    let mut rest = descriptor;
    let mut qualifier = None;
    for q in Qualifier::ALL {
        if let Some(stripped) = rest.strip_prefix(q.prefix()) {
            rest = stripped;
            qualifier = Some(q);
            break;
        }
    }

    // Markers may be separated by whitespace: `Object * *`.
    let mut base = rest.trim_end();
    let mut stars = 0;
    while let Some(stripped) = base.strip_suffix('*') {
        stars += 1;
        base = stripped.trim_end();
    }
    let Some(indirection) = Indirection::from_count(stars) else {
        anyhow::bail!(
            "unexpected pointer indirection in type `{descriptor}`: {stars} levels (at most 2 supported)"
        );
    };

    Ok(TypeDescriptor {
        qualifier,
        indirection,
        base: base.trim(),
    })
}

/// Lower a native type descriptor to its Go type and encoder requirement.
pub fn lower_type(descriptor: &str) -> Result<LoweredType> {
    let desc = decompose(descriptor)?;
    let lowered = lower_descriptor(&desc);
    trace!(
        descriptor,
        base = desc.base,
        level = desc.indirection.level(),
        target = %lowered.target,
        needs_encoder = lowered.needs_encoder,
        "lowered type"
    );
    Ok(lowered)
}

/// Lower an already decomposed descriptor.
pub fn lower_descriptor(desc: &TypeDescriptor<'_>) -> LoweredType {
    let markers = desc.indirection.markers();
    let encoded = |name: &str| LoweredType::encoded(format!("{markers}{name}"));

    match desc.base {
        "void" => match desc.indirection {
            Indirection::Value => LoweredType::raw(""),
            Indirection::Pointer => LoweredType::raw(OPAQUE_POINTER),
            Indirection::PointerToPointer => LoweredType::raw(format!("*{OPAQUE_POINTER}")),
        },
        "" => LoweredType::raw(markers),
        "Vector2i" | "Vector3i" | "Vector4i" | "Rect2i" => encoded(desc.base),
        "float" | "real_t" => encoded("float32"),
        "double" => encoded("float64"),
        "int" => encoded("int64"),
        "uint64_t" => encoded("uint64"),
        "int8_t" => encoded("int8"),
        "int16_t" => encoded("int16"),
        "int32_t" => encoded("int32"),
        "int64_t" => encoded("int64"),
        "uint8_t" => encoded("uint8"),
        "uint16_t" => encoded("uint16"),
        "uint32_t" => encoded("uint32"),
        "bool" => encoded("bool"),
        "String" => encoded("String"),
        "Nil" => encoded("Variant"),
        // Engine classes and builtin types without a special mapping.
        other => encoded(&to_camel(other)),
    }
}

/// Go type text for an argument of the given native type.
pub fn argument_type(descriptor: &str) -> Result<String> {
    Ok(lower_type(descriptor)?.target)
}

/// Go type text for a return value. Empty for `void`.
pub fn return_type(descriptor: &str) -> Result<String> {
    argument_type(descriptor)
}

/// Whether values of the given native type pass through an encoder when
/// crossing the native boundary.
pub fn has_argument_type_encoder(descriptor: &str) -> Result<bool> {
    Ok(lower_type(descriptor)?.needs_encoder)
}

/// Whether a builtin of this name is handled through a pointer in generated
/// method bodies. Scalars and `Object` are passed directly.
pub fn type_has_ptr(name: &str) -> bool {
    !matches!(name, "float" | "int" | "Object")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowered(d: &str) -> (String, bool) {
        let t = lower_type(d).unwrap();
        (t.target, t.needs_encoder)
    }

    #[test]
    fn decompose_strips_one_qualifier() {
        let d = decompose("enum::Node.ProcessMode").unwrap();
        assert_eq!(d.qualifier, Some(Qualifier::Enum));
        assert_eq!(d.base, "Node.ProcessMode");

        let d = decompose("const uint64_t**").unwrap();
        assert_eq!(d.qualifier, Some(Qualifier::Const));
        assert_eq!(d.indirection, Indirection::PointerToPointer);
        assert_eq!(d.base, "uint64_t");

        // Only the first matching qualifier is removed.
        let d = decompose("enum::const Foo").unwrap();
        assert_eq!(d.base, "const Foo");
    }

    #[test]
    fn decompose_trims_around_markers() {
        let d = decompose("const Object *").unwrap();
        assert_eq!(d.indirection, Indirection::Pointer);
        assert_eq!(d.base, "Object");
    }

    #[test]
    fn spaced_markers_all_count() {
        let d = decompose("Object * *").unwrap();
        assert_eq!(d.indirection, Indirection::PointerToPointer);
        assert_eq!(d.base, "Object");
        assert_eq!(lowered("Object * *"), ("**Object".into(), true));
        assert!(lower_type("void * * *").is_err());
    }

    #[test]
    fn base_is_stable_under_redecomposition() {
        for d in [
            "enum::Node.ProcessMode",
            "const uint64_t**",
            "bitfieldMethodFlags",
            "void*",
            "const Object *",
            "Vector3",
            "",
        ] {
            let first = decompose(d).unwrap();
            let again = decompose(first.base).unwrap();
            assert_eq!(again.base, first.base, "descriptor {d:?}");
            assert_eq!(again.indirection, Indirection::Value);
            assert_eq!(again.qualifier, None);
        }
    }

    #[test]
    fn void_levels() {
        assert_eq!(lowered("void"), (String::new(), false));
        assert_eq!(lowered("void*"), ("unsafe.Pointer".into(), false));
        assert_eq!(lowered("void**"), ("*unsafe.Pointer".into(), false));
        assert_eq!(lowered("const void*"), ("unsafe.Pointer".into(), false));
    }

    #[test]
    fn three_levels_are_fatal() {
        let err = lower_type("void***").unwrap_err();
        assert!(format!("{err:#}").contains("void***"), "got: {err:#}");
        assert!(lower_type("int***").is_err());
    }

    #[test]
    fn builtin_table() {
        assert_eq!(lowered("float"), ("float32".into(), true));
        assert_eq!(lowered("real_t"), ("float32".into(), true));
        assert_eq!(lowered("double"), ("float64".into(), true));
        assert_eq!(lowered("int"), ("int64".into(), true));
        assert_eq!(lowered("int64_t"), ("int64".into(), true));
        assert_eq!(lowered("bool"), ("bool".into(), true));
        assert_eq!(lowered("String"), ("String".into(), true));
        assert_eq!(lowered("Nil"), ("Variant".into(), true));
        assert_eq!(lowered("Vector2i"), ("Vector2i".into(), true));
        assert_eq!(lowered("Rect2i"), ("Rect2i".into(), true));
        assert_eq!(lowered(""), (String::new(), false));
    }

    #[test]
    fn const_double_pointer_to_uint64() {
        assert_eq!(lowered("const uint64_t**"), ("**uint64".into(), true));
    }

    #[test]
    fn class_types_fall_through_to_pascal_case() {
        assert_eq!(lowered("bitfieldSomeFlags"), ("SomeFlags".into(), true));
        assert_eq!(
            lowered("enum::Node.ProcessMode"),
            ("NodeProcessMode".into(), true)
        );
        assert_eq!(lowered("Object*"), ("*Object".into(), true));
        assert_eq!(lowered("AudioFrame"), ("AudioFrame".into(), true));
    }

    #[test]
    fn type_and_encoder_agree() {
        for d in ["void*", "const Node*", "enum::Error", "", "float", "void"] {
            let t = lower_type(d).unwrap();
            assert_eq!(argument_type(d).unwrap(), t.target);
            assert_eq!(return_type(d).unwrap(), t.target);
            assert_eq!(has_argument_type_encoder(d).unwrap(), t.needs_encoder);
        }
    }

    #[test]
    fn pointer_classification() {
        assert!(!type_has_ptr("float"));
        assert!(!type_has_ptr("int"));
        assert!(!type_has_ptr("Object"));
        assert!(type_has_ptr("Vector3"));
    }
}
