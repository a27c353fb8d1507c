//! Copy-semantics predicates for builtin types and constructors.

use crate::model::ClassConstructor;

/// Types whose assignment must produce an independent copy; the native
/// destructor releases shared storage, so aliasing is unsound.
const COPY_REQUIRED: &[&str] = &["Dictionary"];

/// Whether assigning a value of `type_name` must copy instead of move.
pub fn requires_copy(type_name: &str) -> bool {
    COPY_REQUIRED.contains(&type_name)
}

/// Whether `ctor` is the copy constructor of `type_name`: a single argument
/// whose raw type is exactly the owning type.
pub fn is_copy_constructor(type_name: &str, ctor: &ClassConstructor) -> bool {
    matches!(ctor.arguments.as_slice(), [only] if only.ty == type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstructorArgument;

    fn ctor(types: &[&str]) -> ClassConstructor {
        ClassConstructor {
            arguments: types
                .iter()
                .map(|t| ConstructorArgument::new("from", t))
                .collect(),
        }
    }

    #[test]
    fn copy_required_set() {
        assert!(requires_copy("Dictionary"));
        assert!(!requires_copy("Vector3"));
        assert!(!requires_copy("dictionary"));
    }

    #[test]
    fn copy_constructor_detection() {
        assert!(is_copy_constructor("Dictionary", &ctor(&["Dictionary"])));
        assert!(!is_copy_constructor(
            "Dictionary",
            &ctor(&["Dictionary", "int"])
        ));
        assert!(!is_copy_constructor("Dictionary", &ctor(&[])));
        assert!(!is_copy_constructor("Vector2", &ctor(&["Vector2i"])));
    }

    #[test]
    fn copy_constructor_compares_raw_descriptors() {
        assert!(!is_copy_constructor("Dictionary", &ctor(&["const Dictionary"])));
    }
}
