//! gdx-lower — native engine API → Go binding identifiers and types.
//!
//! The lowering passes are pure string mappings, safe to call from any
//! thread:
//!
//! - [`naming`]: raw names → Go identifiers (camel, Pascal, screaming snake),
//!   with reserved-word substitution.
//! - [`lower`]: type descriptors such as `const Object*` → Go types, plus
//!   whether the value needs an encoder at the native boundary.
//! - [`variant`]: the `Variant` constructor for a native type.
//! - [`fields`]: native structure layouts → struct field declarations.
//! - [`operator`]: operator tokens → method name fragments.
//! - [`copy`]: copy-semantics predicates.
//!
//! # Quick start
//!
//! ```
//! let t = gdx_lower::lower::lower_type("const uint64_t**").unwrap();
//! assert_eq!(t.target, "**uint64");
//! assert_eq!(gdx_lower::naming::method_name("_ready"), "Internal_Ready");
//! ```
//!
//! The crate also ships a small batch driver: given a `gdx-lower.toml`
//! listing native structures and class enums, [`run`] writes one Go file.
//!
//! ```no_run
//! use std::path::Path;
//!
//! gdx_lower::run(Path::new("gdx-lower.toml"), None).unwrap();
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub mod config;
pub mod copy;
pub mod fields;
pub mod lower;
pub mod model;
pub mod naming;
pub mod operator;
pub mod variant;

/// Header line marking the output as generated.
pub const GENERATED_HEADER: &str = "// Code generated by gdx-lower. DO NOT EDIT.";

/// Run the full pipeline: load config, lower every configured declaration,
/// and write the Go file.
///
/// `config_path` is the path to a `gdx-lower.toml` configuration file.
/// `output` optionally overrides the output file path from the config.
///
/// Returns the path the file was written to.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let source = generate_from_config(&cfg)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => base_dir.join(&cfg.output.file),
    };
    std::fs::write(&output_path, &source)
        .with_context(|| format!("writing output to {}", output_path.display()))?;

    info!(
        path = %output_path.display(),
        size = source.len(),
        "wrote go source"
    );

    Ok(output_path)
}

/// Parse a `gdx-lower.toml` config file and return the generated Go source
/// without writing to disk.
pub fn generate(config_path: &Path) -> Result<String> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    generate_from_config(&cfg)
}

/// Generate Go source from an already-loaded [`config::Config`].
pub fn generate_from_config(cfg: &config::Config) -> Result<String> {
    info!(
        package = %cfg.output.package,
        structures = cfg.native_structure.len(),
        enums = cfg.class_enum.len(),
        "loaded configuration"
    );

    validate_unique_names(cfg)?;

    let mut out = String::new();
    writeln!(out, "{GENERATED_HEADER}\n")?;
    writeln!(out, "package {}", cfg.output.package)?;

    for s in &cfg.native_structure {
        emit_native_structure(&mut out, cfg, s)
            .with_context(|| format!("native structure `{}`", s.name))?;
    }

    for en in &cfg.class_enum {
        emit_class_enum(&mut out, en)
            .with_context(|| format!("enum `{}.{}`", en.class, en.name))?;
    }

    info!(size = out.len(), "generated go source");
    Ok(out)
}

// ---------------------------------------------------------------------------
// Emission
// ---------------------------------------------------------------------------

fn emit_native_structure(
    out: &mut String,
    cfg: &config::Config,
    s: &config::NativeStructureConfig,
) -> Result<()> {
    let fields = fields::lower_struct_fields_with(&cfg.naming, &s.format)?;

    writeln!(out, "\ntype {} struct {{", naming::to_camel(&s.name))?;
    for field in &fields {
        writeln!(out, "\t{field}")?;
    }
    writeln!(out, "}}")?;

    debug!(name = %s.name, fields = fields.len(), "emitted native structure");
    Ok(())
}

fn emit_class_enum(out: &mut String, en: &config::ClassEnumConfig) -> Result<()> {
    let type_name = lower::argument_type(&format!("enum::{}.{}", en.class, en.name))?;

    writeln!(out, "\ntype {type_name} int64")?;
    if en.values.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nconst (")?;
    for v in &en.values {
        let name = naming::class_enum_name(&en.class, &en.name, &v.name);
        writeln!(out, "\t{name} {type_name} = {}", v.value)?;
    }
    writeln!(out, ")")?;

    debug!(name = %type_name, values = en.values.len(), "emitted class enum");
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Two declarations lowering to the same Go name would not compile; report
/// all collisions at once.
fn validate_unique_names(cfg: &config::Config) -> Result<()> {
    let mut seen = HashSet::new();
    let mut collisions = Vec::new();

    let structs = cfg
        .native_structure
        .iter()
        .map(|s| (naming::to_camel(&s.name), s.name.clone()));
    let constants = cfg.class_enum.iter().flat_map(|en| {
        en.values.iter().map(|v| {
            (
                naming::class_enum_name(&en.class, &en.name, &v.name),
                format!("{}.{}.{}", en.class, en.name, v.name),
            )
        })
    });

    for (lowered, raw) in structs.chain(constants) {
        if !seen.insert(lowered.clone()) {
            collisions.push((lowered, raw));
        }
    }

    if collisions.is_empty() {
        return Ok(());
    }

    let mut msg = format!("{} duplicate generated name(s):\n", collisions.len());
    for (lowered, raw) in &collisions {
        msg.push_str(&format!("\n  • `{lowered}` — from `{raw}`"));
    }
    anyhow::bail!("{msg}");
}
