//! CLI entry point for gdx-lower.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use gdx_lower::model::{ClassConstructor, ConstructorArgument};
use gdx_lower::naming::IdentContext;
use gdx_lower::{copy, fields, lower, naming, operator, variant};

/// gdx-lower — lower native engine API names and types into Go syntax.
#[derive(Parser, Debug)]
#[command(name = "gdx-lower", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a Go file from a gdx-lower.toml configuration.
    Generate {
        /// Path to the gdx-lower.toml configuration file.
        #[arg(default_value = "gdx-lower.toml")]
        config: PathBuf,

        /// Output file path (overrides config).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lower a type descriptor and report whether it needs an encoder.
    Type { descriptor: String },
    /// Format an identifier for a context.
    Ident {
        raw: String,
        #[arg(long, value_enum, default_value_t = Context::Argument)]
        context: Context,
        /// Config file supplying the naming policy.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Format a method name.
    Method { raw: String },
    /// Screaming-snake constant for a class enum value.
    EnumConstant {
        class: String,
        #[arg(value_name = "ENUM")]
        enum_name: String,
        constant: String,
    },
    /// Lower a native structure layout to field declarations.
    Struct { layout: String },
    /// Name fragment for an operator token.
    Operator { token: String },
    /// Variant constructor call for a native type and expression.
    Variant { native_type: String, expr: String },
    /// Copy semantics of a type, optionally checking a constructor signature.
    Copy {
        type_name: String,
        /// Constructor argument types, in order.
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Context {
    Argument,
    Field,
    Local,
}

impl From<Context> for IdentContext {
    fn from(c: Context) -> Self {
        match c {
            Context::Argument => IdentContext::Argument,
            Context::Field => IdentContext::Field,
            Context::Local => IdentContext::Local,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gdx_lower=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { config, output } => {
            gdx_lower::run(&config, output.as_deref())?;
        }
        Command::Type { descriptor } => {
            let t = lower::lower_type(&descriptor)?;
            println!("{}\t{}", t.target, t.needs_encoder);
        }
        Command::Ident {
            raw,
            context,
            config,
        } => {
            let policy = match config {
                Some(path) => gdx_lower::config::load_config(&path)?.naming,
                None => naming::default_policy().clone(),
            };
            println!("{}", policy.format(&raw, context.into()));
        }
        Command::Method { raw } => println!("{}", naming::method_name(&raw)),
        Command::EnumConstant {
            class,
            enum_name,
            constant,
        } => println!("{}", naming::class_enum_name(&class, &enum_name, &constant)),
        Command::Struct { layout } => {
            print!("{}", fields::native_structure_format_to_fields(&layout)?);
        }
        Command::Operator { token } => println!("{}", operator::operator_id_name(&token)?),
        Command::Variant { native_type, expr } => {
            println!("{}", variant::variant_constructor(&native_type, &expr));
        }
        Command::Copy { type_name, args } => {
            let ctor = ClassConstructor {
                arguments: args
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| ConstructorArgument::new(&format!("arg{i}"), ty))
                    .collect(),
            };
            println!(
                "requires_copy={} copy_constructor={}",
                copy::requires_copy(&type_name),
                copy::is_copy_constructor(&type_name, &ctor)
            );
        }
    }
    Ok(())
}
