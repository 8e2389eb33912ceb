use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use rvv_lower::lower::const_positions;
use rvv_lower::op::{ResolutionTable, TransformKind};

#[derive(Parser)]
#[command(name = "rvv-lower")]
#[command(about = "Vector builtin lowering resolver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a builtin name to its canonical operation.
    Resolve {
        #[arg(help = "Builtin name, e.g. vadd_vx_i8m2_m")]
        name: String,

        #[arg(long, help = "Emit JSON instead of text")]
        json: bool,
    },
    /// List builtins handled by the resolver.
    List {
        #[arg(short, long, help = "Only builtins of this base operation, e.g. vadd")]
        base: Option<String>,

        #[arg(long, help = "Only masked variants")]
        masked: bool,

        #[arg(short, long, help = "Print the count instead of the names")]
        count: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let table = ResolutionTable::build();

    match cli.command {
        Commands::Resolve { name, json } => resolve(&table, &name, json),
        Commands::List {
            base,
            masked,
            count,
        } => {
            list(&table, base.as_deref(), masked, count);
            Ok(())
        }
    }
}

fn resolve(table: &ResolutionTable, name: &str, json: bool) -> Result<()> {
    let Some(info) = table.lookup_name(name).and_then(|id| table.builtin(id)) else {
        bail!("`{name}` is not handled by the vector builtin resolver");
    };
    let canonical = table.canonical_op(info.entry.canonical);
    let const_mask = const_positions(info)?;

    let constant_positions: Vec<usize> = (0..info.signature.arity())
        .filter(|i| const_mask & (1 << i) != 0)
        .collect();

    if json {
        let transforms: Vec<serde_json::Value> = info
            .entry
            .transforms
            .iter()
            .map(|t| {
                let TransformKind::WidenScalar { from } = t.kind;
                serde_json::json!({
                    "operand": t.index,
                    "widen_from_bits": from.bits(),
                })
            })
            .collect();
        let value = serde_json::json!({
            "builtin": info.name,
            "canonical": canonical.name,
            "signature": info
                .signature
                .params
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>(),
            "constant_positions": constant_positions,
            "transforms": transforms,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("builtin:    {}", info.name);
    println!("canonical:  {}", canonical.name);
    let params: Vec<&str> = info.signature.params.iter().map(|p| p.name()).collect();
    println!("signature:  {}", params.join(", "));
    if constant_positions.is_empty() {
        println!("constants:  (none)");
    } else {
        let positions: Vec<String> = constant_positions
            .iter()
            .map(|i| format!("argument {i}"))
            .collect();
        println!("constants:  {}", positions.join(", "));
    }
    if info.entry.transforms.is_empty() {
        println!("transforms: (none)");
    } else {
        for t in &info.entry.transforms {
            let TransformKind::WidenScalar { from } = t.kind;
            println!(
                "transforms: operand {}: widen scalar from {} bits",
                t.index,
                from.bits()
            );
        }
    }
    Ok(())
}

fn list(table: &ResolutionTable, base: Option<&str>, masked_only: bool, count_only: bool) {
    let mut matched = 0usize;
    for (_, info) in table.iter() {
        if base.is_some_and(|b| b != info.base) {
            continue;
        }
        if masked_only && !info.form.is_some_and(|f| f.masked) {
            continue;
        }
        matched += 1;
        if !count_only {
            let canonical = table.canonical_op(info.entry.canonical);
            println!("{} -> {}", info.name, canonical.name);
        }
    }
    if count_only {
        println!("{matched}");
    }
}
