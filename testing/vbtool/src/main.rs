mod dictionary;
mod selftest;

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use dictionary::Dictionary;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use valuebox::{AttrValPair, EnumTable, FrType, Op, ValueBox};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Action {
    /// Parse text and print the value back
    Parse {
        ty: FrType,
        text: String,
        /// Quote character the text was enclosed in
        #[arg(short, long)]
        quote: Option<char>,
        /// Attribute whose aliases apply
        #[arg(short, long)]
        attr: Option<String>,
    },
    /// Parse text and dump its wire encoding
    Encode { ty: FrType, text: String },
    /// Decode hex wire bytes
    Decode { ty: FrType, hex: String },
    /// Parse text and cast it to another type
    Cast { ty: FrType, text: String, to: FrType },
    /// Compare two values of one type
    Cmp { ty: FrType, a: String, op: Op, b: String },
    /// Evaluate `Attr op value` against a candidate
    Eval {
        expr: String,
        candidate: String,
        /// Type of the attribute if the dictionary does not know it
        #[arg(short, long)]
        ty: Option<FrType>,
    },
    /// Run the built-in checks
    Selftest,
}

#[derive(Parser, Debug)]
struct Args {
    /// Enumeration dictionary (YAML)
    #[arg(short, long, env = "VBTOOL_DICT_FILE")]
    dict: Option<PathBuf>,
    /// Quote strings when printing results
    #[arg(short = 'Q', long)]
    print_quote: Option<char>,
    #[command(subcommand)]
    action: Action,
}

fn quote_byte(quote: Option<char>) -> Result<Option<u8>> {
    quote
        .map(|q| u8::try_from(q).ok().filter(u8::is_ascii).ok_or_else(|| anyhow!("Quote must be ASCII, got {q:?}")))
        .transpose()
}

fn parse_value(ty: FrType, enumv: Option<&Arc<EnumTable>>, text: &str, quote: Option<u8>) -> Result<ValueBox> {
    let mut ty = ty;
    ValueBox::from_str(&mut ty, enumv, text.as_bytes(), quote, false).with_context(|| format!("Failed to parse {text:?}"))
}

fn run(args: Args) -> Result<()> {
    let dict = match &args.dict {
        Some(path) => Dictionary::load(path)?,
        None => Dictionary::default(),
    };
    let pq = quote_byte(args.print_quote)?;

    match args.action {
        Action::Parse { ty, text, quote, attr } => {
            let enumv = match &attr {
                Some(a) => Some(dict.get(a).ok_or_else(|| anyhow!("Attribute {a} not in dictionary"))?),
                None => None,
            };
            let value = parse_value(ty, enumv, &text, quote_byte(quote)?)?;
            println!("{} {}", value.ty(), value.asprint(pq));
        }
        Action::Encode { ty, text } => {
            let value = parse_value(ty, None, &text, None)?;
            let mut wire = vec![0u8; value.network_length()];
            let enc = value.to_network(&mut wire)?;
            info!(ty = %value.ty(), written = enc.written, "encoded");
            hexdump::hexdump(&wire[..enc.written]);
        }
        Action::Decode { ty, hex } => {
            let hex = if hex.starts_with("0x") || hex.starts_with("0X") { hex } else { format!("0x{hex}") };
            let bytes = parse_value(FrType::Octets, None, &hex, None)?;
            let value = ValueBox::from_network(bytes.as_bytes().unwrap_or_default(), ty, true)?;
            println!("{} {}", value.ty(), value.asprint(pq));
        }
        Action::Cast { ty, text, to } => {
            let value = parse_value(ty, None, &text, None)?;
            let cast = value.cast(to, None)?;
            println!("{} {}", cast.ty(), cast.asprint(pq));
        }
        Action::Cmp { ty, a, op, b } => {
            let a = parse_value(ty, None, &a, None)?;
            let b = parse_value(ty, None, &b, None)?;
            println!("{}", ValueBox::compare_op(op, &a, &b)?);
        }
        Action::Eval { expr, candidate, ty } => {
            let pair = AttrValPair::parse(&expr)?;
            let enumv = dict.get(pair.attribute);
            let ty = match (ty, enumv) {
                (Some(ty), _) => ty,
                (None, Some(table)) => table.ty(),
                (None, None) => bail!("Type of {} unknown, pass --ty", pair.attribute),
            };
            let candidate = parse_value(ty, enumv, &candidate, None)?;
            println!("{}", pair.matches(&candidate, enumv)?);
        }
        Action::Selftest => {
            let mut stdout = std::io::stdout().lock();
            if !selftest::run(&mut stdout)? {
                bail!("selftest failed");
            }
        }
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    match run(Args::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
