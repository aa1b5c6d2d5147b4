use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::fs;
use strata::engine;
use strata::field::TypeShape;
use strata::layout::Strategy;
use strata::record::RecordDef;
use strata::report;
use strata::resolve::{resolve, Substitution};

fn parse_strategy(s: &str) -> Result<Strategy, &'static str> {
    match s {
        "declaration" => Ok(Strategy::DeclarationOrder),
        "minimized" => Ok(Strategy::SizeMinimizing),
        _ => Err("expected \"declaration\" or \"minimized\""),
    }
}

// NAME=SIZExALIGN, e.g. T=4x4
fn parse_substitution(s: &str) -> Result<(String, TypeShape), String> {
    let invalid = || format!("invalid substitution {:?}, expected NAME=SIZExALIGN", s);

    let (name, shape) = s.split_once('=').ok_or_else(invalid)?;
    let (size, alignment) = shape.split_once('x').ok_or_else(invalid)?;

    let size: u64 = size.parse().map_err(|_| invalid())?;
    let alignment: u64 = alignment.parse().map_err(|_| invalid())?;

    Ok((name.to_string(), TypeShape::new(size, alignment)))
}

#[derive(ClapParser, Debug)]
struct Args {
    /// RON file containing the record definitions
    input_file: String,

    /// Lay records out with a single strategy instead of comparing both
    #[arg(short, long, value_parser = parse_strategy)]
    strategy: Option<Strategy>,

    /// Type parameter substitution, e.g. --set T=4x4 (size 4, alignment 4)
    #[arg(long = "set", value_parser = parse_substitution)]
    set: Vec<(String, TypeShape)>,
}

fn main() -> Result<()> {
    let args = Args::try_parse()?;

    let source = fs::read_to_string(&args.input_file)
        .with_context(|| format!("could not read {}", args.input_file))?;

    let records: Vec<RecordDef> = ron::from_str(&source)
        .with_context(|| format!("could not parse {}", args.input_file))?;

    let subst: Substitution = args.set.into_iter().collect();

    for record in &records {
        let fields = resolve(record, &subst)?;

        match args.strategy {
            Some(strategy) => {
                let layout = engine::compute(&fields, strategy)?;
                print!("{}", report::render_layout(&record.name, &layout));
            }
            None => {
                let comparison = engine::compare(&fields)?;
                print!("{}", report::render_comparison(&record.name, &comparison));
            }
        }

        println!();
    }

    Ok(())
}
