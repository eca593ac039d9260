use std::{fs, process};

use clap::Parser;
use normform_cli::input::load;
use normform_cli::report::{CheckReport, NormalizeReport};
use normform_cli::{App, Command, Error, InputArgs, NormalizeArgs};
use normform_core::{highest_normal_form, normalize, rename_relations, NormalForm};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    let outcome = match &app.command {
        Command::Normalize(args) => run_normalize(args).map(|()| true),
        Command::Check(args) => run_check(args),
    };
    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_normalize(args: &NormalizeArgs) -> Result<(), Error> {
    let relation = load(&args.input)?;
    let target = NormalForm::from(args.target);
    let highest = args.highest.then(|| highest_normal_form(&relation));

    let result = normalize(relation, target)?;
    for rename in &args.rename {
        if !result.relations.iter().any(|r| r.name() == rename.from) {
            tracing::warn!(from = %rename.from, "no output relation to rename");
        }
    }
    let result = rename_relations(result, |relation| {
        args.rename
            .iter()
            .find(|rename| rename.from == relation.name())
            .map(|rename| rename.to.clone())
    });

    let report = NormalizeReport::new(target, &result, highest);
    let rendered = if args.json {
        serde_json::to_string_pretty(&report)? + "\n"
    } else {
        report.to_string()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            println!(
                "Wrote {} relations to {}",
                result.relations.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Returns whether the relation is in at least 1NF.
fn run_check(args: &InputArgs) -> Result<bool, Error> {
    let relation = load(args)?;
    let report = CheckReport::new(&relation);
    print!("{report}");
    Ok(report.passed())
}
