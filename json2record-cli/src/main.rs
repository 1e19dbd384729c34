mod demo;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use json2record_lib::*;
use std::fs;
use std::io::{self, Write};
use tracing::info;

fn main() -> Result<()> {
    setup_tracing();

    let matches = cli().get_matches();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("validate", sub)) => run_validate(sub, &mut out),
        Some(("describe", sub)) => run_describe(sub, &mut out),
        Some(("demo", _)) => demo::run(&mut out),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn shape_arg() -> Arg {
    Arg::new("shape")
        .short('s')
        .long("shape")
        .value_name("SHAPE")
        .help("Record shape to validate against")
        .value_parser(ShapeName::names())
        .required(true)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_name("FORMAT")
        .help("Output format")
        .value_parser(["text", "json"])
        .default_value("text")
}

fn cli() -> Command {
    Command::new("json2record")
        .version("0.1.0")
        .about("Validate loosely-typed JSON mappings against typed record shapes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("validate")
                .about("Build a record from a mapping and print it")
                .arg(shape_arg())
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("Input JSON file (stdin if neither this nor --set is given)")
                        .conflicts_with("set"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .value_name("KEY=VALUE")
                        .help("Field assignment; can be specified multiple times")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("on-error")
                        .long("on-error")
                        .value_name("POLICY")
                        .help("recover: print the diagnostic and exit 0; abort: fail with exit status 1")
                        .value_parser(["recover", "abort"])
                        .default_value("abort"),
                )
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help("Stop at the first validation issue")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("forbid-extra")
                        .long("forbid-extra")
                        .help("Reject keys the shape does not declare")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("describe")
                .about("Print a shape's declaration")
                .arg(shape_arg())
                .arg(format_arg()),
        )
        .subcommand(Command::new("demo").about("Run the built-in walkthroughs"))
}

fn selected_shape(matches: &ArgMatches) -> Result<ShapeName> {
    let name = matches
        .get_one::<String>("shape")
        .context("missing --shape")?;
    Ok(name.parse()?)
}

fn is_json(matches: &ArgMatches) -> bool {
    matches.get_one::<String>("format").map(String::as_str) == Some("json")
}

fn run_validate<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<()> {
    let shape = selected_shape(matches)?;
    let policy: ErrorPolicy = matches
        .get_one::<String>("on-error")
        .map_or(Ok(ErrorPolicy::default()), |name| name.parse())?;

    let mut options = ValidationOptions::default();
    if matches.get_flag("fail-fast") {
        options.strategy = Strategy::FailFast;
    }
    if matches.get_flag("forbid-extra") {
        options.extra = ExtraFields::Forbid;
    }

    let value = if let Some(path) = matches.get_one::<String>("input") {
        info!(path = %path, "reading input file");
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        parse_input(&text)?
    } else if let Some(pairs) = matches.get_many::<String>("set") {
        let pairs: Vec<&String> = pairs.collect();
        parse_assignments(&pairs)?
    } else {
        info!("reading input from stdin");
        read_input(io::stdin().lock())?
    };

    info!(shape = %shape, "validating");
    let result = shape.validate(&value, &options);

    if is_json(matches) {
        return match result {
            Ok(record) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
                Ok(())
            }
            Err(errors) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&errors.to_json())?)?;
                match policy {
                    ErrorPolicy::Recover => Ok(()),
                    ErrorPolicy::Abort => Err(Json2RecordError::from(errors).into()),
                }
            }
        };
    }

    if let Some(record) = apply_policy(policy, result, out)? {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

fn run_describe<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<()> {
    let shape = selected_shape(matches)?;
    let schema = shape.schema();

    if is_json(matches) {
        writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    } else {
        write!(out, "{}", generate_declaration(&schema))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<String> {
        let matches = cli().try_get_matches_from(args)?;
        let mut out = Vec::new();
        match matches.subcommand() {
            Some(("validate", sub)) => run_validate(sub, &mut out)?,
            Some(("describe", sub)) => run_describe(sub, &mut out)?,
            Some(("demo", _)) => demo::run(&mut out)?,
            _ => unreachable!(),
        }
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_validate_from_assignments() {
        let out = run(&[
            "json2record", "validate", "-s", "user",
            "--set", "name=Alice", "--set", "age=30", "--set", "email=alice@example.com",
        ])
        .unwrap();
        assert_eq!(out, "User(name=\"Alice\", age=30, email=\"alice@example.com\")\n");
    }

    #[test]
    fn test_validate_recover_prints_diagnostic() {
        let out = run(&[
            "json2record", "validate", "-s", "verified-user", "--on-error", "recover",
            "--set", "name=Alice", "--set", "age=30", "--set", "email=not-an-email",
        ])
        .unwrap();
        assert!(out.starts_with("Validation error: 1 validation error for VerifiedUser\nemail\n"));
    }

    #[test]
    fn test_validate_abort_returns_error() {
        let err = run(&[
            "json2record", "validate", "-s", "user", "--set", "name=Alice",
        ])
        .unwrap_err();
        let errors = err.downcast_ref::<Json2RecordError>().unwrap();
        assert!(matches!(errors, Json2RecordError::Validation(e) if e.len() == 2));
    }

    #[test]
    fn test_validate_json_format_reports_failures_as_json() {
        let out = run(&[
            "json2record", "validate", "-s", "product", "-f", "json", "--on-error", "recover",
            "--set", "name=Pen", "--set", "price=nan",
        ])
        .unwrap();
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["title"], "Product");
        assert_eq!(report["errors"][0]["path"], "price");
        assert_eq!(report["errors"][0]["type"], "finite_number");
        assert_eq!(report["errors"][1]["type"], "missing");
    }

    #[test]
    fn test_describe_text() {
        let out = run(&["json2record", "describe", "-s", "product"]).unwrap();
        assert!(out.contains("tag_line: optional<text> = null,"));
    }

    #[test]
    fn test_unknown_shape_rejected_by_parser() {
        assert!(cli()
            .try_get_matches_from(["json2record", "describe", "-s", "order"])
            .is_err());
    }
}
