//! # Kalorienrechner CLI
//!
//! Terminal front end for `kcal_core`. Values not passed as flags are asked
//! for interactively; invalid answers show the form message and are asked
//! again.
//!
//! ```bash
//! kalorienrechner --geschlecht mann --alter 30 --groesse 180 --gewicht 80 --aktivitaet 2 --ziel 0
//! kalorienrechner berechnen --alter 30 --groesse 180 --gewicht 80,5 --json --herleitung
//! kalorienrechner stufen
//! kalorienrechner referenz --alter 40
//! kalorienrechner formeln
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kcal_core::config::DEFAULT_CONFIG;
use kcal_core::equations::{derive, equations_markdown, DerivationStep};
use kcal_core::format::trimmed_decimal;
use kcal_core::reference::{render_table, row_for_age, REFERENCE_PAL, REFERENCE_TABLE};
use kcal_core::report::render_text;
use kcal_core::{
    calculate_with, ActivityLevel, CalcError, CalcResult, CalorieResult, EngineConfig, Goal, RawInput,
    UserInput,
};

#[derive(Parser, Debug)]
#[command(
    name = "kalorienrechner",
    version,
    about = "Täglicher Kalorienbedarf nach Mifflin-St. Jeor",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // flags for the default `berechnen` command
    #[command(flatten)]
    calc: CalcArgs,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Kalorienbedarf berechnen (Standard)
    Berechnen(CalcArgs),

    /// Aktivitätsstufen und Ziele mit ihren Nummern auflisten
    Stufen,

    /// Durchschnittlicher Bedarf nach Altersgruppe
    Referenz {
        /// Nur die Zeile für dieses Alter zeigen
        #[arg(long)]
        alter: Option<u32>,
    },

    /// Alle Formeln mit Quellen (Markdown)
    Formeln,
}

#[derive(Args, Debug, Clone, Default)]
struct CalcArgs {
    /// mann oder frau
    #[arg(long)]
    geschlecht: Option<String>,

    /// Alter in Jahren (10–120)
    #[arg(long)]
    alter: Option<String>,

    /// Größe in cm (100–250)
    #[arg(long)]
    groesse: Option<String>,

    /// Gewicht in kg (30–300), Komma oder Punkt
    #[arg(long)]
    gewicht: Option<String>,

    /// Aktivitätsstufe 0–4 (siehe `stufen`)
    #[arg(long)]
    aktivitaet: Option<String>,

    /// Ziel 0–2 (siehe `stufen`)
    #[arg(long)]
    ziel: Option<String>,

    /// Ergebnis als JSON ausgeben
    #[arg(long)]
    json: bool,

    /// Rechenweg mit eingesetzten Werten ausgeben
    #[arg(long)]
    herleitung: bool,

    /// Engine-Konfiguration aus JSON-Datei laden
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl CalcArgs {
    fn to_raw(&self) -> RawInput {
        RawInput {
            sex: self.geschlecht.clone(),
            age: self.alter.clone(),
            height: self.groesse.clone(),
            weight: self.gewicht.clone(),
            activity_level: self.aktivitaet.clone(),
            goal: self.ziel.clone(),
        }
    }
}

/// A form field the CLI can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Sex,
    Age,
    Height,
    Weight,
    ActivityLevel,
    Goal,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::Sex,
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::ActivityLevel,
        Field::Goal,
    ];

    /// Map a `CalcError::field()` name back to the field
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sex" => Some(Field::Sex),
            "age" => Some(Field::Age),
            "height" => Some(Field::Height),
            "weight" => Some(Field::Weight),
            "activity_level" => Some(Field::ActivityLevel),
            "goal" => Some(Field::Goal),
            _ => None,
        }
    }

    fn prompt(self) -> String {
        match self {
            Field::Sex => "Geschlecht (mann/frau) [mann]: ".to_string(),
            Field::Age => "Alter (Jahre): ".to_string(),
            Field::Height => "Größe (cm): ".to_string(),
            Field::Weight => "Gewicht (kg): ".to_string(),
            Field::ActivityLevel => format!(
                "Aktivitätsstufe (0–{}) [{}]: ",
                ActivityLevel::ALL.len() - 1,
                ActivityLevel::DEFAULT_INDEX
            ),
            Field::Goal => format!("Ziel (0–{}) [{}]: ", Goal::ALL.len() - 1, Goal::DEFAULT_INDEX),
        }
    }

    /// Selectors have a default, so an empty answer leaves them unset
    fn has_default(self) -> bool {
        matches!(self, Field::Sex | Field::ActivityLevel | Field::Goal)
    }

    fn slot(self, raw: &mut RawInput) -> &mut Option<String> {
        match self {
            Field::Sex => &mut raw.sex,
            Field::Age => &mut raw.age,
            Field::Height => &mut raw.height,
            Field::Weight => &mut raw.weight,
            Field::ActivityLevel => &mut raw.activity_level,
            Field::Goal => &mut raw.goal,
        }
    }
}

/// Write a prompt and read one trimmed line; `None` at end of input.
fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numeric fields missing from the command line, in form order
fn missing_fields(raw: &mut RawInput) -> Vec<Field> {
    Field::ORDER
        .into_iter()
        .filter(|field| !field.has_default() && field.slot(raw).is_none())
        .collect()
}

fn ask(
    fields: &[Field],
    raw: &mut RawInput,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> CalcResult<()> {
    for field in fields {
        let answer = prompt_line(input, output, &field.prompt())
            .map_err(|e| CalcError::file_error("read", "stdin", e.to_string()))?
            .ok_or_else(|| CalcError::file_error("read", "stdin", "end of input"))?;
        *field.slot(raw) = if answer.is_empty() && field.has_default() {
            None
        } else {
            Some(answer)
        };
    }
    Ok(())
}

/// Parse the flags, asking for whatever is missing or rejected.
fn collect_input(
    mut raw: RawInput,
    config: &EngineConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> CalcResult<UserInput> {
    let mut pending = missing_fields(&mut raw);
    let interactive = !pending.is_empty();

    loop {
        ask(&pending, &mut raw, input, output)?;
        match raw.parse(config) {
            Ok(parsed) => return Ok(parsed),
            Err(e) if interactive && e.is_validation() => {
                writeln!(output, "{}", e.user_message())
                    .map_err(|io_err| CalcError::file_error("write", "stdout", io_err.to_string()))?;
                debug!(field = ?e.field(), "re-prompting after validation error");
                pending = e.field().and_then(Field::from_name).into_iter().collect();
                if pending.is_empty() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn load_config(path: Option<&Path>) -> CalcResult<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_json_file(path)?;
            info!(path = %path.display(), "using engine config");
            Ok(config)
        }
        None => Ok((*DEFAULT_CONFIG).clone()),
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a UserInput,
    result: &'a CalorieResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    derivation: Option<Vec<DerivationStep>>,
}

fn run_calculation(args: &CalcArgs) -> CalcResult<()> {
    let config = load_config(args.config.as_deref())?;
    let input = collect_input(args.to_raw(), &config, &mut io::stdin().lock(), &mut io::stdout())?;
    let result = calculate_with(&input, &config)?;
    let derivation = args.herleitung.then(|| derive(&input, &result, &config));

    if args.json {
        let output = JsonOutput {
            input: &input,
            result: &result,
            derivation,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    print!("{}", render_text(&input, &result));
    if let Some(steps) = derivation {
        println!();
        println!("Herleitung:");
        for step in steps {
            println!("  {}", step);
        }
    }
    Ok(())
}

fn print_levels() {
    println!("Aktivitätsstufen (--aktivitaet):");
    for level in ActivityLevel::ALL {
        println!(
            "  {}  {:<40} PAL {}",
            level.index(),
            level.label(),
            trimmed_decimal(DEFAULT_CONFIG.activity_factors.factor(level))
        );
    }
    println!();
    println!("Ziele (--ziel):");
    for goal in Goal::ALL {
        println!("  {}  {}", goal.index(), goal.label());
    }
}

fn print_reference(age: Option<u32>) -> CalcResult<()> {
    println!(
        "Durchschnittlicher Tagesbedarf bei mäßiger Aktivität (PAL {}) und durchschnittlicher Körpergröße:",
        trimmed_decimal(REFERENCE_PAL)
    );
    println!();
    match age {
        None => print!("{}", render_table(&REFERENCE_TABLE)),
        Some(age) => {
            let row = row_for_age(age).ok_or_else(|| {
                CalcError::invalid_input(
                    "age",
                    age.to_string(),
                    "reference table starts at 18",
                    "Die Tabelle enthält Werte ab 18 Jahren.",
                )
            })?;
            print!("{}", render_table(std::slice::from_ref(row)));
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for target in ["kcal_core", "kalorienrechner"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (outcome, json) = match &cli.command {
        None => (run_calculation(&cli.calc), cli.calc.json),
        Some(Command::Berechnen(args)) => (run_calculation(args), args.json),
        Some(Command::Stufen) => {
            print_levels();
            (Ok(()), false)
        }
        Some(Command::Referenz { alter }) => (print_reference(*alter), false),
        Some(Command::Formeln) => {
            print!("{}", equations_markdown());
            (Ok(()), false)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            if json {
                if let Ok(body) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", body);
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_takes_calc_flags() {
        let cli = Cli::try_parse_from([
            "kalorienrechner",
            "--geschlecht",
            "frau",
            "--alter",
            "30",
            "--groesse",
            "165",
            "--gewicht",
            "65,5",
            "--json",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert!(cli.calc.json);
        let raw = cli.calc.to_raw();
        assert_eq!(raw.sex.as_deref(), Some("frau"));
        assert_eq!(raw.weight.as_deref(), Some("65,5"));
        assert_eq!(raw.activity_level, None);
    }

    #[test]
    fn test_berechnen_subcommand() {
        let cli = Cli::try_parse_from([
            "kalorienrechner",
            "berechnen",
            "--alter",
            "30",
            "--aktivitaet",
            "2",
            "--ziel",
            "0",
            "--herleitung",
            "--config",
            "engine.json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Berechnen(args)) => {
                assert!(args.herleitung);
                assert_eq!(args.config, Some(PathBuf::from("engine.json")));
                assert_eq!(args.to_raw().goal.as_deref(), Some("0"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_other_subcommands() {
        let cli = Cli::try_parse_from(["kalorienrechner", "referenz", "--alter", "40"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Referenz { alter: Some(40) })));

        let cli = Cli::try_parse_from(["kalorienrechner", "stufen", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Stufen)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_flags_conflict_with_subcommand() {
        assert!(Cli::try_parse_from(["kalorienrechner", "--alter", "30", "stufen"]).is_err());
    }

    #[test]
    fn test_missing_fields_only_numeric() {
        let mut raw = RawInput::new().with_age("30");
        assert_eq!(missing_fields(&mut raw), vec![Field::Height, Field::Weight]);

        let mut raw = RawInput::new().with_age("30").with_height("180").with_weight("80");
        assert!(missing_fields(&mut raw).is_empty());
    }

    #[test]
    fn test_field_names_match_error_fields() {
        let raw = RawInput::new().with_age("30").with_height("180").with_weight("80");
        for (bad, field) in [
            (raw.clone().with_sex("x"), Field::Sex),
            (raw.clone().with_age("9"), Field::Age),
            (raw.clone().with_height("99"), Field::Height),
            (raw.clone().with_weight("301"), Field::Weight),
            (raw.clone().with_activity_level("5"), Field::ActivityLevel),
            (raw.clone().with_goal("3"), Field::Goal),
        ] {
            let err = bad.parse(&EngineConfig::default()).unwrap_err();
            assert_eq!(err.field().and_then(Field::from_name), Some(field));
        }
    }

    #[test]
    fn test_complete_invalid_flags_fail_without_prompting() {
        let raw = RawInput::new().with_age("9").with_height("180").with_weight("80");
        let mut answers = io::Cursor::new("");
        let mut shown = Vec::new();
        let err = collect_input(raw, &EngineConfig::default(), &mut answers, &mut shown).unwrap_err();
        assert!(shown.is_empty());
        assert!(err.is_validation());
        assert!(err.user_message().starts_with("Bitte gültige Werte eingeben"));
    }

    #[test]
    fn test_rejected_answer_is_asked_again() {
        let raw = RawInput::new().with_sex("frau").with_height("165").with_weight("65");
        let mut answers = io::Cursor::new("9\n30\n");
        let mut shown = Vec::new();

        let input = collect_input(raw, &EngineConfig::default(), &mut answers, &mut shown).unwrap();
        assert_eq!(input.age.0, 30);
        assert_eq!(input.height.0, 165.0);

        let transcript = String::from_utf8(shown).unwrap();
        assert_eq!(transcript.matches("Alter (Jahre): ").count(), 2);
        assert!(!transcript.contains("Größe (cm): "));
        assert!(transcript.contains("Bitte gültige Werte eingeben"));
    }

    #[test]
    fn test_only_the_rejected_field_is_asked_again() {
        let raw = RawInput::new().with_goal("7");
        let mut answers = io::Cursor::new("30\n180\n80\n\n");
        let mut shown = Vec::new();

        let input = collect_input(raw, &EngineConfig::default(), &mut answers, &mut shown).unwrap();
        assert_eq!(input.goal, Goal::Maintenance);
        assert_eq!(input.weight.0, 80.0);

        let transcript = String::from_utf8(shown).unwrap();
        assert!(transcript.contains("Bitte ein gültiges Ziel wählen (0–2)."));
        assert_eq!(transcript.matches("Alter (Jahre): ").count(), 1);
        assert_eq!(transcript.matches("Ziel (0–2) [1]: ").count(), 1);
    }

    #[test]
    fn test_end_of_input_stops_prompting() {
        let raw = RawInput::new().with_height("165").with_weight("65");
        let mut answers = io::Cursor::new("9\n");
        let mut shown = Vec::new();

        let err = collect_input(raw, &EngineConfig::default(), &mut answers, &mut shown).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_reference_below_eighteen() {
        let err = print_reference(Some(17)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(print_reference(Some(40)).is_ok());
    }
}
