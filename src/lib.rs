//! Natural-language calculator: normalization, evaluation, exact
//! fractions, function sampling and LaTeX typesetting behind one CLI.

use clap::{Parser, Subcommand, ValueEnum};
use miette::*;
use serde::Serialize;
use std::io::{self, BufRead, Write};

pub mod eval;
pub mod fraction;
pub mod history;
pub mod latex;
pub mod normalize;
pub mod sample;
pub mod theme;

pub use eval::{evaluate, EvalError};
pub use fraction::{combine, FracOp, Fraction, FractionError};
pub use history::History;
pub use latex::{fraction_derivation, to_latex};
pub use normalize::normalize;
pub use sample::{sample, SamplePoint};
pub use theme::Theme;

/// Natural-language calculator.
/// Evaluate spoken-style arithmetic, exact fractions and function plots.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Cmd,

    /// The output format to write to stdout.
    #[arg(short, long, default_value_t, value_enum, global = true)]
    pub out: Output,

    /// Accent colour used in table output.
    #[arg(long, default_value_t, value_enum, global = true)]
    pub theme: Theme,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Evaluate an expression exactly as written.
    Eval {
        /// The expression, e.g. "2+2*2" or "sin(pi/6)".
        expr: String,
    },

    /// Interpret a natural-language request, then evaluate it.
    ///
    /// With TEXT left blank a single line is read from stdin, so a
    /// transcription tool can be piped straight in.
    Ask {
        /// The request, e.g. "корень из 16 плюс 2".
        text: Option<String>,

        /// Print the canonical expression before the result.
        #[arg(short, long)]
        show_expr: bool,
    },

    /// Add, subtract, multiply or divide two fractions.
    Frac {
        /// Left operand, written as N/D.
        a: String,
        /// One of + - * / (× and ÷ also work).
        op: String,
        /// Right operand, written as N/D.
        b: String,

        /// Print the typeset derivation as well.
        #[arg(long)]
        tex: bool,
    },

    /// Sample a function of x over a range for plotting.
    Plot {
        /// The function body, e.g. "x^2 + 2*x - 1".
        expr: String,

        /// Lower bound of x.
        #[arg(long, default_value_t = sample::DEFAULT_MIN, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound of x.
        #[arg(long, default_value_t = sample::DEFAULT_MAX, allow_negative_numbers = true)]
        max: f64,

        /// Distance between sample points.
        #[arg(long, default_value_t = sample::DEFAULT_STEP)]
        step: f64,
    },

    /// Typeset an expression as LaTeX.
    Tex {
        /// The expression to typeset.
        expr: String,
    },

    /// Interactive calculator session with history.
    Repl,
}

#[derive(Debug, Copy, Clone, ValueEnum, Default)]
pub enum Output {
    /// Human-readable lines and tables.
    #[default]
    Table,

    /// One JSON document per invocation.
    Json,
}

impl App {
    pub fn run(self) -> Result<()> {
        let App { cmd, out, theme } = self;

        match cmd {
            Cmd::Eval { expr } => {
                let result = with_symbol_hint(evaluate(&expr))?;
                write_calculation(out, &expr, None, &result)
            }
            Cmd::Ask { text, show_expr } => {
                let text = match text {
                    Some(text) => text,
                    None => read_transcript()?,
                };
                ensure!(!text.trim().is_empty(), "nothing to calculate");

                let expr = normalize(&text);
                let result = with_symbol_hint(evaluate(&expr))?;
                write_calculation(out, &text, show_expr.then_some(expr.as_str()), &result)
            }
            Cmd::Frac { a, op, b, tex } => {
                let ctx = || "failed to combine the fractions";
                let lhs = a.parse::<Fraction>().into_diagnostic().wrap_err_with(ctx)?;
                let rhs = b.parse::<Fraction>().into_diagnostic().wrap_err_with(ctx)?;
                let op = op.parse::<FracOp>().into_diagnostic().wrap_err_with(ctx)?;
                let result = fraction::combine(lhs, rhs, op)
                    .into_diagnostic()
                    .wrap_err_with(ctx)?;

                match out {
                    Output::Table => {
                        println!("{lhs} {op} {rhs} = {result}");
                        if tex {
                            println!("{}", latex::fraction_derivation(lhs, op, rhs, result));
                        }
                    }
                    Output::Json => write_json(&FracOut {
                        a: lhs.to_string(),
                        op: op.to_string(),
                        b: rhs.to_string(),
                        result: result.to_string(),
                        tex: tex.then(|| latex::fraction_derivation(lhs, op, rhs, result)),
                    })?,
                }
                Ok(())
            }
            Cmd::Plot {
                expr,
                min,
                max,
                step,
            } => {
                ensure!(step > 0.0, "step must be positive");
                ensure!(min < max, "min must be below max");

                let points = with_symbol_hint(sample::sample(&expr, min, max, step))?;
                match out {
                    Output::Table => {
                        println!("f(x) = {}", latex::to_latex(&expr));
                        write_points(&points, theme).into_diagnostic()
                    }
                    Output::Json => write_json(&points),
                }
            }
            Cmd::Tex { expr } => {
                let latex = latex::to_latex(&expr);
                match out {
                    Output::Table => {
                        println!("{latex}");
                        Ok(())
                    }
                    Output::Json => write_json(&TexOut {
                        expression: &expr,
                        latex: &latex,
                    }),
                }
            }
            Cmd::Repl => repl(theme),
        }
    }
}

/// The voice-input path: some upstream transcription tool pipes a line in.
fn read_transcript() -> Result<String> {
    eprintln!("Reading request from stdin");
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .into_diagnostic()
        .wrap_err("failed to read the request from stdin")?;
    Ok(line.trim().to_string())
}

/// Attach a did-you-mean hint when evaluation tripped on an unknown name.
fn with_symbol_hint<T>(res: std::result::Result<T, EvalError>) -> Result<T> {
    match res {
        Ok(value) => Ok(value),
        Err(e) => {
            let hint = e.unknown_symbol().and_then(closest_name);
            let report = Err::<T, EvalError>(e).into_diagnostic();
            match hint {
                Some(name) => report.wrap_err(format!("did you mean '{name}'?")),
                None => report,
            }
        }
    }
}

fn closest_name(symbol: &str) -> Option<&'static str> {
    use simsearch::SimSearch;

    let mut engine: SimSearch<usize> = SimSearch::new();
    for (i, name) in eval::KNOWN_NAMES.iter().enumerate() {
        engine.insert(i, name);
    }
    engine.search(symbol).first().map(|&i| eval::KNOWN_NAMES[i])
}

fn repl(mut theme: Theme) -> Result<()> {
    let mut history = History::new();
    let mut stdout = io::stdout();

    eprintln!("Type a request; :history, :theme <name>, :quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ").into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        let Some(line) = lines.next() else { break };
        let line = line.into_diagnostic()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            match command.split_once(' ') {
                Some(("theme", name)) => match <Theme as ValueEnum>::from_str(name.trim(), true) {
                    Ok(picked) => theme = picked,
                    Err(_) => println!("no theme called '{}'", name.trim()),
                },
                None if command == "history" => write_history(&history, theme).into_diagnostic()?,
                None if command == "quit" || command == "q" => break,
                _ => println!("unknown command ':{command}'"),
            }
            continue;
        }

        match evaluate(&normalize(line)) {
            Ok(result) => {
                println!("= {result}");
                history.push(line, &result);
            }
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct CalcOut<'a> {
    expression: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<&'a str>,
    result: &'a str,
}

#[derive(Serialize)]
struct FracOut {
    a: String,
    op: String,
    b: String,
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tex: Option<String>,
}

#[derive(Serialize)]
struct TexOut<'a> {
    expression: &'a str,
    latex: &'a str,
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value).into_diagnostic()?);
    Ok(())
}

fn write_calculation(
    out: Output,
    expression: &str,
    normalized: Option<&str>,
    result: &str,
) -> Result<()> {
    match out {
        Output::Table => {
            if let Some(expr) = normalized {
                println!("{expr}");
            }
            println!("{result}");
            Ok(())
        }
        Output::Json => write_json(&CalcOut {
            expression,
            normalized,
            result,
        }),
    }
}

fn write_history(history: &History, theme: Theme) -> io::Result<()> {
    use comfy_table::{Cell, CellAlignment as CA, Row, Table};

    let w = &mut io::stdout();

    if history.is_empty() {
        return writeln!(w, "nothing calculated yet");
    }

    let mut table = Table::new();
    table.set_header(["Time", "Expression", "Result"]);
    for entry in history.iter() {
        let mut row = Row::new();
        row.add_cell(Cell::new(entry.timestamp.format("%H:%M")))
            .add_cell(Cell::new(&entry.expression))
            .add_cell(
                Cell::new(&entry.result)
                    .set_alignment(CA::Right)
                    .fg(theme.color()),
            );
        table.add_row(row);
    }
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);

    writeln!(w, "{table}")
}

fn write_points(points: &[SamplePoint], theme: Theme) -> io::Result<()> {
    use comfy_table::{Cell, CellAlignment as CA, Row, Table};

    let w = &mut io::stdout();

    let mut nfmtr = "[~4]".parse::<numfmt::Formatter>().expect("just fine");

    let mut table = Table::new();
    table.set_header(["x", "y"]);
    for point in points {
        let mut row = Row::new();
        row.add_cell(Cell::new(point.x).set_alignment(CA::Right))
            .add_cell(
                Cell::new(point.y)
                    .set_alignment(CA::Right)
                    .fg(theme.color()),
            );
        table.add_row(row);
    }
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);

    writeln!(w, "{table}")?;

    writeln!(w, "  Points: {}", points.len())?;
    if let Some((lo, hi)) = y_range(points) {
        writeln!(w, "  y min: {}", nfmtr.fmt(lo))?;
        writeln!(w, "  y max: {}", nfmtr.fmt(hi))?;
    }

    Ok(())
}

fn y_range(points: &[SamplePoint]) -> Option<(f64, f64)> {
    points.iter().map(|p| p.y).fold(None, |acc, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })
}
