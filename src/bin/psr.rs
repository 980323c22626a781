use std::{collections::BTreeMap, path::PathBuf};

use clap::Parser;
use serde::Serialize;
use tariff_psr::{
    config::RooConfig,
    eval::Outcome,
    questionnaire::{CategoryDef, QuestionDef},
    template::{TemplateVars, TemplateWarning},
    Iteration, PsrError, Questionnaire,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Walk a product-specific rule as a questionnaire", long_about = None)]
struct Cli {
    /// Rule text, e.g. "CTH or RVC parameter '40%'"
    rule: String,

    /// Answers given so far, as CODE=yes or CODE=no
    #[arg(value_parser = parse_answer)]
    answers: Vec<(String, bool)>,

    /// Path to the authored questionnaire JSON
    #[arg(short, long, default_value = "roo.json")]
    roo: PathBuf,

    /// HS code of the product
    #[arg(long, default_value = "")]
    hscode: String,

    /// Extra template variables, as NAME=VALUE
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_answer(s: &str) -> Result<(String, bool), String> {
    let (code, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=yes|no, got `{}`", s))?;
    let value = match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => true,
        "no" | "n" | "false" => false,
        other => return Err(format!("expected yes or no for {}, got `{}`", code, other)),
    };
    Ok((code.trim().to_string(), value))
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))
}

#[derive(Serialize)]
struct Report<'a> {
    official: &'a str,
    dump: String,
    outcome: Outcome,
    outcome_label: Option<&'a str>,
    pending: Option<&'a str>,
    categories: Vec<CategoryReport<'a>>,
    warnings: &'a [TemplateWarning],
}

#[derive(Serialize)]
struct CategoryReport<'a> {
    #[serde(flatten)]
    category: &'a CategoryDef,
    visible_questions: Vec<&'a QuestionDef>,
}

impl<'a> Report<'a> {
    fn new(psr: &'a Questionnaire, iteration: &Iteration<'a>) -> Self {
        let visible: Vec<&'a QuestionDef> = iteration.visible_questions().collect();
        let categories = iteration
            .visible_categories()
            .map(|category| CategoryReport {
                category,
                visible_questions: visible
                    .iter()
                    .copied()
                    .filter(|question| question.category == category.key)
                    .collect(),
            })
            .collect();
        Self {
            official: psr.official(),
            dump: psr.dump(),
            outcome: iteration.outcome(),
            outcome_label: iteration.definition().map(|def| def.label.as_str()),
            pending: iteration.pending().map(|question| question.code.as_str()),
            categories,
            warnings: psr.warnings(),
        }
    }

    fn print_text(&self) {
        println!("Official: {}", self.official);
        println!("Rule:     {}", self.dump);
        for category in &self.categories {
            println!();
            println!("[{}] {}", category.category.key, category.category.label);
            if !category.category.details.is_empty() {
                println!("  {}", category.category.details.replace('\n', "\n  "));
            }
            for question in &category.visible_questions {
                let marker = if Some(question.code.as_str()) == self.pending {
                    ">"
                } else {
                    " "
                };
                println!(" {} {}: {}", marker, question.code, question.label);
            }
        }
        println!();
        match self.outcome_label {
            Some(label) => println!("Outcome: {} ({})", self.outcome, label),
            None => println!("Outcome: {}", self.outcome),
        }
        for warning in self.warnings {
            println!("Warning: {}", warning);
        }
    }
}

fn run(cli: &Cli) -> Result<(), PsrError> {
    let roo = RooConfig::from_file(&cli.roo)?;
    let mut vars = TemplateVars::with_hscode(cli.hscode.as_str());
    for (name, value) in &cli.vars {
        vars.set(name.as_str(), value.as_str());
    }

    let psr = Questionnaire::build(&cli.rule, &roo, &vars)?;
    let answers: BTreeMap<String, bool> = cli.answers.iter().cloned().collect();
    debug!(?answers, "iterating");
    let iteration = psr.iterate(&answers);
    let report = Report::new(&psr, &iteration);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_text();
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
