extern crate ansi_term;
extern crate linefeed;
use crate::mach::{Constants, Evaluator, Preprocessor, Val};
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::fs;
use std::io::Write;

/// Command line and interactive front end.
///
/// `vb6 [-D NAME[=EXPR]]... [FILE]` preprocesses FILE to stdout.
/// Without a file it reads lines interactively and echoes the ones
/// that survive the directives.

pub fn main() {
    env_logger::init();
    let mut constants = Constants::new();
    let mut filename: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-D" => match args.next() {
                Some(def) => define(&mut constants, &def),
                None => {
                    eprintln!("{}", Style::new().bold().paint("-D requires NAME[=EXPR]"));
                    std::process::exit(2);
                }
            },
            _ => filename = Some(arg),
        }
    }
    let mut preprocessor = Preprocessor::with_constants(constants);
    let result = match filename {
        Some(filename) => process_file(&mut preprocessor, &filename),
        None => interact(&mut preprocessor),
    };
    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

// A bare -D NAME defines True, matching the VB6 /d switch.
fn define(constants: &mut Constants, def: &str) {
    let (name, source) = match def.split_once('=') {
        Some((name, source)) => (name, source),
        None => {
            constants.define(def, Val::Boolean(true));
            return;
        }
    };
    let val = match crate::lang::expression(source) {
        Ok(expr) => Evaluator::new(constants).evaluate(&expr),
        Err(error) => Err(error),
    };
    match val {
        Ok(val) => constants.define(name, val),
        Err(error) => eprintln!(
            "{}",
            Style::new()
                .bold()
                .paint(format!("-D {}: {}", name, error))
        ),
    }
}

fn process_file(preprocessor: &mut Preprocessor, filename: &str) -> std::io::Result<()> {
    let source = fs::read_to_string(filename)?;
    match preprocessor.process(&source) {
        Ok(emitted) => print!("{}", emitted),
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            std::process::exit(1);
        }
    }
    Ok(())
}

fn interact(preprocessor: &mut Preprocessor) -> std::io::Result<()> {
    let interface = Interface::new("vb6")?;
    interface.set_prompt("> ")?;
    loop {
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        match preprocessor.line(&line) {
            Ok(true) => interface.write_fmt(format_args!("{}\n", line))?,
            Ok(false) => {}
            Err(error) => interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?,
        }
        interface.add_history_unique(line);
    }
    if let Err(error) = preprocessor.finish() {
        interface.write_fmt(format_args!(
            "{}\n",
            Style::new().bold().paint(error.to_string())
        ))?;
    }
    Ok(())
}
