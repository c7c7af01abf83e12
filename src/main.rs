use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::str::FromStr;

use argh::FromArgs;
use log::info;

use origami_judge::data::{ProblemSpec, SolutionSpec};
use origami_judge::{integer_resemblance, validate_solution, ValidateError};

#[derive(FromArgs)]
/// Validates and scores origami folding solutions.
struct Options {
  /// compile a solution into its canonical problem
  #[argh(switch)]
  compile: bool,
  /// evaluate a solution against a problem
  #[argh(switch)]
  evaluate: bool,
  /// path(s): <solution> for --compile, <problem> <solution> for --evaluate
  #[argh(positional)]
  inputs: Vec<PathBuf>,
}

fn main() {
  pretty_env_logger::init();
  let options: Options = argh::from_env();
  exit(run(&options));
}

fn run(options: &Options) -> i32 {
  match (options.compile, options.evaluate, options.inputs.as_slice()) {
    (true, false, [solution]) => compile(solution),
    (false, true, [problem, solution]) => evaluate(problem, solution),
    _ => usage(),
  }
}

fn usage() -> i32 {
  eprintln!("Usage:");
  eprintln!("  origami-judge --compile <solution>");
  eprintln!("  origami-judge --evaluate <problem> <solution>");
  1
}

fn compile(solution_path: &Path) -> i32 {
  let solution: SolutionSpec = read_spec(solution_path, "solution");
  if let Err(code) = validated(&solution, true) {
    return code;
  }
  info!("compiling problem from {}", solution_path.display());
  print!("{}", ProblemSpec::from_solution(&solution));
  0
}

fn evaluate(problem_path: &Path, solution_path: &Path) -> i32 {
  let problem: ProblemSpec = read_spec(problem_path, "problem");
  let solution: SolutionSpec = read_spec(solution_path, "solution");
  if let Err(code) = validated(&solution, false) {
    return code;
  }
  println!(
    "integer_resemblance: {}",
    integer_resemblance(&problem, &solution)
  );
  0
}

fn validated(solution: &SolutionSpec, check_normalized: bool) -> Result<(), i32> {
  match validate_solution(solution, check_normalized) {
    Ok(()) => Ok(()),
    Err(error) => {
      report_invalid(&error);
      Err(1)
    }
  }
}

fn report_invalid(error: &ValidateError) {
  println!("ValidateSolutionError: {}", error);
  println!("Invalid solution.");
}

// Malformed input aborts with a diagnostic; only validity failures get the
// structured exit path.
fn read_spec<T>(path: &Path, what: &str) -> T
where
  T: FromStr,
  T::Err: Display,
{
  let text = fs::read_to_string(path).unwrap_or_else(|error| {
    eprintln!("Malformed {}: {}: {}", what, path.display(), error);
    exit(1);
  });
  text.parse().unwrap_or_else(|error| {
    eprintln!("Malformed {}: {}: {}", what, path.display(), error);
    exit(1);
  })
}
