use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::time::Duration;
use wrasse::{GenerateOptions, Graph, StepSink, verify_brute_force, verify_dijkstra};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Wrasse(wrasse::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Wrasse(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<wrasse::Error> for CliError {
    fn from(value: wrasse::Error) -> Self {
        Self::Wrasse(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Generate,
    Verify,
}

#[derive(Debug, Clone, Copy, Default)]
enum Algorithm {
    BruteForce,
    Dijkstra,
    #[default]
    Both,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    opts: GenerateOptions,
    distance: u32,
    algorithm: Algorithm,
    seed: Option<u64>,
    delay: u64,
    pretty: bool,
    with_graph: bool,
    until_valid: bool,
}

/// Regeneration attempts tolerated by `--until-valid` before giving up.
const RETRY_CAP: usize = 1000;

#[derive(Serialize)]
struct VerifyOut<'a> {
    vertices: usize,
    edges: usize,
    max_distance: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    brute_force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dijkstra: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    graph: Option<&'a Graph>,
}

/// Paces a run the way the reference UI did: one beat per examined edge.
struct DelaySink {
    delay_units: u64,
}

impl StepSink for DelaySink {
    fn edge_examined(&mut self, _edge: usize) {
        if self.delay_units > 0 {
            std::thread::sleep(Duration::from_millis(self.delay_units * 250));
        }
    }
}

fn usage() -> &'static str {
    "wrasse-cli\n\
\n\
USAGE:\n\
  wrasse-cli [generate] [--vertices <n>] [--edges <n>] [--colors <n>] [--scalar <x>] [--seed <n>] [--until-valid] [--distance <n>] [--pretty]\n\
  wrasse-cli verify [generate flags] [--distance <n>] [--algorithm brute-force|dijkstra|both] [--delay <units>] [--with-graph]\n\
\n\
NOTES:\n\
  - generate prints the graph as JSON (tombstoned slots are null).\n\
  - verify generates a graph, runs the selected verifier(s), and prints the verdicts.\n\
  - --until-valid regenerates until the coloring passes the distance bound (or gives up after 1000 graphs).\n\
  - --distance defaults to 2.\n\
  - --seed makes generation reproducible; without it a thread RNG is used.\n\
  - --delay sleeps <units> * 250ms per examined edge, mirroring the reference UI's pacing.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        distance: 2,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "generate" => args.command = Command::Generate,
            "verify" => args.command = Command::Verify,
            "--pretty" => args.pretty = true,
            "--with-graph" => args.with_graph = true,
            "--until-valid" => args.until_valid = true,
            "--vertices" => {
                args.opts.vertex_count = next_value(&mut it)?;
            }
            "--edges" => {
                args.opts.edge_count = next_value(&mut it)?;
            }
            "--colors" => {
                args.opts.color_count = next_value(&mut it)?;
            }
            "--scalar" => {
                args.opts.scalar_factor = next_value(&mut it)?;
                if !(args.opts.scalar_factor.is_finite() && args.opts.scalar_factor > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--distance" => {
                args.distance = next_value(&mut it)?;
            }
            "--seed" => {
                args.seed = Some(next_value(&mut it)?);
            }
            "--delay" => {
                args.delay = next_value(&mut it)?;
            }
            "--algorithm" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = match kind.as_str() {
                    "brute-force" => Algorithm::BruteForce,
                    "dijkstra" => Algorithm::Dijkstra,
                    "both" => Algorithm::Both,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn next_value<'a, T: std::str::FromStr>(
    it: &mut impl Iterator<Item = &'a String>,
) -> Result<T, CliError> {
    it.next()
        .and_then(|v| v.parse::<T>().ok())
        .ok_or(CliError::Usage(usage()))
}

fn build_graph(args: &Args) -> Result<Graph, CliError> {
    let graph = match (args.seed, args.until_valid) {
        (Some(seed), false) => {
            wrasse::generate_with(&args.opts, &mut SmallRng::seed_from_u64(seed))?
        }
        (Some(seed), true) => wrasse::generate_until_valid(
            &args.opts,
            args.distance,
            RETRY_CAP,
            &mut SmallRng::seed_from_u64(seed),
        )?,
        (None, false) => wrasse::generate(&args.opts)?,
        (None, true) => wrasse::generate_until_valid(
            &args.opts,
            args.distance,
            RETRY_CAP,
            &mut rand::thread_rng(),
        )?,
    };
    Ok(graph)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let graph = build_graph(&args)?;

    match args.command {
        Command::Generate => print_json(&graph, args.pretty),
        Command::Verify => {
            let mut sink = DelaySink {
                delay_units: args.delay,
            };
            let brute_force = match args.algorithm {
                Algorithm::BruteForce | Algorithm::Both => {
                    Some(verify_brute_force(&graph, args.distance, &mut sink))
                }
                Algorithm::Dijkstra => None,
            };
            let dijkstra = match args.algorithm {
                Algorithm::Dijkstra | Algorithm::Both => {
                    Some(verify_dijkstra(&graph, args.distance, &mut sink))
                }
                Algorithm::BruteForce => None,
            };
            let out = VerifyOut {
                vertices: graph.live_count(),
                edges: graph.edge_count(),
                max_distance: args.distance,
                brute_force,
                dijkstra,
                graph: args.with_graph.then_some(&graph),
            };
            print_json(&out, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
