use graphbox::render::{SvgRenderOptions, render_svg};
use graphbox::{Graph, GraphOptions};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(graphbox::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<graphbox::Error> for CliError {
    fn from(value: graphbox::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<graphbox::GraphmlError> for CliError {
    fn from(value: graphbox::GraphmlError) -> Self {
        Self::Graph(value.into())
    }
}

impl From<graphbox::OptionsError> for CliError {
    fn from(value: graphbox::OptionsError) -> Self {
        Self::Graph(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Stats,
    Normalize,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    directed: bool,
    weighted: bool,
    verbose: bool,
    pretty: bool,
    background: Option<String>,
    no_background: bool,
    width: Option<f64>,
    height: Option<f64>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOut<'a> {
    directed: bool,
    weighted: bool,
    knots: usize,
    edges: usize,
    half_edges: usize,
    names: Vec<&'a str>,
}

fn usage() -> &'static str {
    "graphbox-cli\n\
\n\
USAGE:\n\
  graphbox-cli [stats] [--pretty] [<options>] [<path>|-]\n\
  graphbox-cli normalize [--out <path>] [<options>] [<path>|-]\n\
  graphbox-cli render [--background <css-color>|--no-background] [--width <w>] [--height <h>] [--out <path>] [<options>] [<path>|-]\n\
\n\
OPTIONS:\n\
  --config <path>   graph options JSON (directed, weighted, knotRadius, hitTolerance, canvasWidth, canvasHeight)\n\
  --directed        mark the graph and every edge as directed\n\
  --weighted        mark the graph and every edge as weighted\n\
  --verbose         log graph changes to stderr\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', GraphML is read from stdin.\n\
  - stats prints a JSON summary; normalize re-emits the graph as GraphML; render prints SVG.\n\
  - RUST_LOG overrides the default log filter (warn).\n\
"
}

fn parse_number(value: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "stats" => args.command = Command::Stats,
            "normalize" => args.command = Command::Normalize,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--directed" => args.directed = true,
            "--weighted" => args.weighted = true,
            "--verbose" | "-v" => args.verbose = true,
            "--no-background" => args.no_background = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--width" => args.width = Some(parse_number(it.next())?),
            "--height" => args.height = Some(parse_number(it.next())?),
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("graphbox_core=debug,graphbox_render=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn graph_options(args: &Args) -> Result<GraphOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => GraphOptions::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GraphOptions::default(),
    };
    options.directed |= args.directed;
    options.weighted |= args.weighted;
    Ok(options)
}

fn load_graph(args: &Args) -> Result<Graph, CliError> {
    let options = graph_options(args)?;
    let text = read_input(args.input.as_deref())?;
    let mut graph = Graph::try_new(options)?;
    graph.insert(&text)?;
    if args.directed {
        graph.set_directed(true);
    }
    if args.weighted {
        graph.set_weighted(true);
    }
    Ok(graph)
}

fn run(args: Args) -> Result<(), CliError> {
    let graph = load_graph(&args)?;

    match args.command {
        Command::Stats => {
            let stats = StatsOut {
                directed: graph.is_directed(),
                weighted: graph.is_weighted(),
                knots: graph.knot_count(),
                edges: graph.edge_count(),
                half_edges: graph.edges().filter(|e| e.is_half()).count(),
                names: graph.knots().iter().map(|k| k.name.as_str()).collect(),
            };
            write_json(&stats, args.pretty)
        }
        Command::Normalize => write_text(&graph.to_graphml(), args.out.as_deref()),
        Command::Render => {
            let mut options = SvgRenderOptions {
                width: args.width,
                height: args.height,
                ..Default::default()
            };
            if args.no_background {
                options.background = None;
            } else if let Some(bg) = args.background.clone() {
                options.background = Some(bg);
            }
            write_text(&render_svg(&graph, &options), args.out.as_deref())
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

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "graphbox-cli failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("graphbox-cli")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_stats_on_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Stats);
        assert_eq!(args.input, None);
    }

    #[test]
    fn parses_render_flags() {
        let args = parse_args(&argv(&[
            "render",
            "--width",
            "320",
            "--no-background",
            "--directed",
            "in.graphml",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.width, Some(320.0));
        assert!(args.no_background);
        assert!(args.directed);
        assert_eq!(args.input.as_deref(), Some("in.graphml"));
    }

    #[test]
    fn rejects_unknown_flags_and_bad_numbers() {
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["render", "--width", "-3"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.graphml", "b.graphml"])),
            Err(CliError::Usage(_))
        ));
    }
}
