use SteamReformer::ReactorsIVP::SMRreactorIVP::{SMRreactorIVP, TubeSweep};
use SteamReformer::ReactorsIVP::reactor_config::ReactorConfig;
use SteamReformer::ReactorsIVP::reactor_error::ReactorError;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str =
    "usage: steam_reformer [config.json] [--sweep <target> <max_tubes>] [--save <profile.json>]";

/// tube counts tried by `--sweep` start here and grow by the same amount
const SWEEP_STEP: u32 = 10;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    sweep: Option<(f64, u32)>,
    save: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, ReactorError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sweep" => {
                let target = args
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| ReactorError::invalid("--sweep", "expected a target conversion"))?;
                let max_tubes = args
                    .next()
                    .and_then(|s| s.parse::<u32>().ok())
                    .ok_or_else(|| ReactorError::invalid("--sweep", "expected a maximum tube count"))?;
                parsed.sweep = Some((target, max_tubes));
            }
            "--save" => {
                let path = args
                    .next()
                    .ok_or_else(|| ReactorError::invalid("--save", "expected a file name"))?;
                parsed.save = Some(path);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(ReactorError::invalid(other, USAGE));
            }
            path => parsed.config = Some(path.to_string()),
        }
    }
    Ok(parsed)
}

fn run() -> Result<(), ReactorError> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => ReactorConfig::from_json_file(path)?,
        None => {
            info!("no configuration file given, using the reference reformer");
            ReactorConfig::default()
        }
    };

    if let Some((target, max_tubes)) = args.sweep {
        let sweep = TubeSweep::new(target, SWEEP_STEP, SWEEP_STEP, max_tubes);
        let result = sweep.run(&config)?;
        result.pretty_print();
        match result.reached {
            Some(point) => println!("target conversion {} reached with {} tubes", target, point.tubes),
            None => println!("target conversion {} not reached with up to {} tubes", target, max_tubes),
        }
        return Ok(());
    }

    let mut reactor = SMRreactorIVP::new(config);
    reactor.solve()?;
    reactor.pretty_print();
    if let Some(path) = &args.save {
        reactor.save_profile(path)?;
    }
    Ok(())
}

pub fn main() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
