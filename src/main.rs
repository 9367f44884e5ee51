use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use y90rs::config::{ColorChoice, Config, OutputFormat};
use y90rs::intake::{self, LiverInput, PatientCase};
use y90rs::output;
use y90rs::scoring::{self, MeldLabValues, PortalVeinStatus, RiskCategory};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the intake form on the terminal, then score (default if no subcommand)
    Interactive {
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score a patient from a case file or from flags
    Score(ScoreArgs),
    /// Calculate MELD 3.0 from lab values
    Meld {
        #[command(flatten)]
        labs: LabArgs,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the management recommendations for a risk category
    Recommendations {
        /// low, intermediate or high
        category: RiskCategory,
    },
}

#[derive(Args, Debug)]
struct LabArgs {
    /// Total bilirubin (µmol/L)
    #[arg(long)]
    bilirubin: Option<f64>,

    /// Creatinine (µmol/L)
    #[arg(long)]
    creatinine: Option<f64>,

    #[arg(long)]
    inr: Option<f64>,

    /// Sodium (mmol/L)
    #[arg(long)]
    sodium: Option<f64>,

    #[arg(long)]
    female: bool,
}

impl LabArgs {
    /// None when no lab flag was given; an error when only some were.
    fn to_labs(&self) -> Result<Option<MeldLabValues>> {
        let values = [self.bilirubin, self.creatinine, self.inr, self.sodium];
        if values.iter().all(Option::is_none) {
            return Ok(None);
        }
        match values {
            [Some(bilirubin), Some(creatinine), Some(inr), Some(sodium)] => Ok(Some(MeldLabValues {
                bilirubin,
                creatinine,
                inr,
                sodium,
                female: self.female,
            })),
            _ => bail!("MELD 3.0 labs need all of --bilirubin, --creatinine, --inr and --sodium"),
        }
    }
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Patient case file (YAML or JSON); replaces the per-field flags
    #[arg(long)]
    case: Option<PathBuf>,

    /// Largest tumor size (cm)
    #[arg(long)]
    tumor_size: Option<f64>,

    /// Tumor volume (cc)
    #[arg(long)]
    tumor_volume: Option<f64>,

    /// AFP (ng/mL)
    #[arg(long)]
    afp: Option<f64>,

    /// no_thrombosis, bland, segmental_tumor or main_lobar_tumor
    #[arg(long)]
    portal_vein: Option<PortalVeinStatus>,

    /// Shunt fraction (%)
    #[arg(long)]
    shunt_fraction: Option<f64>,

    /// MELD 3.0 score (or give the lab flags instead)
    #[arg(long)]
    meld3: Option<u32>,

    #[command(flatten)]
    labs: LabArgs,

    /// Albumin (g/L)
    #[arg(long)]
    albumin: Option<f64>,

    #[arg(long)]
    alt_ast_ratio: Option<f64>,

    /// Neutrophil-to-lymphocyte ratio
    #[arg(long)]
    nlr: Option<f64>,

    /// ECOG performance status (0-3)
    #[arg(long)]
    ecog: Option<u8>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Omit the per-domain breakdown
    #[arg(long)]
    no_breakdown: bool,
}

impl ScoreArgs {
    fn to_case(&self) -> Result<PatientCase> {
        if let Some(ref path) = self.case {
            return intake::load_case(path);
        }

        let mut missing = Vec::new();
        let mut required = |value: Option<f64>, flag: &'static str| {
            if value.is_none() {
                missing.push(flag);
            }
            value.unwrap_or_default()
        };
        let tumor_size = required(self.tumor_size, "--tumor-size");
        let tumor_volume = required(self.tumor_volume, "--tumor-volume");
        let afp = required(self.afp, "--afp");
        let shunt_fraction = required(self.shunt_fraction, "--shunt-fraction");
        let albumin = required(self.albumin, "--albumin");
        let alt_ast_ratio = required(self.alt_ast_ratio, "--alt-ast-ratio");
        let nlr = required(self.nlr, "--nlr");
        if self.ecog.is_none() {
            missing.push("--ecog");
        }

        let portal_vein = match (self.portal_vein, missing.is_empty()) {
            (Some(status), true) => status,
            (None, _) => {
                missing.push("--portal-vein");
                bail!("Missing required inputs: {}", missing.join(", "))
            }
            (Some(_), false) => bail!("Missing required inputs: {}", missing.join(", ")),
        };

        Ok(PatientCase {
            tumor_size,
            tumor_volume,
            afp,
            portal_vein,
            shunt_fraction,
            liver: LiverInput {
                meld3: self.meld3,
                labs: self.labs.to_labs()?,
            },
            albumin,
            alt_ast_ratio,
            nlr,
            ecog: self.ecog.unwrap_or_default(),
        })
    }
}

#[derive(Parser, Debug)]
#[command(name = "y90rs")]
#[command(about = "Y90 radioembolization risk score (Y90RS) calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/y90rs/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// When to use colors (overrides the config file)
    #[arg(long, global = true, value_enum)]
    color: Option<ColorChoice>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// The intake form runs when no subcommand is given.
fn command_or_default(command: Option<Commands>) -> Commands {
    command.unwrap_or(Commands::Interactive { json: false })
}

/// Validate, score and print one case. Returns the process exit code.
fn score_case(case: &PatientCase, config: &Config, use_colors: bool, json: bool, breakdown: bool) -> i32 {
    if let Err(errors) = intake::validate_case(case) {
        eprintln!("Input errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_INPUT;
    }

    let inputs = match case.to_inputs() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };
    tracing::debug!(?inputs, "scoring");

    let assessment = scoring::assess(&inputs);
    tracing::debug!(
        score = assessment.result.score,
        category = %assessment.result.category,
        "scored"
    );

    if json || config.format() == OutputFormat::Json {
        match output::to_json(&output::Report::new(&inputs, &assessment)) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_INPUT;
            }
        }
    } else {
        println!(
            "{}",
            output::format_assessment(&assessment, use_colors, breakdown && config.show_breakdown())
        );
    }
    EXIT_SUCCESS
}

fn main() {
    let cli = Cli::parse();
    y90rs::logging::init(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match y90rs::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let use_colors = output::resolve_colors(cli.color.unwrap_or(config.color()));
    let command = command_or_default(cli.command);

    let code = match command {
        Commands::Interactive { json } => match intake::run_interactive() {
            Ok(case) => {
                println!();
                score_case(&case, &config, use_colors, json, true)
            }
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                EXIT_INPUT
            }
        },
        Commands::Score(args) => match args.to_case() {
            Ok(case) => score_case(&case, &config, use_colors, args.json, !args.no_breakdown),
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                EXIT_INPUT
            }
        },
        Commands::Meld { labs, json } => match labs.to_labs() {
            Ok(Some(labs)) => {
                let mut errors = Vec::new();
                intake::validation::validate_labs(&labs, &mut errors);
                if !errors.is_empty() {
                    eprintln!("Input errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_INPUT);
                }
                let meld3 = intake::meld3_from_labs(&labs);
                if json || config.format() == OutputFormat::Json {
                    match output::to_json(&output::MeldReport::new(&labs, meld3)) {
                        Ok(s) => println!("{}", s),
                        Err(e) => {
                            eprintln!("{:#}", e);
                            std::process::exit(EXIT_INPUT);
                        }
                    }
                } else {
                    println!("{}", output::format_meld(&labs, meld3, use_colors));
                }
                EXIT_SUCCESS
            }
            Ok(None) => {
                eprintln!("Input error: --bilirubin, --creatinine, --inr and --sodium are required");
                EXIT_INPUT
            }
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                EXIT_INPUT
            }
        },
        Commands::Recommendations { category } => {
            println!("{}", output::format_category_recommendations(category, use_colors));
            EXIT_SUCCESS
        }
    };

    std::process::exit(code);
}
