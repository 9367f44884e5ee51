use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use super::case::{labs_entered, LiverInput, PatientCase};
use super::validation::{self, FormRange};
use crate::scoring::{calculate_meld3, MeldLabValues, PortalVeinStatus};

/// Line-oriented intake form. Reads answers from `input`, writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed before the form was complete");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Re-prompts until the answer is a number inside `range`.
    fn prompt_number(&mut self, label: &str, range: &FormRange, default: f64) -> Result<f64> {
        loop {
            let answer = self.prompt_with_default(label, &default.to_string())?;
            match answer.parse::<f64>() {
                Ok(v) if range.contains(v) => return Ok(v),
                _ => self.say(&format!(
                    "  Invalid: enter a number between {} and {}. Try again.",
                    range.min, range.max
                ))?,
            }
        }
    }

    fn prompt_integer(&mut self, label: &str, range: &FormRange, default: u32) -> Result<u32> {
        loop {
            let answer = self.prompt_with_default(label, &default.to_string())?;
            match answer.parse::<u32>() {
                Ok(v) if range.contains(f64::from(v)) => return Ok(v),
                _ => self.say(&format!(
                    "  Invalid: enter a whole number between {} and {}. Try again.",
                    range.min, range.max
                ))?,
            }
        }
    }

    /// Numbered menu; returns the chosen option. The first option is the default.
    fn prompt_choice<T: Copy>(&mut self, label: &str, options: &[(T, String)]) -> Result<T> {
        self.say(label)?;
        for (i, (_, text)) in options.iter().enumerate() {
            self.say(&format!("  {}) {}", i + 1, text))?;
        }
        loop {
            let answer = self.prompt_with_default("Choice", "1")?;
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(options[n - 1].0),
                _ => self.say(&format!(
                    "  Invalid: enter a number between 1 and {}. Try again.",
                    options.len()
                ))?,
            }
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    fn section(&mut self, title: &str) -> Result<()> {
        self.say("")?;
        self.say(title)?;
        self.say(&"-".repeat(title.len()))
    }

    fn prompt_liver(&mut self) -> Result<LiverInput> {
        let calculate = self.prompt_choice(
            "MELD 3.0 input method",
            &[
                (false, "Enter MELD 3.0 directly".to_string()),
                (true, "Calculate MELD 3.0".to_string()),
            ],
        )?;

        if !calculate {
            let score = self.prompt_integer("MELD 3.0 score", &validation::MELD3, 0)?;
            return Ok(LiverInput::direct(score));
        }

        let labs = MeldLabValues {
            bilirubin: self.prompt_number("Total Bilirubin (µmol/L)", &validation::BILIRUBIN, 0.0)?,
            creatinine: self.prompt_number("Creatinine (µmol/L)", &validation::CREATININE, 0.0)?,
            inr: self.prompt_number("INR", &validation::INR, 0.0)?,
            sodium: self.prompt_number("Sodium (mmol/L)", &validation::SODIUM, 115.0)?,
            female: self.prompt_yes_no("Female gender?", false)?,
        };
        if labs_entered(&labs) {
            self.say(&format!("Calculated MELD 3.0 score: {}", calculate_meld3(&labs)))?;
        } else {
            self.say("Labs incomplete (a value is 0): MELD 3.0 = 0")?;
        }
        Ok(LiverInput::from_labs(labs))
    }

    /// Walk through every field of the intake form.
    pub fn run(&mut self) -> Result<PatientCase> {
        self.section("Tumor Burden Component")?;
        let tumor_size = self.prompt_number("Largest tumor size (cm)", &validation::TUMOR_SIZE, 0.0)?;
        let tumor_volume = self.prompt_number("Tumor volume (cc)", &validation::TUMOR_VOLUME, 0.0)?;
        let afp = self.prompt_number("AFP (ng/mL)", &validation::AFP, 0.0)?;

        self.section("Vascular Status")?;
        let options: Vec<(PortalVeinStatus, String)> = PortalVeinStatus::ALL
            .iter()
            .map(|s| (*s, s.label().to_string()))
            .collect();
        let portal_vein = self.prompt_choice("Portal vein status", &options)?;
        let shunt_fraction =
            self.prompt_number("Shunt fraction (%)", &validation::SHUNT_FRACTION, 0.0)?;

        self.section("Liver Function/Reserve")?;
        let liver = self.prompt_liver()?;
        let albumin = self.prompt_number("Albumin (g/L)", &validation::ALBUMIN, 0.0)?;
        let alt_ast_ratio = self.prompt_number("ALT/AST ratio", &validation::ALT_AST_RATIO, 0.0)?;

        self.section("Inflammatory/Performance Status")?;
        let nlr = self.prompt_number("NLR", &validation::NLR, 0.0)?;
        let ecog_options: Vec<(u8, String)> = (0..=3u8).map(|e| (e, e.to_string())).collect();
        let ecog = self.prompt_choice("ECOG Performance Status", &ecog_options)?;

        Ok(PatientCase {
            tumor_size,
            tumor_volume,
            afp,
            portal_vein,
            shunt_fraction,
            liver,
            albumin,
            alt_ast_ratio,
            nlr,
            ecog,
        })
    }
}

/// Run the intake form on the terminal.
pub fn run_interactive() -> Result<PatientCase> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).run()
}
