use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::ColorChoice;
use crate::intake::labs_entered;
use crate::recommendations::{recommendations_for, RecommendationBundle};
use crate::scoring::meld::clamp_labs;
use crate::scoring::{
    meld3_raw, Assessment, MeldLabValues, RiskCategory, ScoreBreakdown, Y90rsResult, MAX_SCORE,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn resolve_colors(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Auto => should_use_colors(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Traffic-light color for a category
fn category_color(category: RiskCategory) -> AnsiColors {
    match category {
        RiskCategory::Low => AnsiColors::Green,
        RiskCategory::Intermediate => AnsiColors::Yellow,
        RiskCategory::High => AnsiColors::Red,
    }
}

/// Headline result: total score, category and mortality band
pub fn format_result(result: &Y90rsResult, use_colors: bool) -> String {
    let score = format!("{} / {}", result.score, MAX_SCORE);
    let category = result.category.label();
    if use_colors {
        let color = category_color(result.category);
        format!(
            "Total Score:    {}\nRisk Category:  {}\nMortality Risk: {}",
            score.bold(),
            category.color(color).bold(),
            result.mortality.color(color)
        )
    } else {
        format!(
            "Total Score:    {}\nRisk Category:  {}\nMortality Risk: {}",
            score, category, result.mortality
        )
    }
}

/// Per-domain points with the rule each component matched
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for domain in &breakdown.domains {
        let header = format!(
            "{:<34}{:>2}/{}",
            domain.domain.label(),
            domain.points(),
            domain.domain.max_points()
        );
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });

        for component in &domain.components {
            let line = format!(
                "  {:<16}{:>2}/{}  {}",
                component.label, component.points, component.max_points, component.description
            );
            lines.push(if use_colors && component.points == 0 {
                line.dimmed().to_string()
            } else {
                line
            });
        }
    }
    lines.join("\n")
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Recommendation sections as bulleted lists, wrapped to `width` when given
pub fn format_recommendations(
    bundle: &RecommendationBundle,
    use_colors: bool,
    width: Option<usize>,
) -> String {
    let mut blocks = Vec::new();
    for (title, items) in bundle.sections() {
        let mut block = vec![if use_colors {
            title.bold().underline().to_string()
        } else {
            title.to_string()
        }];
        for item in items {
            match width {
                Some(w) if w > 10 => {
                    let wrapped = wrap_text(item, w - 2);
                    for (i, line) in wrapped.iter().enumerate() {
                        let bullet = if i == 0 { "- " } else { "  " };
                        block.push(format!("{}{}", bullet, line));
                    }
                }
                _ => block.push(format!("- {}", item)),
            }
        }
        blocks.push(block.join("\n"));
    }
    blocks.join("\n\n")
}

/// Full text report for one assessment
pub fn format_assessment(assessment: &Assessment, use_colors: bool, show_breakdown: bool) -> String {
    let mut parts = vec![format_result(&assessment.result, use_colors)];
    if show_breakdown {
        parts.push(format_breakdown(&assessment.breakdown, use_colors));
    }

    let heading = "Management Recommendations";
    parts.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading.to_string()
    });
    parts.push(format_recommendations(
        assessment.recommendations,
        use_colors,
        get_terminal_width(),
    ));
    parts.join("\n\n")
}

/// Heading plus recommendations for one category, wrapped like the score report
pub fn format_category_recommendations(category: RiskCategory, use_colors: bool) -> String {
    render_category_recommendations(category, use_colors, get_terminal_width())
}

fn render_category_recommendations(
    category: RiskCategory,
    use_colors: bool,
    width: Option<usize>,
) -> String {
    let heading = format!("{} ({} mortality)", category, category.mortality_band());
    let heading = if use_colors {
        heading.color(category_color(category)).bold().to_string()
    } else {
        heading
    };
    format!(
        "{}\n\n{}",
        heading,
        format_recommendations(recommendations_for(category), use_colors, width)
    )
}

/// MELD 3.0 result with the converted, bounded lab values it was computed from.
/// `meld3` is the resolved score, 0 for an incomplete panel.
pub fn format_meld(labs: &MeldLabValues, meld3: u32, use_colors: bool) -> String {
    let c = clamp_labs(labs);
    let score_str = if use_colors {
        meld3.bold().to_string()
    } else {
        meld3.to_string()
    };
    let note = if labs_entered(labs) {
        format!("unrounded {:.3}", meld3_raw(labs))
    } else {
        "labs incomplete: a value is <= 0".to_string()
    };
    format!(
        "MELD 3.0: {} ({})\n  Bilirubin:  {:.2} mg/dL\n  Creatinine: {:.2} mg/dL\n  INR:        {:.2}\n  Sodium:     {:.1} mmol/L\n  Female:     {}",
        score_str,
        note,
        c.bilirubin_mgdl,
        c.creatinine_mgdl,
        c.inr,
        c.sodium,
        if labs.female { "yes" } else { "no" }
    )
}
