pub mod formatter;
pub mod report;

pub use formatter::{
    format_assessment, format_breakdown, format_category_recommendations, format_meld,
    format_recommendations, format_result, resolve_colors, should_use_colors,
};
pub use report::{to_json, MeldReport, Report};
