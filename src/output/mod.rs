mod formatter;

pub use formatter::{
    format_account_detail, format_age, format_csv, format_points, format_ranked_table,
    format_score, format_tier_summary, should_use_colors,
};
