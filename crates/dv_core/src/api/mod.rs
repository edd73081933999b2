pub mod analysis_json;

pub use analysis_json::{analyze_match_json, AnalyzeRequest, AnalyzeResponse};
