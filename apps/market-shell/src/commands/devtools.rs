//! The database panel: `sql [schema|er|logs|json]` and `export-sql <path>`.

use std::path::Path;
use tracing::info;
use unitrade_core::schema::FULL_INIT_SQL;
use unitrade_core::DevToolsTab;

use crate::error::ApiError;
use crate::state::MarketState;

/// Renders one panel tab. `json` dumps the query log as JSON instead.
pub fn sql(state: &MarketState, arg: Option<&str>) -> Result<String, ApiError> {
    let viewer = state.session.log_viewer();

    match arg.map(str::trim) {
        Some(a) if a.eq_ignore_ascii_case("json") => Ok(viewer.logs_json()?),
        Some(a) => {
            let tab: DevToolsTab = a.parse()?;
            Ok(format!("== {} ==\n{}", tab, viewer.render(tab)))
        }
        None => {
            let tab = DevToolsTab::default();
            Ok(format!("== {} ==\n{}", tab, viewer.render(tab)))
        }
    }
}

/// Writes the initialization script to `path`.
pub fn export_sql(path: &str) -> Result<String, ApiError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ApiError::validation("Usage: export-sql <path>"));
    }

    let path = Path::new(path);
    std::fs::write(path, FULL_INIT_SQL)?;
    info!(?path, "Initialization SQL exported");

    Ok(format!("Wrote {} bytes to {}", FULL_INIT_SQL.len(), path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ShellConfig;
    use tempfile::TempDir;

    fn state() -> MarketState {
        let mut state = MarketState::from_config(&ShellConfig::default()).unwrap();
        state.session.start();
        state
    }

    #[test]
    fn test_default_tab_is_schema() {
        let text = sql(&state(), None).unwrap();
        assert!(text.starts_with("== Schema Definitions =="));
        assert!(text.contains("CREATE TABLE"));
    }

    #[test]
    fn test_logs_tab_shows_init() {
        let text = sql(&state(), Some("logs")).unwrap();
        assert!(text.contains("[INIT]"));
        assert!(text.contains("ORDER BY publish_date DESC;"));
    }

    #[test]
    fn test_er_tab() {
        let text = sql(&state(), Some("er")).unwrap();
        assert!(text.contains("One User can sell Many Products."));
    }

    #[test]
    fn test_json_dump() {
        let text = sql(&state(), Some("json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0]["action"], "INIT");
    }

    #[test]
    fn test_unknown_tab() {
        assert!(sql(&state(), Some("indexes")).is_err());
    }

    #[test]
    fn test_export_writes_script() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.sql");

        export_sql(path.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), FULL_INIT_SQL);
        assert!(export_sql("  ").is_err());
    }
}
