use std::path::PathBuf;

/// Errors raised when creating a game with an unusable board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum DimensionError {
    #[error(
        "invalid board dimensions {width}x{height} (need at least 1x1 and at most {max} cells)",
        max = crate::game::MAX_CELLS
    )]
    InvalidDimensions { width: usize, height: usize },
}

/// Reasons a move is rejected. The board is never mutated when one of these
/// is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is already over")]
    GameAlreadyOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_display() {
        let err = DimensionError::InvalidDimensions { width: 0, height: 6 };
        assert_eq!(
            err.to_string(),
            "invalid board dimensions 0x6 (need at least 1x1 and at most 1048576 cells)"
        );
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn { column: 7, width: 7 };
        assert_eq!(
            err.to_string(),
            "column 7 is out of range (board has 7 columns)"
        );
        assert_eq!(MoveError::ColumnFull { column: 2 }.to_string(), "column 2 is full");
        assert_eq!(MoveError::GameAlreadyOver.to_string(), "game is already over");
    }

    #[test]
    fn test_move_error_serializes_with_kind_tag() {
        let json = serde_json::to_string(&MoveError::ColumnFull { column: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"column_full","column":3}"#);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.width must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.width must be >= 1"
        );
    }
}
