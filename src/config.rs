/// Side length of both grids.
pub const BOARD_SIZE: usize = 10;

/// Server URL used by the reference deployment.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080";
