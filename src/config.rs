//! Game rules and server settings.

/// Side length of every board.
pub const BOARD_SIZE: usize = 10;

/// One kind of piece in the fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceDef {
    name: &'static str,
    length: usize,
    count: usize,
}

impl PieceDef {
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self { name, length, count }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn count(&self) -> usize {
        self.count
    }
}

pub const NUM_PIECE_KINDS: usize = 4;

pub const FLEET: [PieceDef; NUM_PIECE_KINDS] = [
    PieceDef::new("Battleship", 4, 1),
    PieceDef::new("Cruiser", 3, 2),
    PieceDef::new("Destroyer", 2, 3),
    PieceDef::new("Boat", 1, 4),
];

const fn fleet_cells(fleet: &[PieceDef]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].length * fleet[i].count;
        i += 1;
    }
    total
}

/// Occupied cells a board must hold before it counts as ready.
pub const PLACEMENT_TARGET: usize = fleet_cells(&FLEET);

#[cfg(feature = "std")]
pub use server::*;

#[cfg(feature = "std")]
mod server {
    use std::time::Duration;

    /// Default listen address for the TCP server.
    pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

    /// Default timeout for a single frame write (30 seconds).
    pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default upper bound on a frame payload. Boards serialize to well under 2 KiB.
    pub const DEFAULT_MAX_FRAME_SIZE: u32 = 64 * 1024;

    /// Settings for the network side of the server.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ServerConfig {
        pub bind: String,
        pub io_timeout: Duration,
        pub max_frame_size: u32,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: DEFAULT_BIND.to_string(),
                io_timeout: DEFAULT_IO_TIMEOUT,
                max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            }
        }
    }
}
