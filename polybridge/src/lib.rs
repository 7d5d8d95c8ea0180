//! Token operations over a Polygon bridge, behind one client contract.
//!
//! Both the proof-of-stake and the zk-EVM bridge are served by
//! [`polygon::PolygonClient`], configured from the variant's network table.
//! [`Variant`] picks the table at runtime and implements [`Bridge`] itself.

pub mod abi;
pub mod client;
pub mod erc20;
pub mod error;
pub mod network;
pub mod polygon;
pub mod pos;
pub mod units;
pub mod zkevm;

mod endpoints;
#[cfg(test)]
mod testnode;

pub use client::{Bridge, BridgeClient, InitConfig, PendingTransfer, TokenHandle, TransferReceipt};
pub use error::BridgeError;
pub use network::{NetworkParams, Variant};

pub mod writing {
    pub mod cc {
        pub const RED: &str = "\x1b[31m";
        pub const GREEN: &str = "\x1b[32m";
        pub const YELLOW: &str = "\x1b[33m";
        pub const RESET: &str = "\x1b[0m";
        pub const ORANGE: &str = "\x1b[38;5;208m";
        pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
        pub const LIGHT_GREEN: &str = "\x1b[92m";
        pub const LIGHT_CYAN: &str = "\x1b[96m";
    }

    pub mod logging {
        use std::{fs::OpenOptions, io::Write, path::Path};

        // Bridge logs go to their own file so the terminal UI stays clean.
        pub fn write_line(line: &str) {
            let path = std::env::var("POLYBRIDGE_LOG_PATH")
                .unwrap_or_else(|_| "logs/polybridge.log".to_string());
            if let Some(parent) = Path::new(&path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
                let _ = writeln!(f, "{}", line);
            }
        }
    }

    #[macro_export]
    macro_rules! log {
        ($color:expr, $msg:literal) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $color,
                format_args!($msg),
                $crate::writing::cc::RESET,
            ));
        }};

        ($color:expr, $fmt:literal, $($arg:tt)+) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $color,
                format_args!($fmt, $($arg)+),
                $crate::writing::cc::RESET,
            ));
        }};
    }
}
