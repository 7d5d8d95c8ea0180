pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const PURPLE: &str = "\x1b[38;5;93m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_RED: &str = "\x1b[91m";
}

pub mod logging {
    use std::{fs::OpenOptions, io::Write, path::Path};

    /// Append one line to `LOG_PATH` (default `logs/polydapp.log`). The
    /// terminal belongs to the UI, so nothing is written to stderr.
    pub fn write_line(line: &str) {
        let path = std::env::var("LOG_PATH").unwrap_or_else(|_| "logs/polydapp.log".to_string());
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
    // log!(cc::RED, "hello");
    ($color:expr, $fmt:literal $(,)?) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        $crate::libs::writing::logging::write_line(&format!(
            "{}{} | {}{}{}{}",
            $crate::libs::writing::cc::LIGHT_GRAY,
            time,
            $crate::libs::writing::cc::RESET,
            $color,
            format_args!($fmt),
            $crate::libs::writing::cc::RESET,
        ));
    }};

    // log!(cc::GREEN, "ready: {}", who);
    ($color:expr, $fmt:literal, $($arg:tt)+) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        $crate::libs::writing::logging::write_line(&format!(
            "{}{} | {}{}{}{}",
            $crate::libs::writing::cc::LIGHT_GRAY,
            time,
            $crate::libs::writing::cc::RESET,
            $color,
            format_args!($fmt, $($arg)+),
            $crate::libs::writing::cc::RESET,
        ));
    }};

    // log!("plain");
    ($fmt:literal $(,)?) => {
        $crate::log!($crate::libs::writing::cc::LIGHT_GRAY, $fmt)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        $crate::libs::writing::logging::write_line(&format!(
            "{}{} | {}{}{}{}",
            $crate::libs::writing::cc::LIGHT_GRAY,
            time,
            $crate::libs::writing::cc::RESET,
            $crate::libs::writing::cc::ORANGE,
            format_args!($($arg)*),
            $crate::libs::writing::cc::RESET,
        ));
    }};
}
