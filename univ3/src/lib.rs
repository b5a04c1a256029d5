pub mod writing {
    pub mod cc {
        pub const RED: &str         = "\x1b[31m";
        pub const GREEN: &str       = "\x1b[32m";
        pub const YELLOW: &str      = "\x1b[33m";
        pub const CYAN: &str        = "\x1b[36m";
        pub const BOLD: &str        = "\x1b[1m";
        pub const RESET: &str       = "\x1b[0m";
        pub const LIGHT_GRAY: &str  = "\x1b[38;5;245m";
        pub const LIGHT_GREEN: &str = "\x1b[92m";
    }

    pub mod logging {
        // These are operator scripts, so lines go straight to stdout.
        pub fn write_line(line: &str) {
            println!("{}", line);
        }
    }

    #[macro_export]
    macro_rules! log {
        // colored, raw literal
        ($color:expr, $msg:literal) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $color,
                $msg,
                $crate::writing::cc::RESET,
            ));
        }};

        // colored, with normal formatting: log!(cc::RED, "err: {}", e);
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

        // default color, raw literal
        ($msg:literal) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            $crate::writing::logging::write_line(&format!(
                "{} | {}{}",
                time,
                $crate::writing::cc::LIGHT_GRAY,
                $msg,
            ));
        }};

        // default color, with formatting
        ($fmt:literal, $($arg:tt)+) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $crate::writing::cc::LIGHT_GRAY,
                format_args!($fmt, $($arg)+),
                $crate::writing::cc::RESET,
            ));
        }};
    }
}

pub mod error;
pub mod report;
pub mod units;
pub mod uniswap;
